//! PostgreSQL adapters - Database implementations for repository ports.

mod account_repository;
mod award_repository;
mod payment_repository;
mod template_catalog;

pub use account_repository::PostgresAccountRepository;
pub use award_repository::PostgresAwardRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use template_catalog::PostgresTemplateCatalog;
