//! In-process adapter implementations.
//!
//! Backed by `RwLock`ed collections; used by the integration tests and by
//! local runs without a database. The award store honors the same
//! conditional-update semantics as the Postgres adapter so concurrency
//! behavior can be exercised without a live database.

mod account_store;
mod attendance;
mod award_store;
mod payment_store;
mod template_catalog;

pub use account_store::InMemoryAccountStore;
pub use attendance::InMemoryAttendanceStore;
pub use award_store::InMemoryAwardStore;
pub use payment_store::InMemoryPaymentStore;
pub use template_catalog::InMemoryTemplateCatalog;
