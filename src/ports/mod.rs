//! Ports - interfaces between the application core and the outside world.
//!
//! Each port is an `async_trait` object-safe trait. Handlers hold
//! `Arc<dyn Port>` collaborators; adapters provide the Postgres and
//! in-memory implementations.

mod account_repository;
mod attendance_provider;
mod award_repository;
mod event_publisher;
mod payment_repository;
mod template_catalog;

pub use account_repository::AccountRepository;
pub use attendance_provider::{AttendanceProvider, AttendanceSample};
pub use award_repository::AwardRepository;
pub use event_publisher::EventPublisher;
pub use payment_repository::PaymentRepository;
pub use template_catalog::TemplateCatalog;
