//! Subscription domain: member accounts, payments, and reconciliation.
//!
//! The cached `AccessStatus` field gates feature access in the application.
//! It is a cache, not a source of truth: the payment history and the
//! subscription snapshot are authoritative, and `reconcile` detects and
//! repairs drift between them.

mod account;
mod errors;
mod events;
mod payment;
mod plan;
mod reconcile;
mod snapshot;
mod status;

pub use account::MemberAccount;
pub use errors::SubscriptionError;
pub use events::AccountRepaired;
pub use payment::{Payment, PaymentKind, PaymentStatus};
pub use plan::SubscriptionPlan;
pub use reconcile::{apply_repair, diagnose, AuditFinding, Discrepancy, RepairOutcome};
pub use snapshot::SubscriptionSnapshot;
pub use status::AccessStatus;
