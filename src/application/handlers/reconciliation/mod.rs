//! Reconciliation handlers.
//!
//! Admin-triggered audit and repair of the cached access-status field.
//!
//! ## Commands
//! - Repairing a single account's drift
//!
//! ## Queries
//! - Auditing all accounts for phantom-pending and inconsistent-active drift

#[cfg(test)]
pub(crate) mod testing;

mod audit_accounts;
mod repair_account;

pub use audit_accounts::{AuditAccountsHandler, AuditAccountsResult, AuditError};
pub use repair_account::{RepairAccountCommand, RepairAccountHandler, RepairAccountResult};
