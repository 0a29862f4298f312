//! Drift detection and repair for the cached access status.
//!
//! The two discrepancy classes this module catches:
//!
//! - **phantom pending**: the cached status says a payment is in flight, but
//!   no pending subscription payment record exists. A cleanup job or race
//!   elsewhere removed the payment without resetting the status.
//! - **inconsistent active**: the account holds a valid, unexpired
//!   subscription but the cached status is not Active.
//!
//! `diagnose` and `apply_repair` are pure over the account value; handlers
//! own the port reads and writes around them. Repair is idempotent so that
//! an interrupted sweep can simply be re-run.

use crate::domain::foundation::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::account::MemberAccount;
use super::status::AccessStatus;

/// A class of cached-status drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discrepancy {
    /// Status is Pending with no pending subscription payment on record.
    PhantomPending,

    /// Valid unexpired subscription but status is not Active.
    InconsistentActive,
}

impl std::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Discrepancy::PhantomPending => "phantom_pending",
            Discrepancy::InconsistentActive => "inconsistent_active",
        };
        write!(f, "{}", s)
    }
}

/// One flagged account from an audit sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFinding {
    pub user_id: UserId,
    pub discrepancy: Discrepancy,
}

/// Result of applying a repair to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub discrepancy: Discrepancy,

    /// False when the account was already consistent for this discrepancy.
    pub changed: bool,

    pub previous_status: AccessStatus,
    pub new_status: AccessStatus,
}

/// Checks one account for drift.
///
/// `has_pending_subscription_payment` is the caller's answer from the
/// payment records. Phantom pending is checked first; an account can in
/// principle exhibit both classes, and the second is caught on the next
/// sweep after the first repair.
pub fn diagnose(
    account: &MemberAccount,
    has_pending_subscription_payment: bool,
    now: Timestamp,
) -> Option<Discrepancy> {
    if account.access_status == AccessStatus::Pending && !has_pending_subscription_payment {
        return Some(Discrepancy::PhantomPending);
    }
    if account.has_valid_subscription(now) && account.access_status != AccessStatus::Active {
        return Some(Discrepancy::InconsistentActive);
    }
    None
}

/// Applies the repair for `discrepancy` to the account in place.
///
/// Phantom pending: status becomes Expired and the payment-failed flag is
/// cleared. The snapshot is left untouched; a subscription that was never
/// recorded is not fabricated. Inconsistent active: status becomes Active,
/// nothing else changes.
///
/// These are corrective writes that realign the cache with the records, so
/// they set the status directly instead of walking the normal purchase-flow
/// transitions. Re-applying a repair to an already-consistent account
/// changes nothing.
pub fn apply_repair(account: &mut MemberAccount, discrepancy: Discrepancy) -> RepairOutcome {
    let previous_status = account.access_status;
    let changed = match discrepancy {
        Discrepancy::PhantomPending => {
            let needs_status = account.access_status != AccessStatus::Expired;
            let needs_flag = account.subscription_payment_failed;
            account.access_status = AccessStatus::Expired;
            account.subscription_payment_failed = false;
            needs_status || needs_flag
        }
        Discrepancy::InconsistentActive => {
            let needs_status = account.access_status != AccessStatus::Active;
            account.access_status = AccessStatus::Active;
            needs_status
        }
    };

    RepairOutcome {
        discrepancy,
        changed,
        previous_status,
        new_status: account.access_status,
    }
}
