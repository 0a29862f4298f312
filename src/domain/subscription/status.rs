//! Cached access-status state machine.
//!
//! The coarse-grained field that gates feature access. Defines all possible
//! states and the transitions the purchase and reconciliation flows may
//! perform.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Cached subscription access status.
///
/// A projection of the payment history, not a source of truth. The
/// reconciler exists because writers have historically let this field
/// drift from the records it summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    /// User has never purchased a subscription.
    None,

    /// A purchase was initiated and its payment is in flight.
    /// No access until the payment completes.
    Pending,

    /// Paid, unexpired subscription. Full access.
    Active,

    /// Subscription ended or the pending purchase was abandoned.
    Expired,

    /// The in-flight payment failed.
    Failed,
}

impl AccessStatus {
    /// Returns true if this status grants access to subscription features.
    pub fn has_access(&self) -> bool {
        matches!(self, AccessStatus::Active)
    }
}

impl StateMachine for AccessStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AccessStatus::*;
        matches!(
            (self, target),
            // A fresh purchase creates a pending payment
            (None, Pending)
            // Payment acceptance, abandonment, or failure
                | (Pending, Active)
                | (Pending, Expired)
                | (Pending, Failed)
            // Expiration sweep
                | (Active, Expired)
            // Resubscribe creates a new payment record
                | (Expired, Pending)
                | (Failed, Pending)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AccessStatus::*;
        match self {
            None => vec![Pending],
            Pending => vec![Active, Expired, Failed],
            Active => vec![Expired],
            Expired => vec![Pending],
            Failed => vec![Pending],
        }
    }
}

impl std::fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccessStatus::None => "none",
            AccessStatus::Pending => "pending",
            AccessStatus::Active => "active",
            AccessStatus::Expired => "expired",
            AccessStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}
