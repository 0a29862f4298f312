//! Member account: the user-level subscription view.

use crate::domain::foundation::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::snapshot::SubscriptionSnapshot;
use super::status::AccessStatus;

/// The subscription-relevant slice of a user document.
///
/// `access_status` is the cached gate the application checks before
/// unlocking subscription features. `active_subscription` and the payment
/// records are authoritative; the account invariant is:
/// unexpired snapshot implies Active, missing snapshot forbids Active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAccount {
    pub user_id: UserId,
    pub access_status: AccessStatus,
    pub active_subscription: Option<SubscriptionSnapshot>,

    /// Sticky flag set when a subscription payment fails; cleared by repair
    /// or by the next successful purchase.
    pub subscription_payment_failed: bool,
}

impl MemberAccount {
    /// Creates an account that has never purchased a subscription.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            access_status: AccessStatus::None,
            active_subscription: None,
            subscription_payment_failed: false,
        }
    }

    /// True if the account holds a subscription that has not expired.
    pub fn has_valid_subscription(&self, now: Timestamp) -> bool {
        self.active_subscription
            .as_ref()
            .map(|snapshot| !snapshot.is_expired(now))
            .unwrap_or(false)
    }

    /// True if the cached gate agrees with the authoritative records.
    ///
    /// Only covers the snapshot side of the invariant; the phantom-pending
    /// check needs the payment records and lives in the reconciler.
    pub fn status_matches_subscription(&self, now: Timestamp) -> bool {
        if self.has_valid_subscription(now) {
            self.access_status == AccessStatus::Active
        } else {
            self.access_status != AccessStatus::Active
        }
    }
}
