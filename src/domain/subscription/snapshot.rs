//! Active-subscription snapshot stored on the user document.

use crate::domain::foundation::{SubscriptionId, Timestamp};
use serde::{Deserialize, Serialize};

use super::plan::SubscriptionPlan;

/// Denormalized copy of the user's current subscription.
///
/// Written at purchase acceptance; authoritative for expiry checks.
/// Never deleted, only overwritten by the next purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    pub id: SubscriptionId,
    pub plan: SubscriptionPlan,
    pub purchased_at: Timestamp,
    pub expires_at: Timestamp,
    pub payment_method: String,
}

impl SubscriptionSnapshot {
    /// Creates a snapshot for a purchase accepted at `purchased_at`.
    pub fn new(
        id: SubscriptionId,
        plan: SubscriptionPlan,
        purchased_at: Timestamp,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            id,
            plan,
            purchased_at,
            expires_at: purchased_at.add_days(plan.duration_days()),
            payment_method: payment_method.into(),
        }
    }

    /// True if the subscription has run out as of `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        !self.expires_at.is_after(&now)
    }
}
