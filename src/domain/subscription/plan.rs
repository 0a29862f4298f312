//! Subscription plans.

use serde::{Deserialize, Serialize};

/// Subscription duration options sold by the association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Rolling 30-day subscription.
    Monthly,

    /// Full-season subscription.
    Seasonal,
}

impl SubscriptionPlan {
    /// Subscription length in days.
    pub fn duration_days(&self) -> i64 {
        match self {
            SubscriptionPlan::Monthly => 30,
            SubscriptionPlan::Seasonal => 365,
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "Monthly",
            SubscriptionPlan::Seasonal => "Seasonal",
        }
    }
}
