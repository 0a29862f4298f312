//! Award ledger domain events.
//!
//! Emitted on every ledger mutation. The surrounding application turns
//! these into user-facing notifications; the events themselves carry only
//! structured data.

use crate::domain::foundation::{AwardId, Cents, EventId, Timestamp, UserId};
use crate::domain_event;
use serde::{Deserialize, Serialize};

/// A new award was written to a user's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardGranted {
    pub event_id: EventId,
    pub award_id: AwardId,
    pub user_id: UserId,
    pub name: String,
    pub value: Cents,
    pub occurred_at: Timestamp,
}

domain_event!(
    AwardGranted,
    event_type = "award.granted.v1",
    aggregate_id = award_id,
    aggregate_type = "Award",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Bonus value was consumed from an award by a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardSpent {
    pub event_id: EventId,
    pub award_id: AwardId,
    pub user_id: UserId,
    /// Amount actually consumed after clamping.
    pub consumed: Cents,
    pub residual: Cents,
    pub occurred_at: Timestamp,
}

domain_event!(
    AwardSpent,
    event_type = "award.spent.v1",
    aggregate_id = award_id,
    aggregate_type = "Award",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Previously consumed value was restored after a payment cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRefunded {
    pub event_id: EventId,
    pub award_id: AwardId,
    pub user_id: UserId,
    pub restored: Cents,
    pub residual: Cents,
    pub occurred_at: Timestamp,
}

domain_event!(
    AwardRefunded,
    event_type = "award.refunded.v1",
    aggregate_id = award_id,
    aggregate_type = "Award",
    occurred_at = occurred_at,
    event_id = event_id
);

/// The attendance award's face value changed with the attendance rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRevalued {
    pub event_id: EventId,
    pub award_id: AwardId,
    pub user_id: UserId,
    pub previous_value: Cents,
    pub new_value: Cents,
    pub residual: Cents,
    pub occurred_at: Timestamp,
}

domain_event!(
    AwardRevalued,
    event_type = "award.revalued.v1",
    aggregate_id = award_id,
    aggregate_type = "Award",
    occurred_at = occurred_at,
    event_id = event_id
);
