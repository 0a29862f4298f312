//! Subscription domain events.

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain_event;
use serde::{Deserialize, Serialize};

use super::reconcile::Discrepancy;
use super::status::AccessStatus;

/// The reconciler realigned an account's cached status with its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRepaired {
    pub event_id: EventId,
    pub user_id: UserId,
    pub discrepancy: Discrepancy,
    pub previous_status: AccessStatus,
    pub new_status: AccessStatus,
    pub occurred_at: Timestamp,
}

domain_event!(
    AccountRepaired,
    event_type = "account.repaired.v1",
    aggregate_id = user_id,
    aggregate_type = "MemberAccount",
    occurred_at = occurred_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn repaired_event_builds_envelope() {
        let event = AccountRepaired {
            event_id: EventId::new(),
            user_id: UserId::new("user-1").unwrap(),
            discrepancy: Discrepancy::PhantomPending,
            previous_status: AccessStatus::Pending,
            new_status: AccessStatus::Expired,
            occurred_at: Timestamp::now(),
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "account.repaired.v1");
        assert_eq!(envelope.aggregate_type, "MemberAccount");
        assert_eq!(envelope.aggregate_id, "user-1");
        assert_eq!(envelope.payload["discrepancy"], "phantom_pending");
    }

    #[test]
    fn repaired_event_round_trips_through_payload() {
        let event = AccountRepaired {
            event_id: EventId::new(),
            user_id: UserId::new("user-2").unwrap(),
            discrepancy: Discrepancy::InconsistentActive,
            previous_status: AccessStatus::Expired,
            new_status: AccessStatus::Active,
            occurred_at: Timestamp::now(),
        };

        let back: AccountRepaired = event.to_envelope().payload_as().unwrap();
        assert_eq!(back, event);
    }
}
