//! RefundAwardsHandler - Command handler for returning spent bonus value.
//!
//! Invoked when a payment that drew bonus value is later cancelled or
//! failed. The command carries the original draw order; refunding walks it
//! in reverse, so the last award drawn from is the first one restored.

use std::sync::Arc;

use tracing::warn;

use crate::domain::award::{AwardError, AwardRefunded};
use crate::domain::foundation::{
    AwardId, Cents, ErrorCode, EventId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::ports::{AwardRepository, EventPublisher};

/// Command to redistribute a refund across previously drawn awards.
#[derive(Debug, Clone)]
pub struct RefundAwardsCommand {
    pub user_id: UserId,

    /// Award ids in the original draw order. Refund applies in reverse.
    pub award_ids: Vec<AwardId>,

    pub amount: Cents,
}

/// Result of a refund.
#[derive(Debug, Clone)]
pub struct RefundAwardsResult {
    /// Total value actually restored across the supplied awards.
    pub refunded: Cents,

    /// Portion of the requested amount that could not be restored.
    ///
    /// Each award's restoration is capped at its own `used_value`; a
    /// non-zero shortfall is an accounting warning, not an error.
    pub shortfall: Cents,

    /// Awards that had value restored, in refund (reverse-draw) order.
    pub touched: Vec<AwardId>,
}

impl RefundAwardsResult {
    /// True if part of the requested refund had nowhere to go.
    pub fn has_shortfall(&self) -> bool {
        !self.shortfall.is_zero()
    }
}

/// Handler for refunding spent bonus value.
pub struct RefundAwardsHandler {
    awards: Arc<dyn AwardRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RefundAwardsHandler {
    pub fn new(awards: Arc<dyn AwardRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            awards,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: RefundAwardsCommand) -> Result<RefundAwardsResult, AwardError> {
        let mut remaining = cmd.amount;
        let mut refunded = Cents::ZERO;
        let mut touched = Vec::new();

        // LIFO over the draw list
        for award_id in cmd.award_ids.iter().rev() {
            if remaining.is_zero() {
                break;
            }

            let mut award = self
                .awards
                .find_by_id(award_id)
                .await?
                .ok_or(AwardError::NotFound(*award_id))?;

            let expected = award.used_value;
            let restored = award.refund_capped(remaining);
            if restored.is_zero() {
                continue;
            }

            self.awards
                .update_balance(&award, expected)
                .await
                .map_err(|err| match err.code {
                    ErrorCode::ConcurrentModification => AwardError::conflict(award.id),
                    ErrorCode::AwardNotFound => AwardError::not_found(award.id),
                    _ => err.into(),
                })?;

            let event = AwardRefunded {
                event_id: EventId::new(),
                award_id: award.id,
                user_id: award.user_id.clone(),
                restored,
                residual: award.residual,
                occurred_at: Timestamp::now(),
            };
            self.event_publisher.publish(event.to_envelope()).await?;

            remaining = remaining - restored;
            refunded = refunded + restored;
            touched.push(award.id);
        }

        if !remaining.is_zero() {
            warn!(
                user_id = %cmd.user_id,
                requested = %cmd.amount,
                refunded = %refunded,
                shortfall = %remaining,
                "refund amount exceeds refundable value across supplied awards"
            );
        }

        Ok(RefundAwardsResult {
            refunded,
            shortfall: remaining,
            touched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::award::testing::seeded;
    use crate::domain::award::{AwardRecord, AwardTemplate};
    use crate::domain::foundation::TemplateId;
    use crate::ports::AwardRepository;

    fn user() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    fn spent_award(name: &str, value: i64, spent: i64) -> AwardRecord {
        let template = AwardTemplate::new(TemplateId::new(), name, Cents::new(value));
        let mut award = AwardRecord::grant(AwardId::new(), user(), &template, None, Timestamp::now());
        award.spend(Cents::new(spent));
        award
    }

    #[tokio::test]
    async fn refund_restores_single_award() {
        let award = spent_award("Premio Benvenuto", 500, 300);
        let id = award.id;
        let (repo, publisher) = seeded(vec![award]);
        let handler = RefundAwardsHandler::new(repo.clone(), publisher);

        let result = handler
            .handle(RefundAwardsCommand {
                user_id: user(),
                award_ids: vec![id],
                amount: Cents::new(300),
            })
            .await
            .unwrap();

        assert_eq!(result.refunded, Cents::new(300));
        assert!(!result.has_shortfall());

        let stored = repo.get(&id).unwrap();
        assert_eq!(stored.used_value, Cents::ZERO);
        assert_eq!(stored.residual, Cents::new(500));
        assert!(stored.invariant_holds());
    }

    #[tokio::test]
    async fn refund_walks_draw_list_in_reverse() {
        // Purchase drew from A then B; refund must undo B first.
        let a = spent_award("Premio Benvenuto", 300, 300);
        let b = spent_award("Premio Abbonamento Stagionale", 1000, 200);
        let (a_id, b_id) = (a.id, b.id);
        let (repo, publisher) = seeded(vec![a, b]);
        let handler = RefundAwardsHandler::new(repo.clone(), publisher);

        let result = handler
            .handle(RefundAwardsCommand {
                user_id: user(),
                award_ids: vec![a_id, b_id],
                amount: Cents::new(250),
            })
            .await
            .unwrap();

        // B's 200 comes back fully, then 50 from A.
        assert_eq!(result.touched, vec![b_id, a_id]);
        assert_eq!(repo.get(&b_id).unwrap().used_value, Cents::ZERO);
        assert_eq!(repo.get(&a_id).unwrap().used_value, Cents::new(250));
    }

    #[tokio::test]
    async fn per_award_refund_is_capped_at_its_used_value() {
        let award = spent_award("Premio Benvenuto", 500, 100);
        let id = award.id;
        let (repo, publisher) = seeded(vec![award]);
        let handler = RefundAwardsHandler::new(repo.clone(), publisher);

        let result = handler
            .handle(RefundAwardsCommand {
                user_id: user(),
                award_ids: vec![id],
                amount: Cents::new(400),
            })
            .await
            .unwrap();

        assert_eq!(result.refunded, Cents::new(100));
        assert_eq!(result.shortfall, Cents::new(300));
        assert!(result.has_shortfall());
        assert_eq!(repo.get(&id).unwrap().used_value, Cents::ZERO);
    }

    #[tokio::test]
    async fn spend_then_refund_round_trips() {
        let fresh = spent_award("Premio Benvenuto", 500, 0);
        let id = fresh.id;
        let before = fresh.clone();
        let (repo, publisher) = seeded(vec![fresh]);

        // Spend via the record, persist, then refund the same amount.
        let mut drawn = repo.get(&id).unwrap();
        let expected = drawn.used_value;
        drawn.spend(Cents::new(220));
        repo.update_balance(&drawn, expected).await.unwrap();

        let handler = RefundAwardsHandler::new(repo.clone(), publisher);
        handler
            .handle(RefundAwardsCommand {
                user_id: user(),
                award_ids: vec![id],
                amount: Cents::new(220),
            })
            .await
            .unwrap();

        let after = repo.get(&id).unwrap();
        assert_eq!(after.used_value, before.used_value);
        assert_eq!(after.residual, before.residual);
    }

    #[tokio::test]
    async fn publishes_refunded_event_per_touched_award() {
        let a = spent_award("Premio Benvenuto", 300, 300);
        let b = spent_award("Premio Abbonamento Stagionale", 1000, 200);
        let ids = vec![a.id, b.id];
        let (repo, publisher) = seeded(vec![a, b]);
        let handler = RefundAwardsHandler::new(repo, publisher.clone());

        handler
            .handle(RefundAwardsCommand {
                user_id: user(),
                award_ids: ids,
                amount: Cents::new(500),
            })
            .await
            .unwrap();

        let events = publisher.published_events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.event_type == "award.refunded.v1"));
    }

    #[tokio::test]
    async fn missing_award_aborts_the_refund() {
        let (repo, publisher) = seeded(vec![]);
        let handler = RefundAwardsHandler::new(repo, publisher);

        let result = handler
            .handle(RefundAwardsCommand {
                user_id: user(),
                award_ids: vec![AwardId::new()],
                amount: Cents::new(100),
            })
            .await;

        assert!(matches!(result, Err(AwardError::NotFound(_))));
    }

    #[tokio::test]
    async fn zero_amount_refund_is_a_noop() {
        let award = spent_award("Premio Benvenuto", 500, 200);
        let id = award.id;
        let (repo, publisher) = seeded(vec![award]);
        let handler = RefundAwardsHandler::new(repo.clone(), publisher.clone());

        let result = handler
            .handle(RefundAwardsCommand {
                user_id: user(),
                award_ids: vec![id],
                amount: Cents::ZERO,
            })
            .await
            .unwrap();

        assert_eq!(result.refunded, Cents::ZERO);
        assert!(result.touched.is_empty());
        assert!(publisher.published_events().is_empty());
        assert_eq!(repo.get(&id).unwrap().used_value, Cents::new(200));
    }
}
