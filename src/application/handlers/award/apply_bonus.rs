//! ApplyPurchaseBonusHandler - Command handler executing a bonus plan.
//!
//! Purchase-flow glue: computes the plan for the price and consumes each
//! draw against the ledger, in plan order. Any failure aborts the purchase;
//! consistency of the wallet matters more than completing the sale.

use std::sync::Arc;

use crate::domain::award::{AwardError, AwardSpent, BonusCalculation};
use crate::domain::foundation::{
    Cents, ErrorCode, EventId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::ports::{AwardRepository, EventPublisher};

/// Command to apply bonus value to a purchase.
#[derive(Debug, Clone)]
pub struct ApplyPurchaseBonusCommand {
    pub user_id: UserId,
    pub price: Cents,
}

/// The executed plan, for the payment record's bookkeeping fields.
#[derive(Debug, Clone)]
pub struct ApplyPurchaseBonusResult {
    /// Plan that was executed; `award_ids()` is the draw order a later
    /// refund must reverse.
    pub plan: BonusCalculation,

    /// Price remaining after the bonus.
    pub remainder: Cents,
}

/// Handler applying a purchase's bonus draws to the ledger.
pub struct ApplyPurchaseBonusHandler {
    awards: Arc<dyn AwardRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ApplyPurchaseBonusHandler {
    pub fn new(awards: Arc<dyn AwardRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            awards,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApplyPurchaseBonusCommand,
    ) -> Result<ApplyPurchaseBonusResult, AwardError> {
        // 1. Plan against the current ledger
        let ledger = self.awards.find_by_user(&cmd.user_id).await?;
        let plan = crate::domain::award::calculate_purchase_bonus(&ledger, cmd.price);

        // 2. Execute each draw in plan order
        for draw in &plan.draws {
            let mut award = self
                .awards
                .find_by_id(&draw.award_id)
                .await?
                .ok_or(AwardError::NotFound(draw.award_id))?;

            let expected = award.used_value;
            let outcome = award.spend(draw.amount);
            if outcome.consumed != draw.amount {
                // The ledger moved between planning and execution
                return Err(AwardError::conflict(award.id));
            }

            self.awards
                .update_balance(&award, expected)
                .await
                .map_err(|err| match err.code {
                    ErrorCode::ConcurrentModification => AwardError::conflict(award.id),
                    ErrorCode::AwardNotFound => AwardError::not_found(award.id),
                    _ => err.into(),
                })?;

            let event = AwardSpent {
                event_id: EventId::new(),
                award_id: award.id,
                user_id: award.user_id.clone(),
                consumed: outcome.consumed,
                residual: outcome.residual,
                occurred_at: Timestamp::now(),
            };
            self.event_publisher.publish(event.to_envelope()).await?;
        }

        let remainder = cmd.price - plan.applied;
        Ok(ApplyPurchaseBonusResult { plan, remainder })
    }
}
