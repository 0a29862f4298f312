//! SpendAwardHandler - Command handler for drawing bonus value from an award.

use std::sync::Arc;

use crate::domain::award::{AwardError, AwardSpent, SpendOutcome};
use crate::domain::foundation::{
    AwardId, Cents, ErrorCode, EventId, SerializableDomainEvent, Timestamp,
};
use crate::ports::{AwardRepository, EventPublisher};

/// Command to consume up to `amount` from an award's residual.
#[derive(Debug, Clone)]
pub struct SpendAwardCommand {
    pub award_id: AwardId,
    pub amount: Cents,
}

/// Result of a spend: the balance fields after clamping.
#[derive(Debug, Clone)]
pub struct SpendAwardResult {
    pub outcome: SpendOutcome,
}

/// Handler for spending from an award.
///
/// Over-spend is truncated, never rejected: a request larger than the
/// residual consumes exactly the residual. The write is conditional on the
/// `used_value` observed at read time, so a lost race surfaces as
/// `Conflict` rather than a silently clobbered balance.
pub struct SpendAwardHandler {
    awards: Arc<dyn AwardRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SpendAwardHandler {
    pub fn new(awards: Arc<dyn AwardRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            awards,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: SpendAwardCommand) -> Result<SpendAwardResult, AwardError> {
        // 1. Load the award
        let mut award = self
            .awards
            .find_by_id(&cmd.award_id)
            .await?
            .ok_or(AwardError::NotFound(cmd.award_id))?;

        // 2. Only spendable awards participate in purchases
        if !award.is_spendable() {
            return Err(AwardError::not_spendable(award.name));
        }

        // 3. Apply the clamped spend
        let expected = award.used_value;
        let outcome = award.spend(cmd.amount);

        // 4. Conditional write keyed on the observed used_value
        self.awards
            .update_balance(&award, expected)
            .await
            .map_err(|err| match err.code {
                ErrorCode::ConcurrentModification => AwardError::conflict(award.id),
                ErrorCode::AwardNotFound => AwardError::not_found(award.id),
                _ => err.into(),
            })?;

        // 5. Publish event (skipped for a zero-consumption no-op)
        if !outcome.consumed.is_zero() {
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

        Ok(SpendAwardResult { outcome })
    }
}
