//! ReleasePurchaseBonusHandler - Command handler undoing a purchase's bonus.
//!
//! The inverse of applying a bonus: when a payment that drew bonus value is
//! cancelled or fails, the drawn value goes back to the awards it came
//! from, last draw first. The payment record carries the draw order and the
//! total in its `award_ids`/`bonus_used` fields.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::award::{AwardError, AwardRefunded};
use crate::domain::foundation::{
    Cents, ErrorCode, EventId, PaymentId, SerializableDomainEvent, Timestamp,
};
use crate::domain::subscription::Payment;
use crate::ports::{AwardRepository, EventPublisher, PaymentRepository};

/// Command to cancel a payment and restore the bonus it drew.
#[derive(Debug, Clone)]
pub struct ReleasePurchaseBonusCommand {
    pub payment_id: PaymentId,

    /// Who triggered the release (admin id or "reconciler").
    pub cancelled_by: String,
}

/// Result of a release.
#[derive(Debug, Clone)]
pub struct ReleasePurchaseBonusResult {
    pub payment: Payment,

    /// Bonus value actually restored.
    pub refunded: Cents,

    /// Portion of the recorded bonus that could not be restored.
    pub shortfall: Cents,
}

/// Handler releasing a cancelled purchase's bonus draws.
pub struct ReleasePurchaseBonusHandler {
    payments: Arc<dyn PaymentRepository>,
    awards: Arc<dyn AwardRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ReleasePurchaseBonusHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        awards: Arc<dyn AwardRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            payments,
            awards,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReleasePurchaseBonusCommand,
    ) -> Result<ReleasePurchaseBonusResult, AwardError> {
        // 1. Load and cancel the payment
        let mut payment = self
            .payments
            .find_by_id(&cmd.payment_id)
            .await?
            .ok_or_else(|| {
                AwardError::validation("payment_id", format!("Payment {} not found", cmd.payment_id))
            })?;

        payment
            .cancel(cmd.cancelled_by, Timestamp::now())
            .map_err(|err| AwardError::validation("status", err.to_string()))?;
        self.payments.update(&payment).await?;

        // 2. Walk the draw list in reverse, restoring up to bonus_used
        let mut remaining = payment.bonus_used.unwrap_or(Cents::ZERO);
        let requested = remaining;
        let mut refunded = Cents::ZERO;

        for award_id in payment.award_ids.iter().rev() {
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
        }

        if !remaining.is_zero() {
            warn!(
                payment_id = %payment.id,
                requested = %requested,
                refunded = %refunded,
                shortfall = %remaining,
                "bonus release could not restore the full recorded amount"
            );
        } else if !refunded.is_zero() {
            info!(payment_id = %payment.id, refunded = %refunded, "released purchase bonus");
        }

        Ok(ReleasePurchaseBonusResult {
            payment,
            refunded,
            shortfall: remaining,
        })
    }
}
