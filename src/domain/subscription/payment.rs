//! Payment records.
//!
//! A payment is created Pending when a purchase is initiated and settles
//! exactly once into Completed, Cancelled, or Failed. Terminal states are
//! never reopened. The optional award fields link a payment to the bonus
//! value it drew from, so a later cancellation can refund the right awards.

use crate::domain::foundation::{
    AwardId, Cents, DomainError, ErrorCode, PaymentId, StateMachine, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

/// What a payment was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Subscription,
    Other,
}

/// Settlement status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment initiated, outcome unknown. The only non-terminal state.
    Pending,
    Completed,
    Cancelled,
    Failed,
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Pending, Completed) | (Pending, Cancelled) | (Pending, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Completed, Cancelled, Failed],
            Completed | Cancelled | Failed => vec![],
        }
    }
}

/// A payment record under a user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub kind: PaymentKind,
    pub status: PaymentStatus,
    pub amount: Cents,
    pub payment_method: String,
    pub description: String,
    pub created_at: Timestamp,

    /// Set when the payment is cancelled.
    pub cancelled_at: Option<Timestamp>,

    /// Who cancelled the payment (admin id or "reconciler").
    pub cancelled_by: Option<String>,

    /// Awards the purchase drew bonus value from, in spend order.
    pub award_ids: Vec<AwardId>,

    /// Total bonus value applied to this payment.
    pub bonus_used: Option<Cents>,
}

impl Payment {
    /// Creates a new pending payment.
    #[allow(clippy::too_many_arguments)]
    pub fn initiate(
        id: PaymentId,
        user_id: UserId,
        kind: PaymentKind,
        amount: Cents,
        payment_method: impl Into<String>,
        description: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            status: PaymentStatus::Pending,
            amount,
            payment_method: payment_method.into(),
            description: description.into(),
            created_at,
            cancelled_at: None,
            cancelled_by: None,
            award_ids: Vec::new(),
            bonus_used: None,
        }
    }

    /// Records the bonus draws applied to this purchase.
    pub fn with_bonus(mut self, award_ids: Vec<AwardId>, bonus_used: Cents) -> Self {
        self.award_ids = award_ids;
        self.bonus_used = Some(bonus_used);
        self
    }

    /// Marks the payment as completed.
    ///
    /// # Errors
    ///
    /// Returns `PaymentAlreadySettled` if the payment is not pending.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Completed)
    }

    /// Cancels the payment, recording who did it.
    ///
    /// # Errors
    ///
    /// Returns `PaymentAlreadySettled` if the payment is not pending.
    pub fn cancel(&mut self, by: impl Into<String>, at: Timestamp) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Cancelled)?;
        self.cancelled_at = Some(at);
        self.cancelled_by = Some(by.into());
        Ok(())
    }

    /// Marks the payment as failed.
    ///
    /// # Errors
    ///
    /// Returns `PaymentAlreadySettled` if the payment is not pending.
    pub fn fail(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Failed)
    }

    /// True if the payment is still awaiting settlement.
    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    fn transition_to(&mut self, target: PaymentStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::PaymentAlreadySettled,
                format!(
                    "Payment {} already settled as {:?}; cannot move to {:?}",
                    self.id, self.status, target
                ),
            )
        })?;
        Ok(())
    }
}
