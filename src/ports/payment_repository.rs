//! Payment repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PaymentId, UserId};
use crate::domain::subscription::Payment;

/// Repository port for payment records.
///
/// Payments live under their user document. Implementations must ensure:
/// - `update` never resurrects a settled payment; the status written is
///   whatever the domain transition produced
/// - `find_pending_subscription` matches kind Subscription, status Pending
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Save a new payment.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Find a payment by its id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    /// A user's pending subscription payments.
    ///
    /// The reconciler's phantom-pending check: a Pending account with an
    /// empty result here is drifted.
    async fn find_pending_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Payment>, DomainError>;

    /// Persist changes to an existing payment.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the payment doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;
}
