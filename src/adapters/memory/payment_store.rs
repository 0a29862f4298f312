//! In-memory payment store.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, UserId};
use crate::domain::subscription::{Payment, PaymentKind, PaymentStatus};
use crate::ports::PaymentRepository;

/// In-memory implementation of the payment repository.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned; acceptable for test code.
pub struct InMemoryPaymentStore {
    payments: RwLock<Vec<Payment>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self {
            payments: RwLock::new(Vec::new()),
        }
    }

    pub fn get(&self, id: &PaymentId) -> Option<Payment> {
        self.payments
            .read()
            .expect("InMemoryPaymentStore: lock poisoned")
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Payment> {
        self.payments
            .read()
            .expect("InMemoryPaymentStore: lock poisoned")
            .clone()
    }
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentStore {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        self.payments
            .write()
            .expect("InMemoryPaymentStore: lock poisoned")
            .push(payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_pending_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Payment>, DomainError> {
        Ok(self
            .payments
            .read()
            .expect("InMemoryPaymentStore: lock poisoned")
            .iter()
            .filter(|p| {
                &p.user_id == user_id
                    && p.kind == PaymentKind::Subscription
                    && p.status == PaymentStatus::Pending
            })
            .cloned()
            .collect())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self
            .payments
            .write()
            .expect("InMemoryPaymentStore: lock poisoned");
        let stored = payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::PaymentNotFound,
                    format!("Payment not found: {}", payment.id),
                )
            })?;
        *stored = payment.clone();
        Ok(())
    }
}
