//! Hand-rolled port mocks shared by the reconciliation handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, PaymentId, UserId};
use crate::domain::subscription::{MemberAccount, Payment, PaymentKind, PaymentStatus};
use crate::ports::{AccountRepository, EventPublisher, PaymentRepository};

pub struct MockAccountRepository {
    accounts: Mutex<Vec<MemberAccount>>,
    /// Users whose reads fail, to exercise sweep continuation.
    poisoned: Vec<UserId>,
    fail_update: bool,
}

impl MockAccountRepository {
    pub fn with_accounts(accounts: Vec<MemberAccount>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            poisoned: Vec::new(),
            fail_update: false,
        }
    }

    pub fn poisoning(accounts: Vec<MemberAccount>, poisoned: Vec<UserId>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            poisoned,
            fail_update: false,
        }
    }

    pub fn failing_updates(accounts: Vec<MemberAccount>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            poisoned: Vec::new(),
            fail_update: true,
        }
    }

    pub fn get(&self, user_id: &UserId) -> Option<MemberAccount> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.user_id == user_id)
            .cloned()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MemberAccount>, DomainError> {
        if self.poisoned.contains(user_id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated account read failure",
            ));
        }
        Ok(self.get(user_id))
    }

    async fn update(&self, account: &MemberAccount) -> Result<(), DomainError> {
        if self.fail_update {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated account write failure",
            ));
        }
        let mut accounts = self.accounts.lock().unwrap();
        let stored = accounts
            .iter_mut()
            .find(|a| a.user_id == account.user_id)
            .ok_or_else(|| DomainError::new(ErrorCode::AccountNotFound, "Account not found"))?;
        *stored = account.clone();
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MemberAccount>, DomainError> {
        Ok(self.accounts.lock().unwrap().clone())
    }
}

pub struct MockPaymentRepository {
    payments: Mutex<Vec<Payment>>,
    /// Users whose payment queries fail.
    poisoned: Vec<UserId>,
}

impl MockPaymentRepository {
    pub fn with_payments(payments: Vec<Payment>) -> Self {
        Self {
            payments: Mutex::new(payments),
            poisoned: Vec::new(),
        }
    }

    pub fn poisoning(payments: Vec<Payment>, poisoned: Vec<UserId>) -> Self {
        Self {
            payments: Mutex::new(payments),
            poisoned,
        }
    }

    pub fn get(&self, id: &PaymentId) -> Option<Payment> {
        self.payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        self.payments.lock().unwrap().push(payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_pending_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Payment>, DomainError> {
        if self.poisoned.contains(user_id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated payment query failure",
            ));
        }
        Ok(self
            .payments
            .lock()
            .unwrap()
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
        let mut payments = self.payments.lock().unwrap();
        let stored = payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or_else(|| DomainError::new(ErrorCode::PaymentNotFound, "Payment not found"))?;
        *stored = payment.clone();
        Ok(())
    }
}

pub struct MockEventPublisher {
    published_events: Mutex<Vec<EventEnvelope>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
        }
    }

    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published_events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published_events.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        self.published_events.lock().unwrap().extend(events);
        Ok(())
    }
}
