//! RepairAccountHandler - Command handler realigning one account's cached status.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{
    EventId, PaymentId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::domain::subscription::{
    apply_repair, AccountRepaired, Discrepancy, SubscriptionError,
};
use crate::ports::{AccountRepository, EventPublisher, PaymentRepository};

/// Command to repair one audited account.
#[derive(Debug, Clone)]
pub struct RepairAccountCommand {
    pub user_id: UserId,
    pub discrepancy: Discrepancy,

    /// Recorded as the canceller on any stale payments.
    pub repaired_by: String,
}

/// Result of a repair.
#[derive(Debug, Clone)]
pub struct RepairAccountResult {
    /// False when the account was already consistent; nothing was written.
    pub changed: bool,

    /// Stale pending subscription payments cancelled alongside the status
    /// reset (phantom-pending repairs only; usually empty).
    pub cancelled_payments: Vec<PaymentId>,
}

/// Handler for repairing a single account.
///
/// A phantom-pending repair is one logical unit: the status reset, the
/// payment-failed flag clear, and the cancellation of any stale pending
/// subscription payments happen together. Repair never fabricates a
/// subscription snapshot and never touches an existing one.
pub struct RepairAccountHandler {
    accounts: Arc<dyn AccountRepository>,
    payments: Arc<dyn PaymentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RepairAccountHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        payments: Arc<dyn PaymentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            accounts,
            payments,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: RepairAccountCommand) -> Result<RepairAccountResult, SubscriptionError> {
        // 1. Load the account
        let mut account = self
            .accounts
            .find_by_user_id(&cmd.user_id)
            .await?
            .ok_or_else(|| SubscriptionError::account_not_found(cmd.user_id.clone()))?;

        // 2. Apply the in-memory repair
        let outcome = apply_repair(&mut account, cmd.discrepancy);

        // 3. Phantom-pending repairs also cancel stale pending payments
        let mut cancelled_payments = Vec::new();
        if cmd.discrepancy == Discrepancy::PhantomPending {
            let now = Timestamp::now();
            for mut payment in self.payments.find_pending_subscription(&cmd.user_id).await? {
                payment
                    .cancel(cmd.repaired_by.clone(), now)
                    .map_err(SubscriptionError::from)?;
                self.payments.update(&payment).await?;
                cancelled_payments.push(payment.id);
            }
        }

        // 4. Re-running repair on a consistent account is a no-op
        if !outcome.changed && cancelled_payments.is_empty() {
            return Ok(RepairAccountResult {
                changed: false,
                cancelled_payments,
            });
        }

        self.accounts.update(&account).await?;

        info!(
            user_id = %cmd.user_id,
            discrepancy = %outcome.discrepancy,
            from = %outcome.previous_status,
            to = %outcome.new_status,
            cancelled = cancelled_payments.len(),
            "repaired account"
        );

        // 5. Publish event
        let event = AccountRepaired {
            event_id: EventId::new(),
            user_id: cmd.user_id,
            discrepancy: outcome.discrepancy,
            previous_status: outcome.previous_status,
            new_status: outcome.new_status,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(RepairAccountResult {
            changed: true,
            cancelled_payments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::reconciliation::testing::{
        MockAccountRepository, MockEventPublisher, MockPaymentRepository,
    };
    use crate::domain::foundation::{Cents, SubscriptionId};
    use crate::domain::subscription::{
        AccessStatus, MemberAccount, Payment, PaymentKind, PaymentStatus, SubscriptionPlan,
        SubscriptionSnapshot,
    };

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn account(status: AccessStatus) -> MemberAccount {
        let mut account = MemberAccount::new(user());
        account.access_status = status;
        account
    }

    fn pending_payment() -> Payment {
        Payment::initiate(
            PaymentId::new(),
            user(),
            PaymentKind::Subscription,
            Cents::new(3000),
            "card",
            "Abbonamento mensile",
            Timestamp::now(),
        )
    }

    fn valid_snapshot() -> SubscriptionSnapshot {
        SubscriptionSnapshot::new(
            SubscriptionId::new(),
            SubscriptionPlan::Seasonal,
            Timestamp::now(),
            "card",
        )
    }

    fn cmd(discrepancy: Discrepancy) -> RepairAccountCommand {
        RepairAccountCommand {
            user_id: user(),
            discrepancy,
            repaired_by: "admin-7".to_string(),
        }
    }

    #[tokio::test]
    async fn phantom_repair_expires_status_and_clears_flag() {
        let mut drifted = account(AccessStatus::Pending);
        drifted.subscription_payment_failed = true;
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![drifted]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts.clone(), payments, publisher);

        let result = handler.handle(cmd(Discrepancy::PhantomPending)).await.unwrap();

        assert!(result.changed);
        let repaired = accounts.get(&user()).unwrap();
        assert_eq!(repaired.access_status, AccessStatus::Expired);
        assert!(!repaired.subscription_payment_failed);
    }

    #[tokio::test]
    async fn phantom_repair_cancels_stale_pending_payments() {
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![account(
            AccessStatus::Pending,
        )]));
        let stale = pending_payment();
        let stale_id = stale.id;
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![stale]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts, payments.clone(), publisher);

        let result = handler.handle(cmd(Discrepancy::PhantomPending)).await.unwrap();

        assert_eq!(result.cancelled_payments, vec![stale_id]);
        let cancelled = payments.get(&stale_id).unwrap();
        assert_eq!(cancelled.status, PaymentStatus::Cancelled);
        assert_eq!(cancelled.cancelled_by.as_deref(), Some("admin-7"));
    }

    #[tokio::test]
    async fn phantom_repair_leaves_snapshot_untouched() {
        let mut drifted = account(AccessStatus::Pending);
        drifted.active_subscription = Some(valid_snapshot());
        let snapshot = drifted.active_subscription.clone();
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![drifted]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts.clone(), payments, publisher);

        handler.handle(cmd(Discrepancy::PhantomPending)).await.unwrap();

        assert_eq!(accounts.get(&user()).unwrap().active_subscription, snapshot);
    }

    #[tokio::test]
    async fn inconsistent_repair_activates_status_only() {
        let mut drifted = account(AccessStatus::Expired);
        drifted.active_subscription = Some(valid_snapshot());
        let snapshot = drifted.active_subscription.clone();
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![drifted]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts.clone(), payments, publisher);

        let result = handler
            .handle(cmd(Discrepancy::InconsistentActive))
            .await
            .unwrap();

        assert!(result.changed);
        assert!(result.cancelled_payments.is_empty());
        let repaired = accounts.get(&user()).unwrap();
        assert_eq!(repaired.access_status, AccessStatus::Active);
        assert_eq!(repaired.active_subscription, snapshot);
    }

    #[tokio::test]
    async fn repair_is_idempotent() {
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![account(
            AccessStatus::Pending,
        )]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts.clone(), payments, publisher.clone());

        let first = handler.handle(cmd(Discrepancy::PhantomPending)).await.unwrap();
        let state_after_first = accounts.get(&user()).unwrap();
        let second = handler.handle(cmd(Discrepancy::PhantomPending)).await.unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(accounts.get(&user()).unwrap(), state_after_first);
        // Only the first repair publishes.
        assert_eq!(publisher.published_events().len(), 1);
    }

    #[tokio::test]
    async fn publishes_repaired_event() {
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![account(
            AccessStatus::Pending,
        )]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts, payments, publisher.clone());

        handler.handle(cmd(Discrepancy::PhantomPending)).await.unwrap();

        let events = publisher.published_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "account.repaired.v1");
        assert_eq!(events[0].payload["previous_status"], "pending");
        assert_eq!(events[0].payload["new_status"], "expired");
    }

    #[tokio::test]
    async fn missing_account_is_an_error() {
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts, payments, publisher);

        let result = handler.handle(cmd(Discrepancy::PhantomPending)).await;
        assert!(matches!(result, Err(SubscriptionError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn read_failure_surfaces_as_infrastructure() {
        let accounts = Arc::new(MockAccountRepository::poisoning(
            vec![account(AccessStatus::Pending)],
            vec![user()],
        ));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts, payments, publisher.clone());

        let result = handler.handle(cmd(Discrepancy::PhantomPending)).await;

        assert!(matches!(result, Err(SubscriptionError::Infrastructure(_))));
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn update_failure_surfaces_as_infrastructure() {
        let accounts = Arc::new(MockAccountRepository::failing_updates(vec![account(
            AccessStatus::Pending,
        )]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = RepairAccountHandler::new(accounts, payments, publisher.clone());

        let result = handler.handle(cmd(Discrepancy::PhantomPending)).await;

        assert!(matches!(result, Err(SubscriptionError::Infrastructure(_))));
        assert!(publisher.published_events().is_empty());
    }
}
