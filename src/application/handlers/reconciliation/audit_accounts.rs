//! AuditAccountsHandler - Query handler sweeping all accounts for drift.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::{diagnose, AccessStatus, AuditFinding, SubscriptionError};
use crate::ports::{AccountRepository, PaymentRepository};

/// A per-account failure recorded during the sweep.
///
/// Sweep failures never abort the audit; the admin tool renders these as
/// error rows next to the findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditError {
    pub user_id: UserId,
    pub message: String,
}

/// Outcome of a full audit sweep.
#[derive(Debug, Clone)]
pub struct AuditAccountsResult {
    pub findings: Vec<AuditFinding>,
    pub errors: Vec<AuditError>,

    /// Accounts examined, including clean ones.
    pub scanned: usize,
}

/// Handler for the admin audit sweep.
pub struct AuditAccountsHandler {
    accounts: Arc<dyn AccountRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl AuditAccountsHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { accounts, payments }
    }

    pub async fn handle(&self) -> Result<AuditAccountsResult, SubscriptionError> {
        let all = self.accounts.list_all().await?;
        let now = Timestamp::now();

        let mut findings = Vec::new();
        let mut errors = Vec::new();
        let scanned = all.len();

        for account in all {
            // The payment query is only needed for Pending accounts.
            let has_pending = if account.access_status == AccessStatus::Pending {
                match self.payments.find_pending_subscription(&account.user_id).await {
                    Ok(pending) => !pending.is_empty(),
                    Err(err) => {
                        warn!(
                            user_id = %account.user_id,
                            error = %err,
                            "skipping account during audit sweep"
                        );
                        errors.push(AuditError {
                            user_id: account.user_id.clone(),
                            message: err.to_string(),
                        });
                        continue;
                    }
                }
            } else {
                false
            };

            if let Some(discrepancy) = diagnose(&account, has_pending, now) {
                findings.push(AuditFinding {
                    user_id: account.user_id.clone(),
                    discrepancy,
                });
            }
        }

        Ok(AuditAccountsResult {
            findings,
            errors,
            scanned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::reconciliation::testing::{
        MockAccountRepository, MockPaymentRepository,
    };
    use crate::domain::foundation::{Cents, PaymentId, SubscriptionId};
    use crate::domain::subscription::{
        Discrepancy, MemberAccount, Payment, PaymentKind, SubscriptionPlan, SubscriptionSnapshot,
    };

    fn user(n: u32) -> UserId {
        UserId::new(format!("user-{}", n)).unwrap()
    }

    fn account(n: u32, status: AccessStatus) -> MemberAccount {
        let mut account = MemberAccount::new(user(n));
        account.access_status = status;
        account
    }

    fn pending_payment(n: u32) -> Payment {
        Payment::initiate(
            PaymentId::new(),
            user(n),
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
            SubscriptionPlan::Monthly,
            Timestamp::now(),
            "card",
        )
    }

    #[tokio::test]
    async fn flags_pending_account_with_no_pending_payment() {
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![account(
            1,
            AccessStatus::Pending,
        )]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let handler = AuditAccountsHandler::new(accounts, payments);

        let result = handler.handle().await.unwrap();

        assert_eq!(result.scanned, 1);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].user_id, user(1));
        assert_eq!(result.findings[0].discrepancy, Discrepancy::PhantomPending);
    }

    #[tokio::test]
    async fn pending_account_with_matching_payment_is_clean() {
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![account(
            1,
            AccessStatus::Pending,
        )]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![pending_payment(1)]));
        let handler = AuditAccountsHandler::new(accounts, payments);

        let result = handler.handle().await.unwrap();
        assert!(result.findings.is_empty());
    }

    #[tokio::test]
    async fn flags_valid_subscription_with_non_active_status() {
        let mut drifted = account(2, AccessStatus::Expired);
        drifted.active_subscription = Some(valid_snapshot());

        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![drifted]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let handler = AuditAccountsHandler::new(accounts, payments);

        let result = handler.handle().await.unwrap();
        assert_eq!(result.findings.len(), 1);
        assert_eq!(
            result.findings[0].discrepancy,
            Discrepancy::InconsistentActive
        );
    }

    #[tokio::test]
    async fn clean_accounts_produce_no_findings() {
        let mut active = account(1, AccessStatus::Active);
        active.active_subscription = Some(valid_snapshot());
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![
            active,
            account(2, AccessStatus::None),
            account(3, AccessStatus::Expired),
        ]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let handler = AuditAccountsHandler::new(accounts, payments);

        let result = handler.handle().await.unwrap();
        assert_eq!(result.scanned, 3);
        assert!(result.findings.is_empty());
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn sweep_continues_past_failing_accounts() {
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![
            account(1, AccessStatus::Pending),
            account(2, AccessStatus::Pending),
        ]));
        // User 1's payment query fails; user 2 should still be flagged.
        let payments = Arc::new(MockPaymentRepository::poisoning(vec![], vec![user(1)]));
        let handler = AuditAccountsHandler::new(accounts, payments);

        let result = handler.handle().await.unwrap();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].user_id, user(1));
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].user_id, user(2));
    }

    #[tokio::test]
    async fn mixed_sweep_reports_both_classes() {
        let mut inconsistent = account(2, AccessStatus::Failed);
        inconsistent.active_subscription = Some(valid_snapshot());
        let accounts = Arc::new(MockAccountRepository::with_accounts(vec![
            account(1, AccessStatus::Pending),
            inconsistent,
        ]));
        let payments = Arc::new(MockPaymentRepository::with_payments(vec![]));
        let handler = AuditAccountsHandler::new(accounts, payments);

        let result = handler.handle().await.unwrap();

        assert_eq!(result.findings.len(), 2);
        let kinds: Vec<Discrepancy> = result.findings.iter().map(|f| f.discrepancy).collect();
        assert!(kinds.contains(&Discrepancy::PhantomPending));
        assert!(kinds.contains(&Discrepancy::InconsistentActive));
    }
}
