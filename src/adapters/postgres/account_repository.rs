//! PostgreSQL implementation of AccountRepository.
//!
//! The subscription snapshot is denormalized into nullable columns on the
//! account row; either all snapshot columns are set or none are.

use crate::domain::foundation::{
    DomainError, ErrorCode, SubscriptionId, Timestamp, UserId,
};
use crate::domain::subscription::{
    AccessStatus, MemberAccount, SubscriptionPlan, SubscriptionSnapshot,
};
use crate::ports::AccountRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the AccountRepository port.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member account.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    user_id: String,
    access_status: String,
    subscription_payment_failed: bool,
    subscription_id: Option<Uuid>,
    subscription_plan: Option<String>,
    subscription_purchased_at: Option<DateTime<Utc>>,
    subscription_expires_at: Option<DateTime<Utc>>,
    subscription_payment_method: Option<String>,
}

impl TryFrom<AccountRow> for MemberAccount {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let active_subscription = match (
            row.subscription_id,
            row.subscription_plan,
            row.subscription_purchased_at,
            row.subscription_expires_at,
            row.subscription_payment_method,
        ) {
            (Some(id), Some(plan), Some(purchased_at), Some(expires_at), Some(method)) => {
                Some(SubscriptionSnapshot {
                    id: SubscriptionId::from_uuid(id),
                    plan: parse_plan(&plan)?,
                    purchased_at: Timestamp::from_datetime(purchased_at),
                    expires_at: Timestamp::from_datetime(expires_at),
                    payment_method: method,
                })
            }
            (None, None, None, None, None) => None,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!(
                        "Partial subscription snapshot on account {}",
                        row.user_id
                    ),
                ))
            }
        };

        Ok(MemberAccount {
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            access_status: parse_access_status(&row.access_status)?,
            active_subscription,
            subscription_payment_failed: row.subscription_payment_failed,
        })
    }
}

fn parse_access_status(s: &str) -> Result<AccessStatus, DomainError> {
    match s {
        "none" => Ok(AccessStatus::None),
        "pending" => Ok(AccessStatus::Pending),
        "active" => Ok(AccessStatus::Active),
        "expired" => Ok(AccessStatus::Expired),
        "failed" => Ok(AccessStatus::Failed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid access status: {}", s),
        )),
    }
}

fn access_status_to_string(status: AccessStatus) -> &'static str {
    match status {
        AccessStatus::None => "none",
        AccessStatus::Pending => "pending",
        AccessStatus::Active => "active",
        AccessStatus::Expired => "expired",
        AccessStatus::Failed => "failed",
    }
}

fn parse_plan(s: &str) -> Result<SubscriptionPlan, DomainError> {
    match s {
        "monthly" => Ok(SubscriptionPlan::Monthly),
        "seasonal" => Ok(SubscriptionPlan::Seasonal),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid subscription plan: {}", s),
        )),
    }
}

fn plan_to_string(plan: SubscriptionPlan) -> &'static str {
    match plan {
        SubscriptionPlan::Monthly => "monthly",
        SubscriptionPlan::Seasonal => "seasonal",
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Database error: {}", e))
}

const SELECT_COLUMNS: &str = r#"
    user_id, access_status, subscription_payment_failed,
    subscription_id, subscription_plan, subscription_purchased_at,
    subscription_expires_at, subscription_payment_method
"#;

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MemberAccount>, DomainError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_accounts WHERE user_id = $1",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(MemberAccount::try_from).transpose()
    }

    async fn update(&self, account: &MemberAccount) -> Result<(), DomainError> {
        let snapshot = account.active_subscription.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE member_accounts SET
                access_status = $2,
                subscription_payment_failed = $3,
                subscription_id = $4,
                subscription_plan = $5,
                subscription_purchased_at = $6,
                subscription_expires_at = $7,
                subscription_payment_method = $8
            WHERE user_id = $1
            "#,
        )
        .bind(account.user_id.as_str())
        .bind(access_status_to_string(account.access_status))
        .bind(account.subscription_payment_failed)
        .bind(snapshot.map(|s| *s.id.as_uuid()))
        .bind(snapshot.map(|s| plan_to_string(s.plan)))
        .bind(snapshot.map(|s| *s.purchased_at.as_datetime()))
        .bind(snapshot.map(|s| *s.expires_at.as_datetime()))
        .bind(snapshot.map(|s| s.payment_method.clone()))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AccountNotFound,
                format!("Account not found: {}", account.user_id),
            ));
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MemberAccount>, DomainError> {
        let rows: Vec<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_accounts ORDER BY user_id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(MemberAccount::try_from).collect()
    }
}
