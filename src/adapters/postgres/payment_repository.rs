//! PostgreSQL implementation of PaymentRepository.

use crate::domain::foundation::{
    AwardId, Cents, DomainError, ErrorCode, PaymentId, Timestamp, UserId,
};
use crate::domain::subscription::{Payment, PaymentKind, PaymentStatus};
use crate::ports::PaymentRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a payment.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: String,
    kind: String,
    status: String,
    amount: i64,
    payment_method: String,
    description: String,
    created_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
    cancelled_by: Option<String>,
    award_ids: Vec<Uuid>,
    bonus_used: Option<i64>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            kind: parse_kind(&row.kind)?,
            status: parse_status(&row.status)?,
            amount: Cents::new(row.amount),
            payment_method: row.payment_method,
            description: row.description,
            created_at: Timestamp::from_datetime(row.created_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
            cancelled_by: row.cancelled_by,
            award_ids: row.award_ids.into_iter().map(AwardId::from_uuid).collect(),
            bonus_used: row.bonus_used.map(Cents::new),
        })
    }
}

fn parse_kind(s: &str) -> Result<PaymentKind, DomainError> {
    match s {
        "subscription" => Ok(PaymentKind::Subscription),
        "other" => Ok(PaymentKind::Other),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment kind: {}", s),
        )),
    }
}

fn kind_to_string(kind: PaymentKind) -> &'static str {
    match kind {
        PaymentKind::Subscription => "subscription",
        PaymentKind::Other => "other",
    }
}

fn parse_status(s: &str) -> Result<PaymentStatus, DomainError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "completed" => Ok(PaymentStatus::Completed),
        "cancelled" => Ok(PaymentStatus::Cancelled),
        "failed" => Ok(PaymentStatus::Failed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment status: {}", s),
        )),
    }
}

fn status_to_string(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Completed => "completed",
        PaymentStatus::Cancelled => "cancelled",
        PaymentStatus::Failed => "failed",
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Database error: {}", e))
}

const SELECT_COLUMNS: &str = r#"
    id, user_id, kind, status, amount, payment_method, description,
    created_at, cancelled_at, cancelled_by, award_ids, bonus_used
"#;

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, kind, status, amount, payment_method, description,
                created_at, cancelled_at, cancelled_by, award_ids, bonus_used
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.user_id.as_str())
        .bind(kind_to_string(payment.kind))
        .bind(status_to_string(payment.status))
        .bind(payment.amount.value())
        .bind(&payment.payment_method)
        .bind(&payment.description)
        .bind(payment.created_at.as_datetime())
        .bind(payment.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .bind(payment.cancelled_by.as_deref())
        .bind(
            payment
                .award_ids
                .iter()
                .map(|id| *id.as_uuid())
                .collect::<Vec<Uuid>>(),
        )
        .bind(payment.bonus_used.map(|c| c.value()))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Payment::try_from).transpose()
    }

    async fn find_pending_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM payments
            WHERE user_id = $1 AND kind = 'subscription' AND status = 'pending'
            ORDER BY created_at, id
            "#,
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                status = $2,
                cancelled_at = $3,
                cancelled_by = $4,
                award_ids = $5,
                bonus_used = $6
            WHERE id = $1
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(status_to_string(payment.status))
        .bind(payment.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .bind(payment.cancelled_by.as_deref())
        .bind(
            payment
                .award_ids
                .iter()
                .map(|id| *id.as_uuid())
                .collect::<Vec<Uuid>>(),
        )
        .bind(payment.bonus_used.map(|c| c.value()))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                format!("Payment not found: {}", payment.id),
            ));
        }

        Ok(())
    }
}
