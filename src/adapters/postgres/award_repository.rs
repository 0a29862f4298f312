//! PostgreSQL implementation of AwardRepository.
//!
//! Balance writes are conditional updates keyed on the previously observed
//! `used_value`; a zero-row update is disambiguated into missing-award or
//! lost-race.

use crate::domain::award::AwardRecord;
use crate::domain::foundation::{
    AwardId, Cents, DomainError, ErrorCode, TemplateId, Timestamp, UserId,
};
use crate::ports::AwardRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the AwardRepository port.
pub struct PostgresAwardRepository {
    pool: PgPool,
}

impl PostgresAwardRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn award_exists(&self, id: &AwardId) -> Result<bool, DomainError> {
        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM user_awards WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(found.is_some())
    }
}

/// Database row representation of a user-held award.
#[derive(Debug, sqlx::FromRow)]
struct AwardRow {
    id: Uuid,
    user_id: String,
    template_id: Uuid,
    name: String,
    value: i64,
    used_value: i64,
    residual: i64,
    used: bool,
    assigned_at: DateTime<Utc>,
}

impl TryFrom<AwardRow> for AwardRecord {
    type Error = DomainError;

    fn try_from(row: AwardRow) -> Result<Self, Self::Error> {
        Ok(AwardRecord {
            id: AwardId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            template_id: TemplateId::from_uuid(row.template_id),
            name: row.name,
            value: Cents::new(row.value),
            used_value: Cents::new(row.used_value),
            residual: Cents::new(row.residual),
            used: row.used,
            assigned_at: Timestamp::from_datetime(row.assigned_at),
        })
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Database error: {}", e))
}

#[async_trait]
impl AwardRepository for PostgresAwardRepository {
    async fn save(&self, award: &AwardRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_awards (
                id, user_id, template_id, name, value, used_value, residual, used, assigned_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(award.id.as_uuid())
        .bind(award.user_id.as_str())
        .bind(award.template_id.as_uuid())
        .bind(&award.name)
        .bind(award.value.value())
        .bind(award.used_value.value())
        .bind(award.residual.value())
        .bind(award.used)
        .bind(award.assigned_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                let constraint = db_err.constraint();
                if constraint == Some("user_awards_user_id_template_id_key")
                    || constraint == Some("user_awards_user_id_name_key")
                {
                    return DomainError::new(
                        ErrorCode::DuplicateAward,
                        format!("User {} already holds '{}'", award.user_id, award.name),
                    );
                }
            }
            db_error(e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AwardId) -> Result<Option<AwardRecord>, DomainError> {
        let row: Option<AwardRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, template_id, name, value, used_value, residual, used, assigned_at
            FROM user_awards WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(AwardRecord::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<AwardRecord>, DomainError> {
        let rows: Vec<AwardRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, template_id, name, value, used_value, residual, used, assigned_at
            FROM user_awards WHERE user_id = $1
            ORDER BY assigned_at, id
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(AwardRecord::try_from).collect()
    }

    async fn find_by_name(
        &self,
        user_id: &UserId,
        name: &str,
    ) -> Result<Option<AwardRecord>, DomainError> {
        let row: Option<AwardRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, template_id, name, value, used_value, residual, used, assigned_at
            FROM user_awards WHERE user_id = $1 AND name = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(AwardRecord::try_from).transpose()
    }

    async fn update_balance(
        &self,
        award: &AwardRecord,
        expected_used_value: Cents,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE user_awards SET
                used_value = $3,
                residual = $4,
                used = $5
            WHERE id = $1 AND used_value = $2
            "#,
        )
        .bind(award.id.as_uuid())
        .bind(expected_used_value.value())
        .bind(award.used_value.value())
        .bind(award.residual.value())
        .bind(award.used)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            // Either the award is gone or another writer moved the balance.
            if self.award_exists(&award.id).await? {
                return Err(DomainError::new(
                    ErrorCode::ConcurrentModification,
                    format!("Award {} balance changed concurrently", award.id),
                ));
            }
            return Err(DomainError::new(
                ErrorCode::AwardNotFound,
                format!("Award not found: {}", award.id),
            ));
        }

        Ok(())
    }

    async fn update_value(&self, award: &AwardRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE user_awards SET
                value = $2,
                residual = $3,
                used = $4
            WHERE id = $1
            "#,
        )
        .bind(award.id.as_uuid())
        .bind(award.value.value())
        .bind(award.residual.value())
        .bind(award.used)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AwardNotFound,
                format!("Award not found: {}", award.id),
            ));
        }

        Ok(())
    }

    async fn exists(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
    ) -> Result<bool, DomainError> {
        let found: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM user_awards WHERE user_id = $1 AND template_id = $2",
        )
        .bind(user_id.as_str())
        .bind(template_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(found.is_some())
    }
}
