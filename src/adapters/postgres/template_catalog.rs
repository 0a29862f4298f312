//! PostgreSQL implementation of TemplateCatalog.

use crate::domain::award::AwardTemplate;
use crate::domain::foundation::{Cents, DomainError, ErrorCode, TemplateId};
use crate::ports::TemplateCatalog;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the TemplateCatalog port.
pub struct PostgresTemplateCatalog {
    pool: PgPool,
}

impl PostgresTemplateCatalog {
    /// Creates a new catalog with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TemplateRow {
    id: Uuid,
    name: String,
    base_value: i64,
}

impl From<TemplateRow> for AwardTemplate {
    fn from(row: TemplateRow) -> Self {
        AwardTemplate {
            id: TemplateId::from_uuid(row.id),
            name: row.name,
            base_value: Cents::new(row.base_value),
        }
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Database error: {}", e))
}

#[async_trait]
impl TemplateCatalog for PostgresTemplateCatalog {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<AwardTemplate>, DomainError> {
        let row: Option<TemplateRow> =
            sqlx::query_as("SELECT id, name, base_value FROM award_templates WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(AwardTemplate::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<AwardTemplate>, DomainError> {
        let row: Option<TemplateRow> =
            sqlx::query_as("SELECT id, name, base_value FROM award_templates WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(AwardTemplate::from))
    }

    async fn list(&self) -> Result<Vec<AwardTemplate>, DomainError> {
        let rows: Vec<TemplateRow> =
            sqlx::query_as("SELECT id, name, base_value FROM award_templates ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(rows.into_iter().map(AwardTemplate::from).collect())
    }
}
