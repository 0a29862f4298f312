//! Award template catalog port.
//!
//! Read-only reference data: the definitions user awards are instantiated
//! from.

use async_trait::async_trait;

use crate::domain::award::AwardTemplate;
use crate::domain::foundation::{DomainError, TemplateId};

/// Read-only catalog of award templates.
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// Find a template by its id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<AwardTemplate>, DomainError>;

    /// Find a template by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<AwardTemplate>, DomainError>;

    /// All templates in the catalog.
    async fn list(&self) -> Result<Vec<AwardTemplate>, DomainError>;
}
