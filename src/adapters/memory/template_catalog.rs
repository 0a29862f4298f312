//! In-memory template catalog.

use async_trait::async_trait;

use crate::domain::award::{builtin_catalog, AwardTemplate};
use crate::domain::foundation::{DomainError, TemplateId};
use crate::ports::TemplateCatalog;

/// In-memory implementation of the template catalog.
pub struct InMemoryTemplateCatalog {
    templates: Vec<AwardTemplate>,
}

impl InMemoryTemplateCatalog {
    /// Catalog seeded with the built-in award definitions.
    pub fn builtin() -> Self {
        Self {
            templates: builtin_catalog().to_vec(),
        }
    }

    /// Catalog with explicit templates.
    pub fn with_templates(templates: Vec<AwardTemplate>) -> Self {
        Self { templates }
    }
}

#[async_trait]
impl TemplateCatalog for InMemoryTemplateCatalog {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<AwardTemplate>, DomainError> {
        Ok(self.templates.iter().find(|t| &t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<AwardTemplate>, DomainError> {
        Ok(self.templates.iter().find(|t| t.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<AwardTemplate>, DomainError> {
        Ok(self.templates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::award::ATTENDANCE_AWARD_NAME;

    #[tokio::test]
    async fn builtin_catalog_contains_attendance_award() {
        let catalog = InMemoryTemplateCatalog::builtin();
        let found = catalog.find_by_name(ATTENDANCE_AWARD_NAME).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn find_by_id_resolves_listed_templates() {
        let catalog = InMemoryTemplateCatalog::builtin();
        for template in catalog.list().await.unwrap() {
            let found = catalog.find_by_id(&template.id).await.unwrap();
            assert_eq!(found, Some(template));
        }
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let catalog = InMemoryTemplateCatalog::builtin();
        assert!(catalog.find_by_id(&TemplateId::new()).await.unwrap().is_none());
    }
}
