//! In-memory award store.
//!
//! Mirrors the Postgres adapter's semantics: uniqueness on
//! (user, template) and on (user, name), and conditional balance writes
//! keyed on the previously observed `used_value`.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::award::AwardRecord;
use crate::domain::foundation::{AwardId, Cents, DomainError, ErrorCode, TemplateId, UserId};
use crate::ports::AwardRepository;

/// In-memory implementation of the award repository.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned; acceptable for test code.
pub struct InMemoryAwardStore {
    awards: RwLock<Vec<AwardRecord>>,
}

impl InMemoryAwardStore {
    pub fn new() -> Self {
        Self {
            awards: RwLock::new(Vec::new()),
        }
    }

    pub fn get(&self, id: &AwardId) -> Option<AwardRecord> {
        self.awards
            .read()
            .expect("InMemoryAwardStore: lock poisoned")
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<AwardRecord> {
        self.awards
            .read()
            .expect("InMemoryAwardStore: lock poisoned")
            .clone()
    }
}

impl Default for InMemoryAwardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AwardRepository for InMemoryAwardStore {
    async fn save(&self, award: &AwardRecord) -> Result<(), DomainError> {
        let mut awards = self
            .awards
            .write()
            .expect("InMemoryAwardStore: lock poisoned");
        let duplicate = awards.iter().any(|a| {
            a.user_id == award.user_id
                && (a.template_id == award.template_id || a.name == award.name)
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateAward,
                format!("User {} already holds '{}'", award.user_id, award.name),
            ));
        }
        awards.push(award.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AwardId) -> Result<Option<AwardRecord>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<AwardRecord>, DomainError> {
        Ok(self
            .awards
            .read()
            .expect("InMemoryAwardStore: lock poisoned")
            .iter()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_name(
        &self,
        user_id: &UserId,
        name: &str,
    ) -> Result<Option<AwardRecord>, DomainError> {
        Ok(self
            .awards
            .read()
            .expect("InMemoryAwardStore: lock poisoned")
            .iter()
            .find(|a| &a.user_id == user_id && a.name == name)
            .cloned())
    }

    async fn update_balance(
        &self,
        award: &AwardRecord,
        expected_used_value: Cents,
    ) -> Result<(), DomainError> {
        let mut awards = self
            .awards
            .write()
            .expect("InMemoryAwardStore: lock poisoned");
        let stored = awards
            .iter_mut()
            .find(|a| a.id == award.id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::AwardNotFound,
                    format!("Award not found: {}", award.id),
                )
            })?;
        if stored.used_value != expected_used_value {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!("Award {} balance changed concurrently", award.id),
            ));
        }
        stored.used_value = award.used_value;
        stored.residual = award.residual;
        stored.used = award.used;
        Ok(())
    }

    async fn update_value(&self, award: &AwardRecord) -> Result<(), DomainError> {
        let mut awards = self
            .awards
            .write()
            .expect("InMemoryAwardStore: lock poisoned");
        let stored = awards
            .iter_mut()
            .find(|a| a.id == award.id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::AwardNotFound,
                    format!("Award not found: {}", award.id),
                )
            })?;
        stored.value = award.value;
        stored.residual = award.residual;
        stored.used = award.used;
        Ok(())
    }

    async fn exists(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .awards
            .read()
            .expect("InMemoryAwardStore: lock poisoned")
            .iter()
            .any(|a| &a.user_id == user_id && &a.template_id == template_id))
    }
}
