//! Hand-rolled port mocks shared by the award handler tests.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::award::{builtin_catalog, AwardRecord, AwardTemplate};
use crate::domain::foundation::{
    AwardId, Cents, DomainError, ErrorCode, EventEnvelope, TemplateId, UserId,
};
use crate::ports::{
    AttendanceProvider, AttendanceSample, AwardRepository, EventPublisher, TemplateCatalog,
};

// ════════════════════════════════════════════════════════════════════════════
// Award repository
// ════════════════════════════════════════════════════════════════════════════

pub struct MockAwardRepository {
    awards: Mutex<Vec<AwardRecord>>,
    fail_all: bool,
    /// When set, the next `update_balance` fails with a conflict once.
    conflict_once: Mutex<bool>,
}

impl MockAwardRepository {
    pub fn new() -> Self {
        Self {
            awards: Mutex::new(Vec::new()),
            fail_all: false,
            conflict_once: Mutex::new(false),
        }
    }

    pub fn with_awards(awards: Vec<AwardRecord>) -> Self {
        Self {
            awards: Mutex::new(awards),
            fail_all: false,
            conflict_once: Mutex::new(false),
        }
    }

    pub fn failing() -> Self {
        Self {
            awards: Mutex::new(Vec::new()),
            fail_all: true,
            conflict_once: Mutex::new(false),
        }
    }

    pub fn conflict_on_next_update(&self) {
        *self.conflict_once.lock().unwrap() = true;
    }

    pub fn saved_awards(&self) -> Vec<AwardRecord> {
        self.awards.lock().unwrap().clone()
    }

    pub fn get(&self, id: &AwardId) -> Option<AwardRecord> {
        self.awards.lock().unwrap().iter().find(|a| &a.id == id).cloned()
    }

    fn check_fail(&self) -> Result<(), DomainError> {
        if self.fail_all {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated store failure",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AwardRepository for MockAwardRepository {
    async fn save(&self, award: &AwardRecord) -> Result<(), DomainError> {
        self.check_fail()?;
        let mut awards = self.awards.lock().unwrap();
        let duplicate = awards.iter().any(|a| {
            a.user_id == award.user_id
                && (a.template_id == award.template_id || a.name == award.name)
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateAward,
                "Award already granted",
            ));
        }
        awards.push(award.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AwardId) -> Result<Option<AwardRecord>, DomainError> {
        self.check_fail()?;
        Ok(self.get(id))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<AwardRecord>, DomainError> {
        self.check_fail()?;
        Ok(self
            .awards
            .lock()
            .unwrap()
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
        self.check_fail()?;
        Ok(self
            .awards
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.user_id == user_id && a.name == name)
            .cloned())
    }

    async fn update_balance(
        &self,
        award: &AwardRecord,
        expected_used_value: Cents,
    ) -> Result<(), DomainError> {
        self.check_fail()?;
        {
            let mut conflict = self.conflict_once.lock().unwrap();
            if *conflict {
                *conflict = false;
                return Err(DomainError::new(
                    ErrorCode::ConcurrentModification,
                    "Award balance changed concurrently",
                ));
            }
        }
        let mut awards = self.awards.lock().unwrap();
        let stored = awards
            .iter_mut()
            .find(|a| a.id == award.id)
            .ok_or_else(|| DomainError::new(ErrorCode::AwardNotFound, "Award not found"))?;
        if stored.used_value != expected_used_value {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "Award balance changed concurrently",
            ));
        }
        stored.used_value = award.used_value;
        stored.residual = award.residual;
        stored.used = award.used;
        Ok(())
    }

    async fn update_value(&self, award: &AwardRecord) -> Result<(), DomainError> {
        self.check_fail()?;
        let mut awards = self.awards.lock().unwrap();
        let stored = awards
            .iter_mut()
            .find(|a| a.id == award.id)
            .ok_or_else(|| DomainError::new(ErrorCode::AwardNotFound, "Award not found"))?;
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
        self.check_fail()?;
        Ok(self
            .awards
            .lock()
            .unwrap()
            .iter()
            .any(|a| &a.user_id == user_id && &a.template_id == template_id))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Template catalog
// ════════════════════════════════════════════════════════════════════════════

pub struct MockTemplateCatalog {
    templates: Vec<AwardTemplate>,
}

impl MockTemplateCatalog {
    pub fn builtin() -> Self {
        Self {
            templates: builtin_catalog().to_vec(),
        }
    }
}

#[async_trait]
impl TemplateCatalog for MockTemplateCatalog {
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

// ════════════════════════════════════════════════════════════════════════════
// Attendance provider
// ════════════════════════════════════════════════════════════════════════════

pub struct MockAttendanceProvider {
    sample: AttendanceSample,
}

impl MockAttendanceProvider {
    pub fn with_counts(present: u32, total: u32) -> Self {
        Self {
            sample: AttendanceSample { present, total },
        }
    }
}

#[async_trait]
impl AttendanceProvider for MockAttendanceProvider {
    async fn sample_for(&self, _user_id: &UserId) -> Result<AttendanceSample, DomainError> {
        Ok(self.sample)
    }
}

pub struct FailingAttendanceProvider;

#[async_trait]
impl AttendanceProvider for FailingAttendanceProvider {
    async fn sample_for(&self, _user_id: &UserId) -> Result<AttendanceSample, DomainError> {
        Err(DomainError::new(
            ErrorCode::DatabaseError,
            "Simulated attendance read failure",
        ))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Event publisher
// ════════════════════════════════════════════════════════════════════════════

pub struct MockEventPublisher {
    published_events: Mutex<Vec<EventEnvelope>>,
    fail_publish: bool,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published_events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated publish failure",
            ));
        }
        self.published_events.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

/// Wires a repository seeded with `awards` plus fresh publisher.
pub fn seeded(awards: Vec<AwardRecord>) -> (Arc<MockAwardRepository>, Arc<MockEventPublisher>) {
    (
        Arc::new(MockAwardRepository::with_awards(awards)),
        Arc::new(MockEventPublisher::new()),
    )
}
