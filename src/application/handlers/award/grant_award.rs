//! GrantAwardHandler - Command handler for instantiating an award from a template.

use std::sync::Arc;

use crate::domain::award::{AwardError, AwardGranted, AwardRecord, ATTENDANCE_AWARD_NAME};
use crate::domain::foundation::{
    AwardId, Cents, EventId, SerializableDomainEvent, TemplateId, Timestamp, UserId,
};
use crate::ports::{AwardRepository, EventPublisher, TemplateCatalog};

/// Command to grant a user an award from the catalog.
#[derive(Debug, Clone)]
pub struct GrantAwardCommand {
    pub user_id: UserId,
    pub template_id: TemplateId,

    /// Replaces the template's base value when set (admin-granted amounts).
    pub override_value: Option<Cents>,
}

/// Result of a successful grant.
#[derive(Debug, Clone)]
pub struct GrantAwardResult {
    pub award: AwardRecord,
}

/// Handler for granting awards.
///
/// Granting is idempotent per (user, template): a second grant of the same
/// template is rejected as a duplicate, and the attendance award is
/// additionally guarded by name so legacy documents without a template id
/// still block re-grants.
pub struct GrantAwardHandler {
    awards: Arc<dyn AwardRepository>,
    catalog: Arc<dyn TemplateCatalog>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl GrantAwardHandler {
    pub fn new(
        awards: Arc<dyn AwardRepository>,
        catalog: Arc<dyn TemplateCatalog>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            awards,
            catalog,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: GrantAwardCommand) -> Result<GrantAwardResult, AwardError> {
        // 1. Resolve the template
        let template = self
            .catalog
            .find_by_id(&cmd.template_id)
            .await?
            .ok_or_else(|| AwardError::template_not_found(cmd.template_id.to_string()))?;

        // 2. Duplicate guard on (user, template)
        if self.awards.exists(&cmd.user_id, &template.id).await? {
            return Err(AwardError::duplicate(cmd.user_id, template.name));
        }

        // 3. The attendance award is unique per user by name as well
        if template.name == ATTENDANCE_AWARD_NAME
            && self
                .awards
                .find_by_name(&cmd.user_id, ATTENDANCE_AWARD_NAME)
                .await?
                .is_some()
        {
            return Err(AwardError::duplicate(cmd.user_id, template.name));
        }

        // 4. Instantiate and persist
        let award = AwardRecord::grant(
            AwardId::new(),
            cmd.user_id.clone(),
            &template,
            cmd.override_value,
            Timestamp::now(),
        );
        self.awards.save(&award).await.map_err(|err| {
            if err.code == crate::domain::foundation::ErrorCode::DuplicateAward {
                // Constraint fired under a concurrent grant
                AwardError::duplicate(cmd.user_id.clone(), award.name.clone())
            } else {
                err.into()
            }
        })?;

        // 5. Publish event
        let event = AwardGranted {
            event_id: EventId::new(),
            award_id: award.id,
            user_id: award.user_id.clone(),
            name: award.name.clone(),
            value: award.value,
            occurred_at: award.assigned_at,
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(GrantAwardResult { award })
    }
}
