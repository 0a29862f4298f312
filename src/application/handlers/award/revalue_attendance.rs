//! RevalueAttendanceHandler - Command handler for repricing the attendance award.
//!
//! The attendance award's face value is a step function of the user's
//! attendance percentage. This handler is invoked whenever attendance
//! changes; it is an explicit command, not a side effect of rendering or
//! reading.

use std::sync::Arc;

use crate::domain::award::{attendance_award_value, AwardError, AwardRevalued, ATTENDANCE_AWARD_NAME};
use crate::domain::foundation::{
    AttendanceRate, Cents, EventId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::ports::{AttendanceProvider, AwardRepository, EventPublisher};

/// Command to recompute the attendance award's value for a user.
#[derive(Debug, Clone)]
pub struct RevalueAttendanceCommand {
    pub user_id: UserId,

    /// Attendance percentage to price from. When `None`, the handler pulls
    /// the current sample from the attendance provider.
    pub rate: Option<AttendanceRate>,
}

/// What the revaluation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevalueOutcome {
    /// The user holds no attendance award; nothing was written.
    NoAttendanceAward,

    /// The table value matches the stored value; nothing was written.
    Unchanged { value: Cents },

    /// The award was repriced.
    Revalued {
        previous_value: Cents,
        new_value: Cents,
        residual: Cents,
    },
}

/// Result of a revaluation command.
#[derive(Debug, Clone)]
pub struct RevalueAttendanceResult {
    pub outcome: RevalueOutcome,
}

/// Handler for attendance award revaluation.
pub struct RevalueAttendanceHandler {
    awards: Arc<dyn AwardRepository>,
    attendance: Arc<dyn AttendanceProvider>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RevalueAttendanceHandler {
    pub fn new(
        awards: Arc<dyn AwardRepository>,
        attendance: Arc<dyn AttendanceProvider>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            awards,
            attendance,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RevalueAttendanceCommand,
    ) -> Result<RevalueAttendanceResult, AwardError> {
        // 1. Users without an attendance award are a silent no-op
        let Some(mut award) = self
            .awards
            .find_by_name(&cmd.user_id, ATTENDANCE_AWARD_NAME)
            .await?
        else {
            return Ok(RevalueAttendanceResult {
                outcome: RevalueOutcome::NoAttendanceAward,
            });
        };

        // 2. Resolve the rate: from the command, or live from the provider
        let rate = match cmd.rate {
            Some(rate) => rate,
            None => self.attendance.sample_for(&cmd.user_id).await?.rate(),
        };

        // 3. Reprice; used_value is never touched
        let previous_value = award.value;
        award.revalue(attendance_award_value(rate));

        if award.value == previous_value {
            return Ok(RevalueAttendanceResult {
                outcome: RevalueOutcome::Unchanged {
                    value: award.value,
                },
            });
        }

        self.awards.update_value(&award).await?;

        // 4. Publish event
        let event = AwardRevalued {
            event_id: EventId::new(),
            award_id: award.id,
            user_id: award.user_id.clone(),
            previous_value,
            new_value: award.value,
            residual: award.residual,
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        Ok(RevalueAttendanceResult {
            outcome: RevalueOutcome::Revalued {
                previous_value,
                new_value: award.value,
                residual: award.residual,
            },
        })
    }
}
