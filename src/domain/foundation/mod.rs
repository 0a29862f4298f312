//! Shared value objects and infrastructure for the domain layer.

mod attendance_rate;
mod errors;
mod events;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use attendance_rate::AttendanceRate;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{AwardId, PaymentId, SubscriptionId, TemplateId, UserId};
pub use money::Cents;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
