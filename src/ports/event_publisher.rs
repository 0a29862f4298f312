//! EventPublisher port - interface for publishing domain events.
//!
//! This port defines how the domain publishes events without knowing
//! about the underlying transport mechanism. Subscribers turn these into
//! user-facing notifications (award granted, bonus refunded, account
//! unlocked); this core only emits structured envelopes.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (handlers may receive duplicates)
/// - `publish_all` is atomic where supported by the adapter
/// - Errors are propagated to the caller
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events.
    ///
    /// All events are published or none are (where supported by the
    /// adapter). Adapters without atomic publishing fall back to
    /// sequential best-effort delivery.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}

    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn event_publisher_is_send_sync() {
        fn _check<T: EventPublisher>() {
            assert_send_sync::<T>();
        }
    }
}
