//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-memory event bus
//! - `memory` - In-process stores for tests and local runs
//! - `postgres` - PostgreSQL repositories

pub mod events;
pub mod memory;
pub mod postgres;

pub use events::InMemoryEventBus;
pub use memory::{
    InMemoryAccountStore, InMemoryAttendanceStore, InMemoryAwardStore, InMemoryPaymentStore,
    InMemoryTemplateCatalog,
};
pub use postgres::{
    PostgresAccountRepository, PostgresAwardRepository, PostgresPaymentRepository,
    PostgresTemplateCatalog,
};
