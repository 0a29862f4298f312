//! Domain layer: aggregates, value objects, and domain services.
//!
//! - `foundation` - shared value objects (ids, timestamps, money, errors)
//! - `award` - the bonus ledger (templates, records, attendance valuation)
//! - `subscription` - member accounts, payments, and status reconciliation

pub mod award;
pub mod foundation;
pub mod subscription;
