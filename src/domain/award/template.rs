//! Award template catalog entries.
//!
//! Templates are immutable reference data: a name and a base face value.
//! User awards are instantiated from them, at most once per (user, template).

use crate::domain::foundation::{Cents, TemplateId};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the attendance award.
///
/// The one award whose face value tracks the attendance percentage and
/// which can never be spent directly. Matched by name: the legacy data has
/// no other marker for it.
pub const ATTENDANCE_AWARD_NAME: &str = "Premio Presenze";

/// An award definition in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardTemplate {
    /// Unique identifier for this template.
    pub id: TemplateId,

    /// Display name; also the duplicate-detection key for the attendance award.
    pub name: String,

    /// Face value assigned to new awards, unless overridden at grant time.
    pub base_value: Cents,
}

impl AwardTemplate {
    /// Creates a new template.
    pub fn new(id: TemplateId, name: impl Into<String>, base_value: Cents) -> Self {
        Self {
            id,
            name: name.into(),
            base_value,
        }
    }

    /// True if awards from this template can be spent against purchases.
    pub fn is_spendable(&self) -> bool {
        is_spendable(&self.name)
    }

    /// True if this is the attendance award template.
    pub fn is_attendance(&self) -> bool {
        self.name == ATTENDANCE_AWARD_NAME
    }
}

/// Every award is spendable except the attendance award, which only accrues.
pub fn is_spendable(award_name: &str) -> bool {
    award_name != ATTENDANCE_AWARD_NAME
}

// Fixed ids so catalog references stay stable across processes.
const ATTENDANCE_TEMPLATE_UUID: Uuid = Uuid::from_u128(0x1ab3_c5d7_0000_4000_8000_000000000001);
const WELCOME_TEMPLATE_UUID: Uuid = Uuid::from_u128(0x1ab3_c5d7_0000_4000_8000_000000000002);
const SEASONAL_TEMPLATE_UUID: Uuid = Uuid::from_u128(0x1ab3_c5d7_0000_4000_8000_000000000003);

/// The built-in award catalog.
///
/// The hosted deployment reads templates from the `awards` collection; this
/// catalog seeds it and backs the in-memory adapter.
pub static BUILTIN_CATALOG: Lazy<Vec<AwardTemplate>> = Lazy::new(|| {
    vec![
        AwardTemplate::new(
            TemplateId::from_uuid(ATTENDANCE_TEMPLATE_UUID),
            ATTENDANCE_AWARD_NAME,
            // Floor of the attendance table; revalued as soon as attendance moves.
            Cents::new(50),
        ),
        AwardTemplate::new(
            TemplateId::from_uuid(WELCOME_TEMPLATE_UUID),
            "Premio Benvenuto",
            Cents::new(500),
        ),
        AwardTemplate::new(
            TemplateId::from_uuid(SEASONAL_TEMPLATE_UUID),
            "Premio Abbonamento Stagionale",
            Cents::new(1000),
        ),
    ]
});

/// Returns the built-in award catalog.
pub fn builtin_catalog() -> &'static [AwardTemplate] {
    &BUILTIN_CATALOG
}
