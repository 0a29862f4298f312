//! Award record aggregate.
//!
//! A user-held award: a face value, a cumulative consumed amount, and the
//! redundant residual the legacy documents carry.
//!
//! # Invariants
//!
//! - `used_value + residual == value` at all times, including after an
//!   attendance revaluation
//! - `used_value <= value`
//! - `used == residual.is_zero()`
//!
//! Money is integer cents, so the invariants are exact, not
//! within-epsilon.

use crate::domain::foundation::{AwardId, Cents, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::template::{is_spendable, AwardTemplate};

/// A bonus award held by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRecord {
    /// Unique identifier for this award document.
    pub id: AwardId,

    /// User who holds the award.
    pub user_id: UserId,

    /// Template this award was instantiated from.
    pub template_id: crate::domain::foundation::TemplateId,

    /// Display name, copied from the template at grant time.
    pub name: String,

    /// Face value.
    pub value: Cents,

    /// Cumulative amount consumed by purchases.
    pub used_value: Cents,

    /// Remaining spendable value. Stored redundantly; always `value - used_value`.
    pub residual: Cents,

    /// True iff the residual is zero.
    pub used: bool,

    /// When the award was granted.
    pub assigned_at: Timestamp,
}

/// Balance fields after a spend, returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendOutcome {
    /// Amount actually consumed; less than requested when the request
    /// exceeded the residual.
    pub consumed: Cents,
    pub used_value: Cents,
    pub residual: Cents,
    pub used: bool,
}

impl AwardRecord {
    /// Instantiates a new award from a template.
    ///
    /// An explicit override replaces the template's base value (used by the
    /// admin console when granting ad-hoc amounts).
    pub fn grant(
        id: AwardId,
        user_id: UserId,
        template: &AwardTemplate,
        override_value: Option<Cents>,
        assigned_at: Timestamp,
    ) -> Self {
        let value = override_value.unwrap_or(template.base_value);
        Self {
            id,
            user_id,
            template_id: template.id,
            name: template.name.clone(),
            value,
            used_value: Cents::ZERO,
            residual: value,
            used: value.is_zero(),
            assigned_at,
        }
    }

    /// True if this award may be drawn from by purchases.
    pub fn is_spendable(&self) -> bool {
        is_spendable(&self.name)
    }

    /// Consumes up to `amount` from the residual.
    ///
    /// A request larger than the residual is truncated, never rejected:
    /// the legacy purchase flow relies on capped spends.
    pub fn spend(&mut self, amount: Cents) -> SpendOutcome {
        let consumed = amount.min(self.residual);
        self.used_value = (self.used_value + consumed).min(self.value);
        self.sync_residual();
        SpendOutcome {
            consumed,
            used_value: self.used_value,
            residual: self.residual,
            used: self.used,
        }
    }

    /// Returns up to `amount` of previously consumed value.
    ///
    /// The reduction is capped at `used_value`: an award can never be
    /// refunded more than was actually drawn from it. Returns the amount
    /// actually restored.
    pub fn refund_capped(&mut self, amount: Cents) -> Cents {
        let restored = amount.min(self.used_value);
        self.used_value = self.used_value - restored;
        self.sync_residual();
        restored
    }

    /// Replaces the face value, preserving what was already consumed.
    ///
    /// Used only for the attendance award. The stored value never drops
    /// below `used_value`, so the ledger identity holds even when the
    /// attendance table dips under what the user already spent.
    pub fn revalue(&mut self, new_value: Cents) {
        self.value = new_value.max(self.used_value);
        self.sync_residual();
    }

    /// Ledger identity check, used by tests and the audit tooling.
    pub fn invariant_holds(&self) -> bool {
        self.used_value + self.residual == self.value
            && self.used_value <= self.value
            && self.used == self.residual.is_zero()
    }

    fn sync_residual(&mut self) {
        self.residual = self.value - self.used_value;
        self.used = self.residual.is_zero();
    }
}
