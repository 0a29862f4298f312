//! Bonus selection for purchases.
//!
//! Given a user's spendable awards and a purchase price, decide how much
//! bonus to apply and from which awards. The draw order is explicit data:
//! oldest `assigned_at` first, award id as tie-break. Spend applies the
//! draws in list order; refund walks the same list in reverse, which makes
//! the two provably inverse for a given plan.

use crate::domain::foundation::{AwardId, Cents};
use serde::{Deserialize, Serialize};

use super::record::AwardRecord;

/// A single draw against one award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusDraw {
    pub award_id: AwardId,
    pub amount: Cents,
}

/// Deterministic plan for applying bonus value to a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusCalculation {
    /// Total bonus applied; never exceeds the purchase price.
    pub applied: Cents,

    /// Draws in spend order (oldest award first).
    pub draws: Vec<BonusDraw>,
}

impl BonusCalculation {
    /// Plan with no bonus applied.
    pub fn none() -> Self {
        Self {
            applied: Cents::ZERO,
            draws: Vec::new(),
        }
    }

    /// True if no bonus value is applied.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Award ids in spend order, for the payment record's bookkeeping.
    pub fn award_ids(&self) -> Vec<AwardId> {
        self.draws.iter().map(|d| d.award_id).collect()
    }
}

/// Selects how much bonus to apply to a purchase and from which awards.
///
/// Only spendable awards with a non-zero residual participate. The total
/// is capped at `price`. Awards are drawn oldest-assigned-first so the
/// plan is stable for a given ledger state.
pub fn calculate_purchase_bonus(awards: &[AwardRecord], price: Cents) -> BonusCalculation {
    if price.is_zero() {
        return BonusCalculation::none();
    }

    let mut candidates: Vec<&AwardRecord> = awards
        .iter()
        .filter(|a| a.is_spendable() && !a.residual.is_zero())
        .collect();
    candidates.sort_by(|a, b| {
        a.assigned_at
            .cmp(&b.assigned_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });

    let mut remaining = price;
    let mut draws = Vec::new();
    for award in candidates {
        if remaining.is_zero() {
            break;
        }
        let amount = award.residual.min(remaining);
        draws.push(BonusDraw {
            award_id: award.id,
            amount,
        });
        remaining = remaining - amount;
    }

    BonusCalculation {
        applied: price - remaining,
        draws,
    }
}
