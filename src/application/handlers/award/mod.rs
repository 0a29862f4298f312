//! Award ledger handlers.
//!
//! ## Commands
//! - Granting an award from a template
//! - Spending from an award's residual
//! - Refunding previously spent value (LIFO over the draw list)
//! - Revaluing the attendance award from the attendance rate
//! - Applying and releasing purchase bonuses (purchase-flow glue)
//!
//! ## Queries
//! - Calculating the bonus plan for a purchase

#[cfg(test)]
pub(crate) mod testing;

mod apply_bonus;
mod calculate_bonus;
mod grant_award;
mod refund_awards;
mod release_bonus;
mod revalue_attendance;
mod spend_award;

// Commands
pub use apply_bonus::{ApplyPurchaseBonusCommand, ApplyPurchaseBonusHandler, ApplyPurchaseBonusResult};
pub use grant_award::{GrantAwardCommand, GrantAwardHandler, GrantAwardResult};
pub use refund_awards::{RefundAwardsCommand, RefundAwardsHandler, RefundAwardsResult};
pub use release_bonus::{
    ReleasePurchaseBonusCommand, ReleasePurchaseBonusHandler, ReleasePurchaseBonusResult,
};
pub use revalue_attendance::{
    RevalueAttendanceCommand, RevalueAttendanceHandler, RevalueAttendanceResult, RevalueOutcome,
};
pub use spend_award::{SpendAwardCommand, SpendAwardHandler, SpendAwardResult};

// Queries
pub use calculate_bonus::{
    CalculateBonusHandler, CalculateBonusQuery, CalculateBonusResult,
};
