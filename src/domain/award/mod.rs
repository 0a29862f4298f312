//! Award ledger domain: the "premi" bonus wallet.
//!
//! Each user holds a set of award records instantiated from the template
//! catalog. Awards carry a bounded balance that purchases can draw from and
//! cancellations can refund into. One award per user, the attendance award,
//! is revalued from the live attendance percentage instead of keeping the
//! value it was granted with.

mod attendance;
mod bonus;
mod errors;
mod events;
mod record;
mod template;

pub use attendance::attendance_award_value;
pub use bonus::{calculate_purchase_bonus, BonusCalculation, BonusDraw};
pub use errors::AwardError;
pub use events::{AwardGranted, AwardRefunded, AwardRevalued, AwardSpent};
pub use record::{AwardRecord, SpendOutcome};
pub use template::{builtin_catalog, is_spendable, AwardTemplate, ATTENDANCE_AWARD_NAME};
