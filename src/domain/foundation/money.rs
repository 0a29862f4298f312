//! Monetary value object.
//!
//! All monetary values in the ledger are integer euro cents. Award balances
//! are bounded and frequently compared, so floats are never acceptable here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use super::ValidationError;

/// A non-negative amount of money in euro cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Creates a new amount, clamping negatives to zero.
    pub fn new(value: i64) -> Self {
        Self(value.max(0))
    }

    /// Creates an amount, returning an error if negative.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::out_of_range(
                "amount",
                0,
                i64::MAX,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the amount as raw cents.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// True if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtraction that bottoms out at zero instead of going negative.
    pub fn saturating_sub(self, other: Cents) -> Cents {
        Cents(self.0.saturating_sub(other.0).max(0))
    }

    /// Returns the smaller of two amounts.
    pub fn min(self, other: Cents) -> Cents {
        Cents(self.0.min(other.0))
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, other: Cents) -> Cents {
        Cents(self.0.saturating_add(other.0))
    }
}

impl Sub for Cents {
    type Output = Cents;

    /// Clamped subtraction; ledger amounts never go negative.
    fn sub(self, other: Cents) -> Cents {
        self.saturating_sub(other)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Default for Cents {
    fn default() -> Self {
        Self::ZERO
    }
}
