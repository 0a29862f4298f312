//! Attendance rate value object (0-100 scale, fractional).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance percentage for a user: lessons attended over lessons held.
///
/// Fractional because lesson counts rarely divide evenly (7 of 12 lessons
/// is 58.33%). Always clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceRate(f64);

impl AttendanceRate {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const FULL: Self = Self(100.0);

    /// Creates a rate, clamping to the valid range.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    /// Derives the rate from attendance counts.
    ///
    /// Returns zero when no lessons have been held yet.
    pub fn from_counts(present: u32, total: u32) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        Self::new(f64::from(present) / f64::from(total) * 100.0)
    }

    /// Returns the percentage as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for AttendanceRate {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for AttendanceRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
