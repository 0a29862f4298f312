//! Attendance data provider port.
//!
//! The attendance records and lesson catalog are owned elsewhere; the
//! ledger only needs the counts that drive the attendance award's value.

use async_trait::async_trait;

use crate::domain::foundation::{AttendanceRate, DomainError, UserId};

/// A user's attendance counts at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSample {
    /// Lessons the user attended.
    pub present: u32,

    /// Lessons held so far.
    pub total: u32,
}

impl AttendanceSample {
    /// The attendance percentage these counts represent.
    pub fn rate(&self) -> AttendanceRate {
        AttendanceRate::from_counts(self.present, self.total)
    }
}

/// Provides attendance counts for a user.
#[async_trait]
pub trait AttendanceProvider: Send + Sync {
    /// Current attendance sample for the user.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the attendance records cannot be read
    async fn sample_for(&self, user_id: &UserId) -> Result<AttendanceSample, DomainError>;
}
