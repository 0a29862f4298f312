//! In-memory attendance provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{AttendanceProvider, AttendanceSample};

/// In-memory attendance counts, settable per user.
///
/// Users without a recorded sample report zero attendance, matching a
/// member who has not appeared in any lesson register yet.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned; acceptable for test code.
pub struct InMemoryAttendanceStore {
    samples: RwLock<HashMap<String, AttendanceSample>>,
}

impl InMemoryAttendanceStore {
    pub fn new() -> Self {
        Self {
            samples: RwLock::new(HashMap::new()),
        }
    }

    /// Records a user's attendance counts.
    pub fn set_counts(&self, user_id: &UserId, present: u32, total: u32) {
        self.samples
            .write()
            .expect("InMemoryAttendanceStore: lock poisoned")
            .insert(user_id.to_string(), AttendanceSample { present, total });
    }
}

impl Default for InMemoryAttendanceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttendanceProvider for InMemoryAttendanceStore {
    async fn sample_for(&self, user_id: &UserId) -> Result<AttendanceSample, DomainError> {
        Ok(self
            .samples
            .read()
            .expect("InMemoryAttendanceStore: lock poisoned")
            .get(user_id.as_str())
            .copied()
            .unwrap_or(AttendanceSample {
                present: 0,
                total: 0,
            }))
    }
}
