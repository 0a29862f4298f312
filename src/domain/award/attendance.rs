//! Attendance award valuation.
//!
//! The attendance award's face value is a step function of the attendance
//! percentage. Buckets are half-open on the right; the last bucket is
//! closed at 100%.

use crate::domain::foundation::{AttendanceRate, Cents};

/// Upper bucket bounds (exclusive) and the value granted below each, in cents.
///
/// [0,5) -> 0.50, [5,10) -> 1, [10,30) -> 3, [30,40) -> 4, [40,50) -> 5,
/// [50,60) -> 6, [60,70) -> 7, [70,80) -> 8, [80,90) -> 10, [90,95) -> 15,
/// [95,100] -> 20 euro.
const VALUE_BUCKETS: [(f64, i64); 10] = [
    (5.0, 50),
    (10.0, 100),
    (30.0, 300),
    (40.0, 400),
    (50.0, 500),
    (60.0, 600),
    (70.0, 700),
    (80.0, 800),
    (90.0, 1000),
    (95.0, 1500),
];

/// Value of the final, closed bucket [95, 100].
const TOP_VALUE: i64 = 2000;

/// Face value of the attendance award for a given attendance percentage.
///
/// Monotone non-decreasing in the rate.
pub fn attendance_award_value(rate: AttendanceRate) -> Cents {
    let pct = rate.value();
    for (upper, cents) in VALUE_BUCKETS {
        if pct < upper {
            return Cents::new(cents);
        }
    }
    Cents::new(TOP_VALUE)
}
