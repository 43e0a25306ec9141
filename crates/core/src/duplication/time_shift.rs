//! Date offset applied to duplicated objects.

use chrono::Duration;

use crate::types::Timestamp;

/// Offset between the source and target course start dates.
///
/// Every dated attribute of a duplicate (milestone start, event window,
/// assessment and survey availability, video publication) moves by the same
/// amount so the copied schedule lines up with the target course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeShift(Duration);

impl Default for TimeShift {
    fn default() -> Self {
        Self::none()
    }
}

impl TimeShift {
    pub fn none() -> Self {
        Self(Duration::zero())
    }

    pub fn between(source_start: Timestamp, target_start: Timestamp) -> Self {
        Self(target_start - source_start)
    }

    pub fn offset(&self) -> Duration {
        self.0
    }

    /// Shift `at`, leaving it untouched (and logging a warning) if the result
    /// would be out of range.
    pub fn apply(&self, at: Timestamp) -> Timestamp {
        match at.checked_add_signed(self.0) {
            Some(shifted) => shifted,
            None => {
                tracing::warn!(
                    %at,
                    offset_seconds = self.0.num_seconds(),
                    "Date shift out of range, keeping the source date"
                );
                at
            }
        }
    }

    pub fn apply_opt(&self, at: Option<Timestamp>) -> Option<Timestamp> {
        at.map(|at| self.apply(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn shifts_forward_by_course_offset() {
        let shift = TimeShift::between(ts(2025, 1, 6), ts(2025, 8, 11));
        assert_eq!(shift.apply(ts(2025, 1, 13)), ts(2025, 8, 18));
    }

    #[test]
    fn shifts_backward() {
        let shift = TimeShift::between(ts(2025, 8, 11), ts(2025, 1, 6));
        assert_eq!(shift.apply(ts(2025, 8, 18)), ts(2025, 1, 13));
    }

    #[test]
    fn out_of_range_shift_keeps_source_date() {
        let shift = TimeShift::between(ts(2025, 1, 6), ts(200_000, 1, 6));
        let late = ts(250_000, 1, 1);
        assert_eq!(shift.apply(late), late);
        assert_eq!(shift.apply(ts(2025, 1, 6)), ts(200_000, 1, 6));
    }

    #[test]
    fn none_is_identity() {
        let shift = TimeShift::none();
        assert_eq!(shift.apply(ts(2025, 3, 1)), ts(2025, 3, 1));
        assert_eq!(shift.apply_opt(None), None);
        assert_eq!(shift.offset(), Duration::zero());
    }
}
