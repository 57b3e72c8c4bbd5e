use crate::error::ScheduleError;
use crate::models::{TimeOfDay, TimeWindow};

/// Whether `[start_a, end_a)` and `[start_b, end_b)` share any instant.
///
/// Ranges that merely touch (`end_a == start_b`) do not overlap. Either range
/// having `start >= end` is a `MalformedWindow` error, never a `false`.
pub fn overlaps(
    start_a: TimeOfDay,
    end_a: TimeOfDay,
    start_b: TimeOfDay,
    end_b: TimeOfDay,
) -> Result<bool, ScheduleError> {
    let a = TimeWindow::new(start_a, end_a)?;
    let b = TimeWindow::new(start_b, end_b)?;
    Ok(a.overlaps(&b))
}

/// [`overlaps`] over `"HH:MM"` strings, for callers holding raw catalog text.
pub fn overlaps_str(
    start_a: &str,
    end_a: &str,
    start_b: &str,
    end_b: &str,
) -> Result<bool, ScheduleError> {
    overlaps(
        start_a.parse()?,
        end_a.parse()?,
        start_b.parse()?,
        end_b.parse()?,
    )
}
