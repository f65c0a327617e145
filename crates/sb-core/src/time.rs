//! Day-anchored clock times.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Anchors an hour/minute pair to `date`.
///
/// Returns `None` when the pair is not a valid time of day (hour >= 24 or
/// minute >= 60). Seconds are always zero.
pub fn time_of_day(date: NaiveDate, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).map(|time| date.and_time(time))
}

/// Fractional hours between two clock times of the same day.
///
/// Computed from the hour and minute fields only, so both timestamps must
/// share a calendar date.
#[allow(clippy::cast_precision_loss)]
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let hours = i64::from(end.hour()) - i64::from(start.hour());
    let minutes = i64::from(end.minute()) - i64::from(start.minute());
    hours as f64 + minutes as f64 / 60.0
}
