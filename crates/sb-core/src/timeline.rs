//! Ordering checks for the entries of a day.

use chrono::NaiveDateTime;

use crate::entry::Entry;
use crate::error::ParseError;

/// Checks that entries move forward in source order and never overlap.
///
/// Must run before aggregation: merging by key loses the order in which
/// entries were written.
pub fn validate_timeline(entries: &[Entry]) -> Result<(), ParseError> {
    let mut last_end: Option<NaiveDateTime> = None;

    for entry in entries {
        if last_end.is_some_and(|end| entry.start < end) {
            return Err(ParseError::TimelineOverlap {
                raw: entry.raw_text().to_string(),
            });
        }

        if entry.end < entry.start {
            return Err(ParseError::InvertedInterval {
                raw: entry.raw_text().to_string(),
            });
        }

        last_end = Some(entry.end);
    }

    Ok(())
}
