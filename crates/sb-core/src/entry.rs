//! Entry lines: `HH:MM-HH:MM CODE[:comment]`.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::mapping::MappingTable;
use crate::time::{hours_between, time_of_day};

/// Start time, end time and free-text tail of an entry line.
///
/// `.` is accepted as an alias of `:` between hours and minutes. Anything
/// between the two times is treated as a separator.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{2})[:.]([0-9]{2}).+?([0-9]{2})[:.]([0-9]{2}) (.+)").unwrap()
});

/// One contiguous task interval within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Fractional hours.
    pub duration: f64,
    pub package: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_summary: Option<String>,
    /// Source text the entry was parsed from. `None` once aggregated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Entry {
    /// The source line, or an empty string for aggregated entries.
    pub fn raw_text(&self) -> &str {
        self.raw.as_deref().unwrap_or_default()
    }
}

/// Parses a single body line of a day block.
///
/// Returns `Ok(None)` for lines that are not entries at all. Lines that look
/// like entries but cannot be resolved are errors.
pub fn parse_entry(
    line: &str,
    date: NaiveDate,
    mappings: &MappingTable,
) -> Result<Option<Entry>, ParseError> {
    let Some(caps) = ENTRY_RE.captures(line) else {
        return Ok(None);
    };
    build_entry(&caps, date, mappings).map(Some)
}

fn build_entry(
    caps: &Captures<'_>,
    date: NaiveDate,
    mappings: &MappingTable,
) -> Result<Entry, ParseError> {
    let raw = caps[0].to_string();

    let clock = |hour: usize, minute: usize| {
        let hour: u32 = caps[hour].parse().ok()?;
        let minute: u32 = caps[minute].parse().ok()?;
        time_of_day(date, hour, minute)
    };
    let (Some(start), Some(end)) = (clock(1, 2), clock(3, 4)) else {
        return Err(ParseError::InvalidTime { raw });
    };

    let (shorthand, comment_override) = match caps[5].split_once(':') {
        Some((code, rest)) => (code.trim(), Some(rest.trim())),
        None => (caps[5].trim(), None),
    };

    let Some(mapping) = mappings.resolve(shorthand) else {
        return Err(ParseError::UnmappedShorthand {
            shorthand: shorthand.to_string(),
            raw,
        });
    };

    let comment = comment_override
        .filter(|text| !text.is_empty())
        .or_else(|| mapping.comment.as_deref().map(str::trim))
        .filter(|text| !text.is_empty());
    let Some(comment) = comment else {
        return Err(ParseError::MissingComment { raw });
    };

    Ok(Entry {
        start,
        end,
        duration: hours_between(start, end),
        package: mapping.package_id(),
        comment: comment.to_string(),
        ticket_summary: None,
        raw: Some(raw),
    })
}
