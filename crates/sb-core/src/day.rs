//! Day records and the per-block parsing pipeline.

use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::aggregate::aggregate;
use crate::blocks::DayBlock;
use crate::entry::{Entry, parse_entry};
use crate::error::ParseError;
use crate::mapping::MappingTable;
use crate::timeline::validate_timeline;

/// One parsed calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub date: NaiveDate,
    /// Day of week, Sunday = 0.
    pub weekday: u32,
    /// Aggregated entries sorted by package.
    pub entries: Vec<Entry>,
}

impl Day {
    /// Sum of entry durations in hours.
    ///
    /// Recomputed on every call so it always reflects `entries`.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.duration).sum()
    }
}

impl Serialize for Day {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Day", 4)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("weekday", &self.weekday)?;
        state.serialize_field("entries", &self.entries)?;
        state.serialize_field("total", &self.total())?;
        state.end()
    }
}

/// Parses one day block: entries, timeline check, aggregation, sorting.
pub fn parse_day(
    block: &DayBlock<'_>,
    year: i32,
    mappings: &MappingTable,
) -> Result<Day, ParseError> {
    let date = NaiveDate::from_ymd_opt(year, block.month, block.day).ok_or(
        ParseError::InvalidDate {
            year,
            month: block.month,
            day: block.day,
        },
    )?;

    let mut entries = Vec::with_capacity(block.body.len());
    for line in &block.body {
        match parse_entry(line, date, mappings)? {
            Some(entry) => entries.push(entry),
            None => tracing::debug!(%date, line, "skipping non-entry line"),
        }
    }

    validate_timeline(&entries)?;

    let mut entries = aggregate(entries);
    entries.sort_by(|a, b| a.package.cmp(&b.package));

    tracing::debug!(%date, entries = entries.len(), "parsed day");

    Ok(Day {
        date,
        weekday: date.weekday().num_days_from_sunday(),
        entries,
    })
}
