//! Whole-log parsing.

use std::fs;
use std::path::Path;

use chrono::{Datelike, Local};
use rayon::prelude::*;

use crate::blocks::{DayBlock, day_blocks};
use crate::day::{Day, parse_day};
use crate::error::ParseError;
use crate::mapping::MappingTable;

/// Parses time logs against a mapping table.
///
/// Headers only carry day and month, so every day is placed in one year:
/// the current local year unless overridden with [`Parser::with_year`].
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    mappings: &'a MappingTable,
    year: i32,
    latest_only: bool,
}

impl<'a> Parser<'a> {
    pub fn new(mappings: &'a MappingTable) -> Self {
        Self {
            mappings,
            year: Local::now().year(),
            latest_only: false,
        }
    }

    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Keep only the last day block in source order.
    ///
    /// Every block is still parsed and validated.
    #[must_use]
    pub const fn latest_only(mut self, latest_only: bool) -> Self {
        self.latest_only = latest_only;
        self
    }

    /// Reads and parses the log file at `path`.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Day>, ParseError> {
        if !path.exists() {
            return Err(ParseError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read time log");

        self.parse_str(&text)
    }

    /// Parses log text into one [`Day`] per block, in source order.
    ///
    /// Blocks are parsed in parallel. If several blocks fail, the error of
    /// the first one in the text is returned.
    pub fn parse_str(&self, text: &str) -> Result<Vec<Day>, ParseError> {
        let blocks: Vec<DayBlock<'_>> = day_blocks(text).collect();

        let results: Vec<Result<Day, ParseError>> = blocks
            .par_iter()
            .map(|block| parse_day(block, self.year, self.mappings))
            .collect();
        let mut days = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(days = days.len(), "parsed time log");

        if self.latest_only {
            days = days.pop().into_iter().collect();
        }
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Mapping;
    use chrono::NaiveDate;

    fn mappings() -> MappingTable {
        let mut table = MappingTable::new();
        table.insert(
            "AB",
            Mapping {
                project_nr: "PRJ".to_string(),
                package_nr: "7".to_string(),
                comment: Some("default task".to_string()),
            },
        );
        table
    }

    const LOG: &str = "\
MO/17.03.
08:00-09:00 AB

WE/12.03.
09:00-10:00 AB
10:00-10:30 AB:review

TU/18.03.
09:00-12:00 AB
";

    #[test]
    fn one_day_per_block_in_source_order() {
        let table = mappings();
        let days = Parser::new(&table).with_year(2025).parse_str(LOG).unwrap();

        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 17).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 18).unwrap(),
            ]
        );
        assert_eq!(days[1].entries.len(), 2);
    }

    #[test]
    fn latest_only_returns_last_block_not_latest_date() {
        let table = mappings();
        let days = Parser::new(&table)
            .with_year(2025)
            .latest_only(true)
            .parse_str(LOG)
            .unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 3, 18).unwrap());
        assert!((days[0].total() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn latest_only_still_validates_earlier_days() {
        let table = mappings();
        let log = "MO/17.03.\n08:00-09:00 ZZ\n\nTU/18.03.\n09:00-12:00 AB\n";
        let err = Parser::new(&table)
            .with_year(2025)
            .latest_only(true)
            .parse_str(log)
            .unwrap_err();
        assert!(matches!(err, ParseError::UnmappedShorthand { .. }));
    }

    #[test]
    fn empty_log_yields_no_days() {
        let table = mappings();
        let parser = Parser::new(&table).latest_only(true);
        assert!(parser.parse_str("").unwrap().is_empty());
    }

    #[test]
    fn first_error_in_source_order_wins() {
        let table = mappings();
        let log = "MO/17.03.\n08:00-09:00 XX\n\nTU/18.03.\n09:00-12:00 YY\n";
        let err = Parser::new(&table).with_year(2025).parse_str(log).unwrap_err();
        assert!(err.to_string().contains("08:00-09:00 XX"));
    }

    #[test]
    fn missing_file_names_path() {
        let table = mappings();
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing.txt");

        let err = Parser::new(&table).parse_file(&path).unwrap_err();
        assert!(matches!(&err, ParseError::FileNotFound { path: p } if *p == path));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn parses_file_from_disk() {
        let table = mappings();
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("time.txt");
        std::fs::write(&path, LOG).unwrap();

        let days = Parser::new(&table).with_year(2025).parse_file(&path).unwrap();
        assert_eq!(days.len(), 3);
    }
}
