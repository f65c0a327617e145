//! Parse failures.
//!
//! Every variant aborts the whole parse. Entry-level variants carry the
//! matched source line so the user can find the typo.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a time log into days.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The log file does not exist.
    #[error("no time tracking file found at {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The log file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A day header names a date that does not exist in the target year.
    #[error("invalid date {day:02}.{month:02}. in year {year}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// An entry uses an hour or minute outside of a single day.
    #[error("invalid time of day in entry {raw}")]
    InvalidTime { raw: String },

    /// The entry's shorthand has no mapping.
    #[error("no mapping found for entry {raw}")]
    UnmappedShorthand { shorthand: String, raw: String },

    /// Neither the entry nor its mapping provides a comment.
    #[error("comment missing for entry {raw}")]
    MissingComment { raw: String },

    /// The entry starts before the previous entry ended.
    #[error("entry starts before last entry ended: {raw}")]
    TimelineOverlap { raw: String },

    /// The entry ends before it starts.
    #[error("entry ends before it starts: {raw}")]
    InvertedInterval { raw: String },
}
