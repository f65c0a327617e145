//! Core parsing logic for the time log.
//!
//! This crate turns a plain-text log into structured days:
//! - Blocks: finding `XX/DD.MM.` headers and their entry lines
//! - Entries: resolving shorthand codes and computing durations
//! - Days: validating the timeline and aggregating same-task entries

mod aggregate;
pub mod blocks;
mod day;
mod entry;
mod error;
mod log;
mod mapping;
pub mod time;
mod timeline;

pub use aggregate::aggregate;
pub use blocks::{DayBlock, DayBlocks, day_blocks};
pub use day::{Day, parse_day};
pub use entry::{Entry, parse_entry};
pub use error::ParseError;
pub use log::Parser;
pub use mapping::{Mapping, MappingTable};
pub use timeline::validate_timeline;
