//! Splitting a log into day blocks.
//!
//! A block starts with a header line such as `TU/15.03.` and runs until the
//! first blank line or the next header. This module only finds blocks;
//! turning their lines into entries is the job of [`crate::parse_day`].

use std::iter::Peekable;
use std::str::Lines;
use std::sync::LazyLock;

use regex::Regex;

/// Two-letter weekday abbreviation, then `/DD.MM.`, at the start of a line.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\w{2}/([0-9]{2})\.([0-9]{2})\.").unwrap());

/// Raw text of one day: header captures plus body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlock<'a> {
    pub day: u32,
    pub month: u32,
    pub body: Vec<&'a str>,
}

/// Lazy iterator over the day blocks of a log.
///
/// Create a fresh one with [`day_blocks`] to start over.
#[derive(Debug)]
pub struct DayBlocks<'a> {
    lines: Peekable<Lines<'a>>,
}

/// Iterates the day blocks of `text` in source order.
pub fn day_blocks(text: &str) -> DayBlocks<'_> {
    DayBlocks {
        lines: text.lines().peekable(),
    }
}

/// Splits a header line into day, month and the text following the header.
fn parse_header(line: &str) -> Option<(u32, u32, &str)> {
    let caps = HEADER_RE.captures(line)?;
    let day = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let end = caps.get(0)?.end();
    Some((day, month, &line[end..]))
}

impl<'a> Iterator for DayBlocks<'a> {
    type Item = DayBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (day, month, rest) = loop {
            let line = self.lines.next()?;
            if let Some(header) = parse_header(line) {
                break header;
            }
        };

        let mut body = Vec::new();
        if !rest.trim().is_empty() {
            body.push(rest.trim());
        }

        while let Some(&line) = self.lines.peek() {
            if HEADER_RE.is_match(line) {
                break;
            }
            self.lines.next();
            if line.trim().is_empty() {
                // Blank lines directly after the header are padding.
                if body.is_empty() {
                    continue;
                }
                break;
            }
            body.push(line);
        }

        Some(DayBlock { day, month, body })
    }
}
