//! Ticket references inside entry comments.

use regex::Regex;

use crate::JiraError;

/// Finds ticket keys such as `PRJ-123` in free text.
#[derive(Debug, Clone)]
pub struct TicketMatcher {
    patterns: Vec<Regex>,
}

impl TicketMatcher {
    /// Compiles the configured patterns.
    ///
    /// A pattern with a capture group yields group 1 as the ticket key;
    /// otherwise the whole match is used.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, JiraError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| JiraError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns the ticket key of the first pattern that matches `comment`.
    pub fn ticket_key(&self, comment: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| {
            let caps = pattern.captures(comment)?;
            caps.get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().to_string())
        })
    }
}
