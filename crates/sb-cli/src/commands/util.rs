//! Shared utilities for CLI commands.

use anyhow::{Context, Result};
use sb_core::{Day, Parser};

use crate::Config;

/// Parses the configured time log.
pub fn load_days(config: &Config) -> Result<Vec<Day>> {
    let mut parser = Parser::new(&config.mappings).latest_only(config.modes.latest_only);
    if let Some(year) = config.year {
        parser = parser.with_year(year);
    }

    parser
        .parse_file(&config.path)
        .with_context(|| format!("failed to parse {}", config.path.display()))
}
