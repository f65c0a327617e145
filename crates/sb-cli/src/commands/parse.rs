//! Parse command: prints the parsed days as JSON.

use std::io::Write;

use anyhow::{Context, Result};
use sb_jira::{Client, enrich_days};

use crate::Config;
use crate::commands::util::load_days;

/// Runs the parse command.
///
/// Ticket summaries are looked up when a Jira section is configured and
/// `tickets` is set.
pub fn run<W: Write>(writer: &mut W, config: &Config, tickets: bool) -> Result<()> {
    let mut days = load_days(config)?;

    match &config.jira {
        Some(jira) if tickets => {
            let client = Client::new(jira).context("failed to create Jira client")?;
            let runtime =
                tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
            runtime.block_on(enrich_days(&client, &mut days));
        }
        _ => tracing::debug!("ticket lookups disabled"),
    }

    writeln!(writer, "{}", serde_json::to_string_pretty(&days)?)?;
    Ok(())
}
