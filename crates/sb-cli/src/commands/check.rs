//! Check command: validates the log and prints hours per day.

use std::io::Write;

use anyhow::Result;
use chrono::Datelike;

use crate::Config;
use crate::commands::util::load_days;

/// Runs the check command.
pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let days = load_days(config)?;

    if days.is_empty() {
        writeln!(writer, "No days found in {}.", config.path.display())?;
        return Ok(());
    }

    for day in &days {
        writeln!(
            writer,
            "{} {} {:>2} entries {:>6.2}h",
            day.date.format("%d.%m."),
            day.date.weekday(),
            day.entries.len(),
            day.total()
        )?;
    }

    let total: f64 = days.iter().map(sb_core::Day::total).sum();
    writeln!(writer, "{} days, {total:.2}h total", days.len())?;

    Ok(())
}
