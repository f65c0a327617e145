//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Personal time log parser.
///
/// Reads a plain-text time log, resolves shorthand codes and sums up the
/// hours booked per task and day.
#[derive(Debug, Parser)]
#[command(name = "sb", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Time log to read instead of the configured one.
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Only report the last day of the log.
    #[arg(short, long, global = true)]
    pub latest: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse the log and print the days as JSON.
    Parse {
        /// Skip ticket summary lookups.
        #[arg(long)]
        no_tickets: bool,
    },

    /// Validate the log and print hours per day.
    Check,
}
