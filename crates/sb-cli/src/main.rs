use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sb_cli::commands::{check, parse};
use sb_cli::{Cli, Commands, Config};

/// Loads config and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;

    if let Some(file) = &cli.file {
        config.path.clone_from(file);
    }
    if cli.latest {
        config.modes.latest_only = true;
    }

    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Parse { no_tickets }) => {
            let config = load_config(&cli)?;
            parse::run(&mut stdout, &config, !*no_tickets)?;
        }
        Some(Commands::Check) => {
            let config = load_config(&cli)?;
            check::run(&mut stdout, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
