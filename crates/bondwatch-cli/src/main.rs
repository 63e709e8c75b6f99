//! Bondwatch CLI - fixed income risk and compliance surveillance.
//!
//! # Usage
//!
//! ```bash
//! # Run the sample book against the default mandate
//! bondwatch monitor
//!
//! # Run a book from file against a rules file, failing on any breach
//! bondwatch monitor --positions book.csv --rules mandate.toml --fail-on-breach
//!
//! # Price one bond
//! bondwatch price --coupon 4.5 --years 2 --ytm 4.42 --face 10000000
//!
//! # Show the rules a limits file expands to
//! bondwatch rules --limits limits.toml
//! ```
//!
//! Exit status is 0 on success, 1 on error and 2 when `--fail-on-breach`
//! is set and the mandate is breached.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = cli.format;
    let quiet = cli.quiet;

    let code = match cli.command {
        Commands::Monitor(args) => commands::monitor::execute(args, format, quiet)?,
        Commands::Price(args) => {
            commands::price::execute(args, format, quiet)?;
            ExitCode::SUCCESS
        }
        Commands::Rules(args) => {
            commands::rules::execute(args, format, quiet)?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
