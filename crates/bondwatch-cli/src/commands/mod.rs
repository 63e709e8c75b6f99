//! CLI command implementations.

pub mod monitor;
pub mod price;
pub mod rules;

pub use monitor::MonitorArgs;
pub use price::PriceArgs;
pub use rules::RulesArgs;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bondwatch_compliance::MandateRule;
use bondwatch_config::loader::{load_limits, parse_date};
use bondwatch_config::MonitorConfig;
use bondwatch_portfolio::prelude::*;
use chrono::NaiveDate;
use clap::Args;
use tracing::info;

/// Input selection shared by commands that work on a book.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Monitor configuration file (TOML)
    #[arg(short, long, env = "BONDWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Positions file (CSV, JSON or TOML). Defaults to the sample book.
    #[arg(short, long)]
    pub positions: Option<PathBuf>,

    /// Rules file (JSON or TOML). Takes precedence over limits.
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Mandate limits file (JSON or TOML)
    #[arg(short, long)]
    pub limits: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,
}

/// A priced book and the rules to test it against.
pub struct Prepared {
    pub valuation_date: NaiveDate,
    pub snapshot: PortfolioSnapshot,
    pub rules: Vec<MandateRule>,
}

/// Loads inputs, prices the book and resolves the rule set.
///
/// Flags override the config file; paths given as flags are taken relative
/// to the working directory.
pub fn prepare(inputs: &InputArgs) -> Result<Prepared> {
    let mut config = match &inputs.config {
        Some(path) => MonitorConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MonitorConfig::default(),
    };
    apply_overrides(&mut config, inputs)?;

    let valuation_date = match &inputs.as_of {
        Some(date) => parse_date(date)?,
        None => config.valuation_date_or(chrono::Utc::now().date_naive()),
    };

    let positions = config
        .load_positions(valuation_date)
        .with_context(|| describe("positions", config.positions_path(), "sample book"))?;

    let priced = price_positions(&positions, &config.analytics)?;
    let snapshot = aggregate(priced)?.as_of(valuation_date);

    let rules = config
        .load_rules(&snapshot)
        .with_context(|| describe("rules", config.rules_path(), "mandate limits"))?;

    info!(
        %valuation_date,
        positions = snapshot.len(),
        rules = rules.len(),
        "Inputs prepared"
    );

    Ok(Prepared {
        valuation_date,
        snapshot,
        rules,
    })
}

/// Writes flag inputs over the config file's choices.
fn apply_overrides(config: &mut MonitorConfig, inputs: &InputArgs) -> Result<()> {
    if let Some(path) = &inputs.limits {
        config.limits =
            load_limits(path).with_context(|| format!("loading limits {}", path.display()))?;
    }

    if inputs.positions.is_none() && inputs.rules.is_none() {
        return Ok(());
    }
    // Absolute, so the config file's directory does not apply to them
    let cwd = std::env::current_dir().context("reading working directory")?;
    if let Some(path) = &inputs.positions {
        config.positions = Some(cwd.join(path));
    }
    if let Some(path) = &inputs.rules {
        config.rules = Some(cwd.join(path));
    }
    Ok(())
}

fn describe(what: &str, path: Option<PathBuf>, fallback: &str) -> String {
    match path {
        Some(path) => format!("loading {what} {}", path.display()),
        None => format!("loading {what} from {fallback}"),
    }
}
