//! Rules command implementation.

use anyhow::Result;
use bondwatch_compliance::prelude::*;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{prepare, InputArgs};
use crate::output::{print_header, print_json, print_output};

/// Arguments for the rules command.
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

/// One row of the rules table.
#[derive(Debug, Serialize, Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Limit")]
    comparator: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&MandateRule> for RuleRow {
    fn from(rule: &MandateRule) -> Self {
        Self {
            id: rule.id.clone(),
            metric: rule.metric.to_string(),
            comparator: rule.comparator.to_string(),
            severity: rule.severity.to_string(),
            description: rule.description.clone().unwrap_or_default(),
        }
    }
}

/// Execute the rules command.
///
/// Rules are resolved exactly as `monitor` resolves them, so limits expand
/// against the loaded book.
pub fn execute(args: RulesArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let prepared = prepare(&args.inputs)?;
    validate_rules(&prepared.snapshot, &prepared.rules)?;

    match format {
        OutputFormat::Json => print_json(&prepared.rules)?,
        OutputFormat::Minimal => println!("{}", prepared.rules.len()),
        OutputFormat::Table | OutputFormat::Csv => {
            if format == OutputFormat::Table && !quiet {
                print_header(&format!("Mandate Rules ({})", prepared.rules.len()));
            }
            let rows: Vec<RuleRow> = prepared.rules.iter().map(RuleRow::from).collect();
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
