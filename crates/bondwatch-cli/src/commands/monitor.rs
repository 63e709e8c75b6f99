//! Monitor command implementation.
//!
//! Runs the full pipeline: load, price, aggregate, evaluate and report.

use std::process::ExitCode;

use anyhow::Result;
use bondwatch_compliance::prelude::*;
use bondwatch_core::types::{RatingBucket, Sector};
use bondwatch_portfolio::prelude::*;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{prepare, InputArgs};
use crate::output::{
    format_money, format_pct, format_rate, print_allocation, print_csv, print_divider,
    print_header, print_json, print_success, print_table, print_warning, status_marker, KeyValue,
};

/// Exit status when `--fail-on-breach` is set and a rule is breached.
const BREACH_EXIT_CODE: u8 = 2;

/// Arguments for the monitor command.
#[derive(Args, Debug)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Exit with status 2 if any rule is breached
    #[arg(long)]
    pub fail_on_breach: bool,
}

/// One row of the positions table.
#[derive(Debug, Serialize, Tabled)]
struct PositionRow {
    #[tabled(rename = "Bond")]
    bond_id: String,
    #[tabled(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Market Value")]
    market_value: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "YTM")]
    ytm: String,
    #[tabled(rename = "Mod Dur")]
    modified_duration: String,
    #[tabled(rename = "DV01")]
    dv01: String,
}

impl From<&Holding> for PositionRow {
    fn from(h: &Holding) -> Self {
        Self {
            bond_id: h.id().to_string(),
            sector: h.sector().to_string(),
            rating: h.bond.rating().to_string(),
            market_value: format_money(h.market_value_f64()),
            weight: format_pct(h.weight_pct),
            ytm: format_rate(h.ytm()),
            modified_duration: format!("{:.4}", h.modified_duration()),
            dv01: format_money(h.dv01()),
        }
    }
}

/// One row of the DV01 contribution table.
#[derive(Debug, Serialize, Tabled)]
struct ContributionRow {
    #[tabled(rename = "Bond")]
    bond_id: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "DV01")]
    dv01: String,
    #[tabled(rename = "Share of DV01")]
    share: String,
    #[tabled(rename = "Risk/Weight")]
    risk_to_weight: String,
}

/// One row of a sector or rating risk table.
#[derive(Debug, Serialize, Tabled)]
struct BucketRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Positions")]
    count: usize,
    #[tabled(rename = "Market Value")]
    market_value: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Avg YTM")]
    avg_ytm: String,
    #[tabled(rename = "Avg Mod Dur")]
    avg_modified_duration: String,
    #[tabled(rename = "DV01")]
    dv01: String,
}

fn bucket_rows<K: Ord + Copy>(
    buckets: &RiskBuckets<K>,
    label: impl Fn(K) -> String,
) -> Vec<BucketRow> {
    buckets
        .iter()
        .map(|(key, m)| BucketRow {
            bucket: label(key),
            count: m.count,
            market_value: format_money(m.market_value.to_f64().unwrap_or(0.0)),
            weight: format_pct(m.weight_pct),
            avg_ytm: format_rate(m.avg_ytm),
            avg_modified_duration: format!("{:.4}", m.avg_modified_duration),
            dv01: format_money(m.dv01),
        })
        .collect()
}

/// One verdict, flattened for CSV.
#[derive(Debug, Serialize)]
struct VerdictRow<'a> {
    rule_id: &'a str,
    label: &'a str,
    metric: String,
    severity: String,
    status: &'static str,
    observed: f64,
    threshold: f64,
    deviation: f64,
    detail: &'a str,
}

impl<'a> From<&'a Verdict> for VerdictRow<'a> {
    fn from(v: &'a Verdict) -> Self {
        Self {
            rule_id: &v.rule_id,
            label: &v.label,
            metric: v.metric.to_string(),
            severity: v.severity.to_string(),
            status: v.status(),
            observed: v.observed,
            threshold: v.threshold,
            deviation: v.deviation,
            detail: &v.detail,
        }
    }
}

/// Full JSON output of a monitor run.
#[derive(Debug, Serialize)]
struct MonitorOutput<'a> {
    valuation_date: NaiveDate,
    snapshot: &'a PortfolioSnapshot,
    sector_risk: RiskBuckets<Sector>,
    rating_risk: RiskBuckets<RatingBucket>,
    dv01_contributions: Dv01Contributions,
    report: &'a SurveillanceReport,
}

/// Execute the monitor command.
pub fn execute(args: MonitorArgs, format: OutputFormat, quiet: bool) -> Result<ExitCode> {
    let prepared = prepare(&args.inputs)?;
    let snapshot = &prepared.snapshot;
    let report = surveil(snapshot, &prepared.rules)?;

    match format {
        OutputFormat::Table => {
            if !quiet {
                print_analytics(prepared.valuation_date, snapshot, &prepared.rules)?;
            }
            print_surveillance(&report, quiet)?;
        }
        OutputFormat::Json => print_json(&MonitorOutput {
            valuation_date: prepared.valuation_date,
            snapshot,
            sector_risk: sector_risk(snapshot),
            rating_risk: rating_risk(snapshot),
            dv01_contributions: dv01_contributions(snapshot),
            report: &report,
        })?,
        OutputFormat::Csv => {
            let rows: Vec<VerdictRow> = report.verdicts.iter().map(VerdictRow::from).collect();
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => println!("{}", report.status_line()),
    }

    if args.fail_on_breach && !report.is_clear() {
        return Ok(ExitCode::from(BREACH_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

/// Ceiling set by the first sector rule for `sector`, if any.
fn sector_ceiling(rules: &[MandateRule], sector: Sector) -> Option<f64> {
    rules.iter().find_map(|r| match r.metric {
        MetricPath::Sector(s) if s == sector => r.comparator.bounds().ceiling,
        _ => None,
    })
}

fn print_analytics(
    valuation_date: NaiveDate,
    snapshot: &PortfolioSnapshot,
    rules: &[MandateRule],
) -> Result<()> {
    print_header(&format!(
        "Fixed Income Portfolio Monitor  |  Valuation Date: {valuation_date}"
    ));

    let kpis = vec![
        KeyValue::new("Total Portfolio Value", format_money(snapshot.total_market_value_f64())),
        KeyValue::new("Weighted Avg YTM", format_rate(snapshot.weighted_ytm())),
        KeyValue::new("Weighted Avg Coupon", format_rate(snapshot.weighted_coupon())),
        KeyValue::new(
            "Portfolio Duration",
            format!("{:.4} years", snapshot.weighted_modified_duration()),
        ),
        KeyValue::new(
            "Macaulay Duration",
            format!("{:.4} years", snapshot.weighted_macaulay_duration()),
        ),
        KeyValue::new("Portfolio DV01", format_money(snapshot.total_dv01())),
        KeyValue::new(
            "AAA / AA Weight",
            format_pct(snapshot.rating_at_or_above_weight(RatingBucket::AA)),
        ),
        KeyValue::new("Investment Grade", format_pct(snapshot.investment_grade_weight())),
    ];
    print_table(&kpis)?;

    print_header("Positions");
    let rows: Vec<PositionRow> = snapshot.holdings().iter().map(PositionRow::from).collect();
    print_table(&rows)?;

    print_header("Sector Allocation");
    for (sector, pct) in snapshot.sector_allocation() {
        print_allocation(sector.name(), *pct, sector_ceiling(rules, *sector));
    }

    print_header("Credit Quality");
    for (bucket, pct) in snapshot.rating_allocation() {
        print_allocation(bucket.label(), *pct, None);
    }

    print_header("Risk by Sector");
    print_table(&bucket_rows(&sector_risk(snapshot), |s| s.to_string()))?;

    print_header("Risk by Rating");
    print_table(&bucket_rows(&rating_risk(snapshot), |b| b.label().to_string()))?;

    print_header("DV01 Contribution");
    let contributions = dv01_contributions(snapshot);
    let rows: Vec<ContributionRow> = contributions
        .top_contributors(contributions.by_holding.len())
        .into_iter()
        .map(|c| ContributionRow {
            bond_id: c.id.clone(),
            weight: format_pct(c.weight_pct),
            dv01: format_money(c.contribution),
            share: format_pct(c.contribution_pct),
            risk_to_weight: format!("{:.2}x", c.risk_to_weight()),
        })
        .collect();
    print_table(&rows)?;

    Ok(())
}

fn print_surveillance(report: &SurveillanceReport, quiet: bool) -> Result<()> {
    if !quiet {
        print_header("Mandate Compliance Surveillance");
        let summary = vec![
            KeyValue::new("Total Checks", report.summary.total.to_string()),
            KeyValue::new("Passes", report.summary.passed.to_string()),
            KeyValue::new("Breaches", report.summary.breached.to_string()),
            KeyValue::new("Pass Rate", format_pct(report.pass_rate())),
        ];
        print_table(&summary)?;
    }

    if !report.breaches.is_empty() {
        print_header("Breaches");
        for breach in &report.breaches {
            if let Some(v) = report.verdict(&breach.rule_id) {
                println!("  {}  [{}] {}", status_marker(false), v.severity, v.label);
                println!("           → {}", v.detail);
            }
        }
    }

    if !quiet {
        print_header("Passes");
        for v in report.passes() {
            println!("  {}  {}", status_marker(true), v.label);
            println!("           → {}", v.detail);
        }
    }

    println!();
    print_divider();
    if report.is_clear() {
        print_success(&format!("SURVEILLANCE STATUS: {}", report.status_line()));
    } else {
        print_warning(&format!("SURVEILLANCE STATUS: {}", report.status_line()));
    }
    Ok(())
}
