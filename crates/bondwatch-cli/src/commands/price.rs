//! Price command implementation.
//!
//! Prices one bond from flags and shows its risk and cash-flow schedule.

use anyhow::Result;
use bondwatch_analytics::prelude::*;
use bondwatch_core::types::{BondPosition, CashFlowSchedule, CreditRating, Sector};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::output::{format_money, print_header, print_json, print_output, print_table, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Position identifier
    #[arg(long, default_value = "BOND")]
    pub id: String,

    /// Annual coupon rate (as percentage, e.g., 4.5 for 4.5%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Time to maturity in years
    #[arg(long)]
    pub years: f64,

    /// Yield to maturity (as percentage). Defaults to the coupon (par).
    #[arg(short, long)]
    pub ytm: Option<f64>,

    /// Face value
    #[arg(long, default_value = "100")]
    pub face: Decimal,

    /// Coupon frequency: 1=Annual, 2=SemiAnnual, 4=Quarterly, 12=Monthly
    #[arg(long, default_value = "1")]
    pub frequency: u32,

    /// Issuer sector
    #[arg(long, default_value = "Government")]
    pub sector: String,

    /// Credit rating
    #[arg(long, default_value = "AAA")]
    pub rating: String,

    /// Parallel yield shock for the price-change estimate, in basis points
    #[arg(long, default_value = "100")]
    pub shock_bp: u32,
}

/// One row of the cash-flow table.
#[derive(Debug, Serialize, Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Period")]
    period: f64,
    #[tabled(rename = "Time (y)")]
    time: f64,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Present Value")]
    present_value: String,
}

/// Duration estimate of the value change under a parallel yield shock.
#[derive(Debug, Serialize)]
struct RateShock {
    basis_points: u32,
    up: f64,
    down: f64,
}

impl RateShock {
    fn new(risk: &RiskMetrics, present_value: f64, basis_points: u32) -> Self {
        let change = f64::from(basis_points) * BASIS_POINT;
        Self {
            basis_points,
            up: price_change_from_duration(risk.modified_duration, present_value, change),
            down: price_change_from_duration(risk.modified_duration, present_value, -change),
        }
    }
}

/// JSON output of the price command.
#[derive(Debug, Serialize)]
struct PriceOutput<'a> {
    bond: &'a BondPosition,
    present_value: f64,
    price_per_100: f64,
    risk: RiskMetrics,
    rate_shock: RateShock,
    schedule: &'a CashFlowSchedule,
}

fn cash_flow_rows(schedule: &CashFlowSchedule, periodic_yield: f64) -> Vec<CashFlowRow> {
    schedule
        .iter()
        .map(|cf| CashFlowRow {
            period: cf.period,
            time: cf.time,
            kind: cf.kind.to_string(),
            amount: format_money(cf.amount),
            present_value: format_money(cf.amount / (1.0 + periodic_yield).powf(cf.period)),
        })
        .collect()
}

/// Execute the price command.
pub fn execute(args: PriceArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let sector: Sector = args.sector.parse()?;
    let rating: CreditRating = args.rating.parse()?;
    let ytm_pct = args.ytm.unwrap_or(args.coupon);

    let bond = BondPosition::builder()
        .id(args.id)
        .sector(sector)
        .rating(rating)
        .face_value(args.face)
        .coupon_rate(args.coupon / 100.0)
        .coupon_frequency(args.frequency)
        .years_to_maturity(args.years)
        .ytm(ytm_pct / 100.0)
        .build()?;

    let priced = price(&bond)?;
    let risk = compute_risk(&bond, &priced.schedule, priced.present_value)?;
    let per_100 = priced.price_per_100(bond.face_value_f64());
    let shock = RateShock::new(&risk, priced.present_value, args.shock_bp);

    match format {
        OutputFormat::Table => {
            let results = vec![
                KeyValue::new("Bond", bond.id()),
                KeyValue::new("Coupon", format!("{}% ({}x/yr)", args.coupon, bond.coupon_frequency())),
                KeyValue::new("Years to Maturity", format!("{}", bond.years_to_maturity())),
                KeyValue::new("Yield to Maturity", format!("{ytm_pct}%")),
                KeyValue::new("Face Value", format_money(bond.face_value_f64())),
                KeyValue::new("Present Value", format_money(priced.present_value)),
                KeyValue::new("Price per 100", format!("{per_100:.6}")),
                KeyValue::new("Macaulay Duration", format!("{:.4} years", risk.macaulay_duration)),
                KeyValue::new("Modified Duration", format!("{:.4}", risk.modified_duration)),
                KeyValue::new("DV01", format_money(risk.dv01)),
                KeyValue::new(
                    format!("Price Change (+{}bp)", shock.basis_points),
                    format_money(shock.up),
                ),
                KeyValue::new(
                    format!("Price Change (-{}bp)", shock.basis_points),
                    format_money(shock.down),
                ),
            ];
            print_header("Bond Pricing Results");
            print_table(&results)?;

            if !quiet {
                print_header("Cash Flows");
                print_table(&cash_flow_rows(&priced.schedule, bond.periodic_yield()))?;
            }
        }
        OutputFormat::Json => print_json(&PriceOutput {
            bond: &bond,
            present_value: priced.present_value,
            price_per_100: per_100,
            risk,
            rate_shock: shock,
            schedule: &priced.schedule,
        })?,
        OutputFormat::Csv => {
            print_output(&cash_flow_rows(&priced.schedule, bond.periodic_yield()), format)?;
        }
        OutputFormat::Minimal => println!("{:.2}", priced.present_value),
    }

    Ok(())
}
