//! # Bondwatch Compliance
//!
//! Mandate compliance surveillance for fixed income portfolios.
//!
//! - **Rules**: [`MandateRule`] = metric path + comparator + severity
//! - **Engine**: [`evaluate`] tests every rule against a
//!   [`PortfolioSnapshot`], one [`Verdict`] per rule
//! - **Report**: [`build_report`] tallies verdicts and ranks breaches by
//!   absolute deviation
//!
//! Deviations share one sign convention across all comparators: positive
//! means above the ceiling, negative means below the floor.
//!
//! ## Example
//!
//! ```rust
//! use bondwatch_compliance::prelude::*;
//! use bondwatch_core::types::{BondPosition, CreditRating, Sector};
//! use bondwatch_portfolio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bonds = vec![BondPosition::builder()
//!     .id("UST-5Y")
//!     .sector(Sector::Government)
//!     .rating(CreditRating::AAA)
//!     .face_value(dec!(1_000_000))
//!     .coupon_rate(0.04)
//!     .years_to_maturity(5.0)
//!     .ytm(0.04)
//!     .build()
//!     .unwrap()];
//! let snapshot = aggregate(price_positions(&bonds, &AnalyticsConfig::default()).unwrap()).unwrap();
//!
//! let rules = vec![MandateRule::new(
//!     "GOV-CAP",
//!     "sector:Government:% of MV".parse().unwrap(),
//!     Comparator::AtMost(50.0),
//! )];
//!
//! let report = surveil(&snapshot, &rules).unwrap();
//! assert_eq!(report.summary.breached, 1);
//! assert_eq!(report.breaches[0].deviation, 50.0);
//! ```
//!
//! [`PortfolioSnapshot`]: bondwatch_portfolio::PortfolioSnapshot

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod engine;
pub mod report;
pub mod rule;
pub mod verdict;

use bondwatch_core::BondwatchResult;
use bondwatch_portfolio::PortfolioSnapshot;

pub use engine::{evaluate, observe, validate_rules};
pub use report::{build_report, Breach, ReportSummary, SurveillanceReport};
pub use rule::{Comparator, MandateRule, MetricPath, Severity};
pub use verdict::Verdict;

/// Evaluates rules and builds the report in one step.
///
/// # Errors
///
/// See [`evaluate`].
pub fn surveil(
    snapshot: &PortfolioSnapshot,
    rules: &[MandateRule],
) -> BondwatchResult<SurveillanceReport> {
    evaluate(snapshot, rules).map(build_report)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{evaluate, observe, validate_rules};
    pub use crate::report::{build_report, Breach, ReportSummary, SurveillanceReport};
    pub use crate::rule::{
        Comparator, MandateRule, MetricPath, MetricUnit, PortfolioMetric, PositionMetric,
        Severity,
    };
    pub use crate::surveil;
    pub use crate::verdict::Verdict;
}
