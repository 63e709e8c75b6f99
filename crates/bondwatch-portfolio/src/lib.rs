//! # Bondwatch Portfolio
//!
//! Portfolio aggregation for fixed income positions.
//!
//! This crate turns a book of [`BondPosition`]s into a
//! [`PortfolioSnapshot`]:
//!
//! - **Pricing pipeline**: present value and risk per position, optionally
//!   parallel for large books
//! - **Aggregation**: market-value weights, weighted YTM / duration / coupon,
//!   total DV01
//! - **Allocation**: sector and credit-quality shares of market value
//! - **Reporting views**: risk by sector and rating bucket, and DV01
//!   contribution per holding
//!
//! ## Design Philosophy
//!
//! All functions are pure: inputs are explicit and nothing is cached. A
//! snapshot is built once and read many times by the compliance engine and
//! the reporting layer.
//!
//! ## Example
//!
//! ```rust
//! use bondwatch_core::types::{BondPosition, CreditRating, Sector};
//! use bondwatch_portfolio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bonds = vec![BondPosition::builder()
//!     .id("UST-2Y")
//!     .sector(Sector::Government)
//!     .rating(CreditRating::AAA)
//!     .face_value(dec!(10_000_000))
//!     .coupon_rate(0.045)
//!     .coupon_frequency(2)
//!     .years_to_maturity(2.0)
//!     .ytm(0.0442)
//!     .build()
//!     .unwrap()];
//!
//! let priced = price_positions(&bonds, &AnalyticsConfig::default()).unwrap();
//! let snapshot = aggregate(priced).unwrap();
//!
//! assert_eq!(snapshot.holdings()[0].weight, 1.0);
//! assert_eq!(snapshot.sector_weight(Sector::Government), 100.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable parallel pricing using rayon (recommended for
//!   books above 100 positions)
//!
//! [`BondPosition`]: bondwatch_core::types::BondPosition

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod bucketing;
pub mod contribution;
mod parallel;
pub mod pricing;
pub mod snapshot;
pub mod types;

#[cfg(test)]
mod test_support;

pub use snapshot::{aggregate, PortfolioSnapshot};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bucketing::{rating_risk, sector_risk, BucketMetrics, RiskBuckets};
    pub use crate::contribution::{dv01_contributions, Dv01Contributions, HoldingContribution};
    pub use crate::pricing::{price_position, price_positions};
    pub use crate::snapshot::{aggregate, PortfolioSnapshot};
    pub use crate::types::{AnalyticsConfig, Holding, PricedPosition, PricingMode};
}
