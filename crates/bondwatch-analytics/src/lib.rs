//! # Bondwatch Analytics
//!
//! Pricing and interest-rate risk for fixed-rate bond positions.
//!
//! - **Pricing**: cash flow schedules and present value at the bond's own yield
//! - **Risk**: Macaulay duration, modified duration, DV01
//!
//! Functions here are pure: they take a [`BondPosition`] and return derived
//! values without caching anything on it.
//!
//! ## Usage
//!
//! ```rust
//! use bondwatch_analytics::prelude::*;
//! use bondwatch_core::types::{BondPosition, CreditRating, Sector};
//! use rust_decimal_macros::dec;
//!
//! let bond = BondPosition::builder()
//!     .id("UST-2Y")
//!     .sector(Sector::Government)
//!     .rating(CreditRating::AAA)
//!     .face_value(dec!(10_000_000))
//!     .coupon_rate(0.045)
//!     .years_to_maturity(2.0)
//!     .ytm(0.0442)
//!     .build()
//!     .unwrap();
//!
//! let priced = price(&bond).unwrap();
//! let risk = compute_risk(&bond, &priced.schedule, priced.present_value).unwrap();
//! assert!(risk.modified_duration < risk.macaulay_duration);
//! ```
//!
//! [`BondPosition`]: bondwatch_core::types::BondPosition

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod pricing;
pub mod risk;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::pricing::{cash_flow_schedule, present_value, price, PriceResult};
    pub use crate::risk::{
        compute_risk, dv01_from_duration, macaulay_duration, modified_from_macaulay,
        price_change_from_duration, RiskMetrics, BASIS_POINT,
    };
}
