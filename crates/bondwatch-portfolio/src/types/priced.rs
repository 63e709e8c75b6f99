//! Priced position type.

use bondwatch_analytics::risk::RiskMetrics;
use bondwatch_core::types::{BondPosition, RatingBucket, Sector};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bond position together with its present value and risk.
///
/// Market value is the present value rounded to cents; weights and
/// allocations are computed from it so that they add up exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedPosition {
    /// The underlying position.
    pub bond: BondPosition,

    /// Present value of all remaining cash flows.
    pub present_value: f64,

    /// Market value in currency units.
    pub market_value: Decimal,

    /// Duration and DV01.
    pub risk: RiskMetrics,
}

impl PricedPosition {
    /// Returns the position identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.bond.id()
    }

    /// Returns the sector.
    #[must_use]
    pub fn sector(&self) -> Sector {
        self.bond.sector()
    }

    /// Returns the rating bucket.
    #[must_use]
    pub fn rating_bucket(&self) -> RatingBucket {
        self.bond.rating_bucket()
    }

    /// Returns the market value as f64.
    #[must_use]
    pub fn market_value_f64(&self) -> f64 {
        self.market_value.to_f64().unwrap_or(0.0)
    }

    /// Returns the yield to maturity.
    #[must_use]
    pub fn ytm(&self) -> f64 {
        self.bond.ytm()
    }

    /// Returns the coupon rate.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.bond.coupon_rate()
    }

    /// Returns the Macaulay duration.
    #[must_use]
    pub fn macaulay_duration(&self) -> f64 {
        self.risk.macaulay_duration
    }

    /// Returns the modified duration.
    #[must_use]
    pub fn modified_duration(&self) -> f64 {
        self.risk.modified_duration
    }

    /// Returns the position DV01.
    #[must_use]
    pub fn dv01(&self) -> f64 {
        self.risk.dv01
    }
}
