//! Portfolio snapshot: holdings plus aggregate metrics.

mod aggregate;

pub use aggregate::aggregate;
pub(crate) use aggregate::ratio;

use bondwatch_core::types::{RatingBucket, Sector};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Holding;

/// Aggregate view of a priced book at one point in time.
///
/// Built by [`aggregate`]; the only change allowed afterwards is stamping a
/// valuation date with [`PortfolioSnapshot::as_of`].
///
/// Allocation maps are in percent of market value (0-100) and only contain
/// groups that are present in the book. Lookups for absent groups return 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    holdings: Vec<Holding>,
    total_market_value: Decimal,
    weighted_ytm: f64,
    weighted_modified_duration: f64,
    weighted_macaulay_duration: f64,
    weighted_coupon: f64,
    total_dv01: f64,
    sector_allocation: BTreeMap<Sector, f64>,
    rating_allocation: BTreeMap<RatingBucket, f64>,
    valuation_date: Option<NaiveDate>,
}

impl PortfolioSnapshot {
    /// Stamps the snapshot with its valuation date.
    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.valuation_date = Some(date);
        self
    }

    /// Returns the valuation date, if stamped.
    #[must_use]
    pub fn valuation_date(&self) -> Option<NaiveDate> {
        self.valuation_date
    }

    /// Returns holdings in input order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if there are no holdings.
    ///
    /// Always false for a snapshot produced by [`aggregate`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Looks up a holding by position id.
    #[must_use]
    pub fn holding(&self, id: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id() == id)
    }

    /// Returns true if the snapshot holds a position with this id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.holding(id).is_some()
    }

    /// Returns total market value.
    #[must_use]
    pub fn total_market_value(&self) -> Decimal {
        self.total_market_value
    }

    /// Returns total market value as f64.
    #[must_use]
    pub fn total_market_value_f64(&self) -> f64 {
        self.total_market_value.to_f64().unwrap_or(0.0)
    }

    /// Returns the market-value weighted yield to maturity.
    #[must_use]
    pub fn weighted_ytm(&self) -> f64 {
        self.weighted_ytm
    }

    /// Returns the market-value weighted modified duration.
    #[must_use]
    pub fn weighted_modified_duration(&self) -> f64 {
        self.weighted_modified_duration
    }

    /// Returns the market-value weighted Macaulay duration.
    #[must_use]
    pub fn weighted_macaulay_duration(&self) -> f64 {
        self.weighted_macaulay_duration
    }

    /// Returns the market-value weighted coupon rate.
    #[must_use]
    pub fn weighted_coupon(&self) -> f64 {
        self.weighted_coupon
    }

    /// Returns the sum of position DV01s.
    #[must_use]
    pub fn total_dv01(&self) -> f64 {
        self.total_dv01
    }

    /// Returns the sector allocation map (% of MV).
    #[must_use]
    pub fn sector_allocation(&self) -> &BTreeMap<Sector, f64> {
        &self.sector_allocation
    }

    /// Returns the credit-quality allocation map (% of MV).
    #[must_use]
    pub fn rating_allocation(&self) -> &BTreeMap<RatingBucket, f64> {
        &self.rating_allocation
    }

    /// Returns the share of MV in a sector, 0 if the sector is absent.
    #[must_use]
    pub fn sector_weight(&self, sector: Sector) -> f64 {
        self.sector_allocation.get(&sector).copied().unwrap_or(0.0)
    }

    /// Returns the share of MV in a rating bucket, 0 if the bucket is absent.
    #[must_use]
    pub fn rating_weight(&self, bucket: RatingBucket) -> f64 {
        self.rating_allocation.get(&bucket).copied().unwrap_or(0.0)
    }

    /// Returns the share of MV rated at or above `floor`.
    #[must_use]
    pub fn rating_at_or_above_weight(&self, floor: RatingBucket) -> f64 {
        self.rating_allocation
            .iter()
            .filter(|(bucket, _)| bucket.is_at_or_above(floor))
            .map(|(_, pct)| pct)
            .sum()
    }

    /// Returns the share of MV in investment-grade buckets.
    #[must_use]
    pub fn investment_grade_weight(&self) -> f64 {
        self.rating_at_or_above_weight(RatingBucket::BBB)
    }
}
