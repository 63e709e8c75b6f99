//! Rate and credit risk grouped by sector and by rating bucket.
//!
//! The snapshot's allocation maps give each group's share of market value.
//! A [`RiskBuckets`] view adds what sits behind that share: how many
//! positions, their blended yield and duration, and the DV01 they carry.
//! Group weights are computed the same way as the allocation maps, so the
//! two views always agree.
//!
//! ```rust,ignore
//! use bondwatch_portfolio::bucketing::sector_risk;
//!
//! for (sector, risk) in sector_risk(&snapshot).iter() {
//!     println!("{sector}: {} positions, DV01 {:.2}", risk.count, risk.dv01);
//! }
//! ```

use bondwatch_core::types::{RatingBucket, Sector};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::snapshot::{ratio, PortfolioSnapshot};
use crate::types::Holding;

/// Risk held in one group of positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketMetrics {
    /// Number of positions in the group.
    pub count: usize,

    /// Market value of the group.
    pub market_value: Decimal,

    /// Share of portfolio market value (0-100).
    pub weight_pct: f64,

    /// Market-value weighted YTM of the group.
    pub avg_ytm: f64,

    /// Market-value weighted modified duration of the group.
    pub avg_modified_duration: f64,

    /// Sum of the group's position DV01s.
    pub dv01: f64,
}

/// Running sums for one group; weights are portfolio weights.
#[derive(Default)]
struct Tally {
    count: usize,
    market_value: Decimal,
    weight: f64,
    weighted_ytm: f64,
    weighted_duration: f64,
    dv01: f64,
}

impl Tally {
    fn add(&mut self, h: &Holding) {
        self.count += 1;
        self.market_value += h.market_value;
        self.weight += h.weight;
        self.weighted_ytm += h.weight * h.ytm();
        self.weighted_duration += h.weight * h.modified_duration();
        self.dv01 += h.dv01();
    }

    fn finish(self, total_mv: Decimal) -> BucketMetrics {
        let blend = |sum: f64| if self.weight > 0.0 { sum / self.weight } else { 0.0 };
        BucketMetrics {
            count: self.count,
            market_value: self.market_value,
            weight_pct: ratio(self.market_value * Decimal::ONE_HUNDRED, total_mv),
            avg_ytm: blend(self.weighted_ytm),
            avg_modified_duration: blend(self.weighted_duration),
            dv01: self.dv01,
        }
    }
}

/// Snapshot risk keyed by a classification, in key order.
///
/// Only groups present in the book appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RiskBuckets<K: Ord> {
    buckets: BTreeMap<K, BucketMetrics>,
}

impl<K: Ord + Copy> RiskBuckets<K> {
    /// Groups the snapshot's holdings by `key`.
    pub fn group(snapshot: &PortfolioSnapshot, key: impl Fn(&Holding) -> K) -> Self {
        let mut tallies: BTreeMap<K, Tally> = BTreeMap::new();
        for h in snapshot.holdings() {
            tallies.entry(key(h)).or_default().add(h);
        }

        let total_mv = snapshot.total_market_value();
        Self {
            buckets: tallies
                .into_iter()
                .map(|(k, tally)| (k, tally.finish(total_mv)))
                .collect(),
        }
    }

    /// Returns the metrics of one group, if present.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&BucketMetrics> {
        self.buckets.get(&key)
    }

    /// Iterates over groups in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &BucketMetrics)> {
        self.buckets.iter().map(|(k, m)| (*k, m))
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the group carrying the most DV01.
    #[must_use]
    pub fn largest_dv01(&self) -> Option<(K, &BucketMetrics)> {
        self.iter().max_by(|a, b| a.1.dv01.total_cmp(&b.1.dv01))
    }
}

/// Risk per issuer sector.
#[must_use]
pub fn sector_risk(snapshot: &PortfolioSnapshot) -> RiskBuckets<Sector> {
    RiskBuckets::group(snapshot, |h| h.sector())
}

/// Risk per rating bucket, from highest quality down.
#[must_use]
pub fn rating_risk(snapshot: &PortfolioSnapshot) -> RiskBuckets<RatingBucket> {
    RiskBuckets::group(snapshot, |h| h.rating_bucket())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_snapshot;
    use approx::assert_relative_eq;

    #[test]
    fn test_sector_risk_matches_allocation() {
        let snapshot = sample_snapshot();
        let risk = sector_risk(&snapshot);

        assert_eq!(risk.len(), 3);
        let gov = risk.get(Sector::Government).unwrap();
        assert_eq!(gov.count, 2);
        assert_eq!(gov.weight_pct, 60.0);
        assert!(risk.get(Sector::Energy).is_none());

        for (sector, metrics) in risk.iter() {
            assert_eq!(metrics.weight_pct, snapshot.sector_weight(sector));
        }
        let dv01: f64 = risk.iter().map(|(_, m)| m.dv01).sum();
        assert_relative_eq!(dv01, snapshot.total_dv01(), epsilon = 1e-9);
    }

    #[test]
    fn test_group_duration_is_blended_within_group() {
        let snapshot = sample_snapshot();
        let risk = sector_risk(&snapshot);

        let g1 = snapshot.holding("G1").unwrap().modified_duration();
        let g2 = snapshot.holding("G2").unwrap().modified_duration();
        let gov = risk.get(Sector::Government).unwrap();
        assert_relative_eq!(gov.avg_modified_duration, (4.0 * g1 + 2.0 * g2) / 6.0, epsilon = 1e-12);
        assert_relative_eq!(gov.avg_ytm, 0.04, epsilon = 1e-12);

        // Group blends recombine into the portfolio figure
        let recombined: f64 = risk
            .iter()
            .map(|(_, m)| m.weight_pct / 100.0 * m.avg_modified_duration)
            .sum();
        assert_relative_eq!(recombined, snapshot.weighted_modified_duration(), epsilon = 1e-9);
    }

    #[test]
    fn test_rating_risk_order_and_largest_dv01() {
        let snapshot = sample_snapshot();
        let risk = rating_risk(&snapshot);

        let buckets: Vec<RatingBucket> = risk.iter().map(|(b, _)| b).collect();
        assert_eq!(buckets, vec![RatingBucket::AAA, RatingBucket::AA, RatingBucket::BB]);
        assert_eq!(risk.get(RatingBucket::BB).unwrap().weight_pct, 20.0);

        // The 10y BB bond carries more DV01 than 6M of AAA in 1y and 5y paper
        let (bucket, _) = risk.largest_dv01().unwrap();
        assert_eq!(bucket, RatingBucket::BB);
    }

    #[test]
    fn test_serializes_as_map() {
        let json = serde_json::to_value(sector_risk(&sample_snapshot())).unwrap();
        assert_eq!(json["Government"]["count"], 2);
        assert_eq!(json["Financial"]["weight_pct"], 20.0);
    }
}
