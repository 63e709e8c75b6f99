//! Aggregation of priced positions into a snapshot.

use bondwatch_core::{BondwatchError, BondwatchResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use tracing::info;

use super::PortfolioSnapshot;
use crate::types::{Holding, PricedPosition};

/// Aggregates priced positions into a portfolio snapshot.
///
/// Weights are market value over total market value. Weighted averages are
/// `Σ weight × metric`; total DV01 is the plain sum of position DV01s in
/// input order.
///
/// # Errors
///
/// - `BondwatchError::EmptyPortfolio` if `positions` is empty
/// - `BondwatchError::Validation` if two positions share an id or the total
///   market value is not positive
///
/// # Example
///
/// ```rust
/// use bondwatch_core::types::{BondPosition, CreditRating, Sector};
/// use bondwatch_portfolio::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let bonds = vec![
///     BondPosition::builder()
///         .id("GOV")
///         .sector(Sector::Government)
///         .rating(CreditRating::AAA)
///         .face_value(dec!(3_000_000))
///         .coupon_rate(0.04)
///         .years_to_maturity(2.0)
///         .ytm(0.04)
///         .build()
///         .unwrap(),
///     BondPosition::builder()
///         .id("FIN")
///         .sector(Sector::Financial)
///         .rating(CreditRating::A)
///         .face_value(dec!(1_000_000))
///         .coupon_rate(0.05)
///         .years_to_maturity(5.0)
///         .ytm(0.05)
///         .build()
///         .unwrap(),
/// ];
///
/// let priced = price_positions(&bonds, &AnalyticsConfig::default()).unwrap();
/// let snapshot = aggregate(priced).unwrap();
///
/// assert_eq!(snapshot.sector_weight(Sector::Government), 75.0);
/// assert_eq!(snapshot.sector_weight(Sector::Utility), 0.0);
/// ```
pub fn aggregate(positions: Vec<PricedPosition>) -> BondwatchResult<PortfolioSnapshot> {
    if positions.is_empty() {
        return Err(BondwatchError::EmptyPortfolio);
    }

    let mut seen = HashSet::with_capacity(positions.len());
    for p in &positions {
        if !seen.insert(p.id()) {
            return Err(BondwatchError::validation(
                p.id(),
                "duplicate position id in portfolio",
            ));
        }
    }

    let total_mv: Decimal = positions.iter().map(|p| p.market_value).sum();
    if total_mv <= Decimal::ZERO {
        return Err(BondwatchError::validation(
            "portfolio",
            format!("total market value must be positive, got {total_mv}"),
        ));
    }

    let holdings: Vec<Holding> = positions
        .into_iter()
        .map(|position| {
            let weight = ratio(position.market_value, total_mv);
            let weight_pct = ratio(position.market_value * Decimal::ONE_HUNDRED, total_mv);
            Holding {
                position,
                weight,
                weight_pct,
            }
        })
        .collect();

    let weighted = |metric: fn(&PricedPosition) -> f64| -> f64 {
        holdings.iter().map(|h| h.weight * metric(&h.position)).sum()
    };
    let weighted_ytm = weighted(PricedPosition::ytm);
    let weighted_modified_duration = weighted(PricedPosition::modified_duration);
    let weighted_macaulay_duration = weighted(PricedPosition::macaulay_duration);
    let weighted_coupon = weighted(PricedPosition::coupon_rate);
    let total_dv01: f64 = holdings.iter().map(|h| h.dv01()).sum();

    let sector_allocation = allocation(&holdings, total_mv, |h| h.sector());
    let rating_allocation = allocation(&holdings, total_mv, |h| h.rating_bucket());

    info!(
        positions = holdings.len(),
        total_market_value = %total_mv,
        weighted_modified_duration,
        total_dv01,
        "Aggregated portfolio"
    );

    Ok(PortfolioSnapshot {
        holdings,
        total_market_value: total_mv,
        weighted_ytm,
        weighted_modified_duration,
        weighted_macaulay_duration,
        weighted_coupon,
        total_dv01,
        sector_allocation,
        rating_allocation,
        valuation_date: None,
    })
}

/// Sums market value per group and converts to percent of total.
fn allocation<K: Ord>(
    holdings: &[Holding],
    total_mv: Decimal,
    key: impl Fn(&Holding) -> K,
) -> BTreeMap<K, f64> {
    let mut sums: BTreeMap<K, Decimal> = BTreeMap::new();
    for h in holdings {
        *sums.entry(key(h)).or_insert(Decimal::ZERO) += h.market_value;
    }

    sums.into_iter()
        .map(|(k, mv)| (k, ratio(mv * Decimal::ONE_HUNDRED, total_mv)))
        .collect()
}

pub(crate) fn ratio(part: Decimal, total: Decimal) -> f64 {
    (part / total).to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price_position;
    use approx::assert_relative_eq;
    use bondwatch_core::types::{BondPosition, CreditRating, RatingBucket, Sector};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn par_bond(id: &str, face: Decimal, rate: f64, years: f64, sector: Sector, rating: CreditRating) -> PricedPosition {
        let bond = BondPosition::builder()
            .id(id)
            .sector(sector)
            .rating(rating)
            .face_value(face)
            .coupon_rate(rate)
            .years_to_maturity(years)
            .ytm(rate)
            .build()
            .unwrap();
        price_position(&bond).unwrap()
    }

    fn book() -> Vec<PricedPosition> {
        vec![
            par_bond("GOV", dec!(6_000_000), 0.04, 2.0, Sector::Government, CreditRating::AAA),
            par_bond("FIN", dec!(3_000_000), 0.05, 5.0, Sector::Financial, CreditRating::APlus),
            par_bond("MUNI", dec!(1_000_000), 0.03, 8.0, Sector::Municipal, CreditRating::AAMinus),
        ]
    }

    #[test]
    fn test_empty_portfolio() {
        assert_eq!(aggregate(Vec::new()).unwrap_err(), BondwatchError::EmptyPortfolio);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut positions = book();
        positions.push(positions[0].clone());
        let err = aggregate(positions).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("GOV"));
    }

    #[test]
    fn test_weights_and_allocations() {
        let snapshot = aggregate(book()).unwrap();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.total_market_value(), dec!(10_000_000));

        let weights: Vec<f64> = snapshot.holdings().iter().map(|h| h.weight).collect();
        assert_eq!(weights, vec![0.6, 0.3, 0.1]);
        assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-12);

        assert_eq!(snapshot.sector_weight(Sector::Government), 60.0);
        assert_eq!(snapshot.sector_weight(Sector::Financial), 30.0);
        assert_eq!(snapshot.sector_weight(Sector::Technology), 0.0);
        assert_eq!(snapshot.sector_allocation().len(), 3);

        assert_eq!(snapshot.rating_weight(RatingBucket::A), 30.0);
        assert_eq!(snapshot.rating_weight(RatingBucket::BB), 0.0);
        assert_relative_eq!(snapshot.rating_at_or_above_weight(RatingBucket::AA), 70.0, epsilon = 1e-12);
        assert_relative_eq!(snapshot.investment_grade_weight(), 100.0, epsilon = 1e-12);

        let total: f64 = snapshot.rating_allocation().values().sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_weighted_averages() {
        let positions = book();
        let expected_duration = 0.6 * positions[0].modified_duration()
            + 0.3 * positions[1].modified_duration()
            + 0.1 * positions[2].modified_duration();
        let expected_dv01: f64 = positions.iter().map(PricedPosition::dv01).sum();

        let snapshot = aggregate(positions).unwrap();

        assert_relative_eq!(snapshot.weighted_ytm(), 0.6 * 0.04 + 0.3 * 0.05 + 0.1 * 0.03, epsilon = 1e-12);
        assert_relative_eq!(snapshot.weighted_coupon(), snapshot.weighted_ytm(), epsilon = 1e-12);
        assert_relative_eq!(snapshot.weighted_modified_duration(), expected_duration, epsilon = 1e-12);
        assert!(snapshot.weighted_macaulay_duration() > snapshot.weighted_modified_duration());
        assert_eq!(snapshot.total_dv01(), expected_dv01);
    }

    #[test]
    fn test_lookup_and_valuation_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let snapshot = aggregate(book()).unwrap().as_of(date);

        assert_eq!(snapshot.valuation_date(), Some(date));
        assert!(snapshot.contains("FIN"));
        assert!(!snapshot.contains("fin"));
        assert_eq!(snapshot.holding("MUNI").map(|h| h.weight_pct), Some(10.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = aggregate(book()).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["sector_allocation"]["Government"], 60.0);
        assert!(json["valuation_date"].is_null());
    }
}
