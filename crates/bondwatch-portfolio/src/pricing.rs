//! Pricing pipeline from bond positions to priced positions.

use bondwatch_analytics::pricing::price;
use bondwatch_analytics::risk::compute_risk;
use bondwatch_core::{BondPosition, BondwatchError, BondwatchResult};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::parallel::map_book;
use crate::types::{AnalyticsConfig, PricedPosition};

/// Prices one position and measures its risk.
///
/// The cash flow schedule is generated once and shared between pricing and
/// duration.
///
/// # Errors
///
/// Returns `BondwatchError::Validation` if the position's terms are invalid
/// or its present value is not positive.
pub fn price_position(bond: &BondPosition) -> BondwatchResult<PricedPosition> {
    let priced = price(bond)?;
    let risk = compute_risk(bond, &priced.schedule, priced.present_value)?;

    let market_value = Decimal::from_f64(priced.present_value)
        .map(|mv| mv.round_dp(2))
        .ok_or_else(|| {
            BondwatchError::validation(
                bond.id(),
                format!(
                    "present value {} is not representable",
                    priced.present_value
                ),
            )
        })?;

    debug!(
        position = bond.id(),
        present_value = priced.present_value,
        modified_duration = risk.modified_duration,
        dv01 = risk.dv01,
        "Priced position"
    );

    Ok(PricedPosition {
        bond: bond.clone(),
        present_value: priced.present_value,
        market_value,
        risk,
    })
}

/// Prices a book of positions, preserving input order.
///
/// The book is priced in the mode [`AnalyticsConfig::mode_for`] picks for
/// its size; the output is the same in either mode.
///
/// # Errors
///
/// Returns the error of the first invalid position in input order.
pub fn price_positions(
    bonds: &[BondPosition],
    config: &AnalyticsConfig,
) -> BondwatchResult<Vec<PricedPosition>> {
    let mode = config.mode_for(bonds.len());
    let priced = map_book(bonds, config, price_position)
        .into_iter()
        .collect::<BondwatchResult<Vec<_>>>()?;

    info!(
        positions = priced.len(),
        %mode,
        "Priced book"
    );

    Ok(priced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondwatch_core::{CreditRating, Sector};
    use rust_decimal_macros::dec;

    fn bond(id: &str, years: f64) -> BondPosition {
        BondPosition::builder()
            .id(id)
            .sector(Sector::Government)
            .rating(CreditRating::AAA)
            .face_value(dec!(1_000_000))
            .coupon_rate(0.04)
            .years_to_maturity(years)
            .ytm(0.04)
            .build()
            .unwrap()
    }

    #[test]
    fn test_price_position_rounds_market_value() {
        let priced = price_position(&bond("A", 3.0)).unwrap();
        assert_eq!(priced.market_value, dec!(1_000_000.00));
        assert_relative_eq!(priced.present_value, 1_000_000.0, epsilon = 1e-6);
        assert!(priced.risk.dv01 > 0.0);
        assert_eq!(priced.id(), "A");
    }

    #[test]
    fn test_price_positions_preserves_order() {
        let bonds = vec![bond("A", 1.0), bond("B", 2.0), bond("C", 3.0)];
        let priced = price_positions(&bonds, &AnalyticsConfig::sequential()).unwrap();

        let ids: Vec<&str> = priced.iter().map(PricedPosition::id).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_price_positions_reports_first_invalid() {
        let bonds = vec![bond("A", 1.0), bond("BAD", -1.0), bond("WORSE", 0.0)];
        let err = price_positions(&bonds, &AnalyticsConfig::sequential()).unwrap_err();
        assert_eq!(
            err,
            BondwatchError::validation("BAD", "time to maturity must be positive, got -1")
        );
    }
}
