//! Shared fixtures for unit tests.

use bondwatch_core::types::{BondPosition, CreditRating, Sector};
use rust_decimal_macros::dec;

use crate::pricing::price_positions;
use crate::snapshot::{aggregate, PortfolioSnapshot};
use crate::types::AnalyticsConfig;

/// Four par bonds, 10M total:
/// G1 Government AAA 4M 1y, G2 Government AA 2M 3y,
/// M1 Municipal AAA 2M 5y, F1 Financial BB 2M 10y.
pub(crate) fn sample_snapshot() -> PortfolioSnapshot {
    let terms = [
        ("G1", Sector::Government, CreditRating::AAA, dec!(4_000_000), 1.0),
        ("G2", Sector::Government, CreditRating::AA, dec!(2_000_000), 3.0),
        ("M1", Sector::Municipal, CreditRating::AAA, dec!(2_000_000), 5.0),
        ("F1", Sector::Financial, CreditRating::BB, dec!(2_000_000), 10.0),
    ];

    let bonds: Vec<BondPosition> = terms
        .into_iter()
        .map(|(id, sector, rating, face, years)| {
            BondPosition::builder()
                .id(id)
                .sector(sector)
                .rating(rating)
                .face_value(face)
                .coupon_rate(0.04)
                .years_to_maturity(years)
                .ytm(0.04)
                .build()
                .unwrap()
        })
        .collect();

    aggregate(price_positions(&bonds, &AnalyticsConfig::sequential()).unwrap()).unwrap()
}
