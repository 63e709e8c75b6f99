//! Built-in sample book.
//!
//! Five holdings across government, financial, technology and municipal
//! issuers, used when no positions file is given.

use bondwatch_core::types::BondPosition;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ConfigResult;
use crate::records::{into_positions, BondRecord};

#[allow(clippy::too_many_arguments)]
fn record(
    bond_id: &str,
    issuer: &str,
    quantity: i64,
    coupon_rate: f64,
    maturity: (i32, u32, u32),
    ytm: f64,
    credit_rating: &str,
    sector: &str,
) -> BondRecord {
    BondRecord {
        bond_id: bond_id.to_string(),
        issuer: Some(issuer.to_string()),
        sector: sector.to_string(),
        credit_rating: credit_rating.to_string(),
        face_value: Decimal::from(1_000_000),
        quantity: Decimal::from(quantity),
        coupon_rate,
        coupon_frequency: 1,
        maturity: NaiveDate::from_ymd_opt(maturity.0, maturity.1, maturity.2),
        years_to_maturity: None,
        ytm,
    }
}

/// Returns the sample book's records.
#[must_use]
pub fn sample_records() -> Vec<BondRecord> {
    vec![
        record("UST-2Y", "US Treasury", 10, 0.0450, (2027, 3, 31), 0.0442, "AAA", "Government"),
        record("UST-10Y", "US Treasury", 8, 0.0425, (2035, 3, 31), 0.0438, "AAA", "Government"),
        record("CORP-JPM-5Y", "JPMorgan Chase", 5, 0.0510, (2030, 6, 30), 0.0525, "A", "Financial"),
        record("CORP-MSFT-7Y", "Microsoft", 6, 0.0390, (2032, 9, 30), 0.0405, "AAA", "Technology"),
        record("MUNI-NYC-8Y", "NYC Municipal", 4, 0.0320, (2033, 12, 31), 0.0335, "AA", "Municipal"),
    ]
}

/// Returns the sample book as positions valued on `valuation_date`.
///
/// # Errors
///
/// Propagates record conversion errors.
pub fn sample_positions(valuation_date: NaiveDate) -> ConfigResult<Vec<BondPosition>> {
    into_positions(sample_records(), Some(valuation_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sample_book() {
        let as_of = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let positions = sample_positions(as_of).unwrap();

        assert_eq!(positions.len(), 5);
        assert_eq!(positions[0].id(), "UST-2Y");
        assert_eq!(positions[0].face_value(), dec!(10_000_000));
        assert_eq!(positions[0].years_to_maturity(), 2.0);
        assert_eq!(positions[1].years_to_maturity(), 10.0);

        let total: Decimal = positions.iter().map(BondPosition::face_value).sum();
        assert_eq!(total, dec!(33_000_000));
    }
}
