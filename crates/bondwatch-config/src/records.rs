//! Bond position records as they appear in input files.

use bondwatch_core::types::{BondPosition, CreditRating, Sector};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Day-count basis used to turn a maturity date into years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// One holding row from a positions file.
///
/// The notional is `face_value × quantity`. Time to maturity comes either
/// directly from `years_to_maturity` or from `maturity` measured against the
/// valuation date; an explicit `years_to_maturity` wins when both are given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    /// Unique position identifier.
    pub bond_id: String,

    /// Issuer name.
    #[serde(default)]
    pub issuer: Option<String>,

    /// Sector name or code.
    pub sector: String,

    /// Credit rating in S&P, Moody's or Fitch notation.
    pub credit_rating: String,

    /// Face value per unit held.
    pub face_value: Decimal,

    /// Number of units held.
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,

    /// Annual coupon rate as a decimal fraction.
    pub coupon_rate: f64,

    /// Coupon payments per year.
    #[serde(default = "default_frequency")]
    pub coupon_frequency: u32,

    /// Maturity date.
    #[serde(default)]
    pub maturity: Option<NaiveDate>,

    /// Time to maturity in years.
    #[serde(default)]
    pub years_to_maturity: Option<f64>,

    /// Yield to maturity as a decimal fraction.
    pub ytm: f64,
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}

fn default_frequency() -> u32 {
    1
}

impl BondRecord {
    /// Returns the held notional (`face_value × quantity`).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.face_value * self.quantity
    }

    /// Resolves the time to maturity in years.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the record has neither
    /// `years_to_maturity` nor `maturity`, or has only `maturity` and no
    /// valuation date was supplied.
    pub fn years_to_maturity(&self, valuation_date: Option<NaiveDate>) -> ConfigResult<f64> {
        if let Some(years) = self.years_to_maturity {
            return Ok(years);
        }
        match (self.maturity, valuation_date) {
            (Some(maturity), Some(as_of)) => Ok(year_fraction(as_of, maturity)),
            (Some(_), None) => Err(ConfigError::validation(
                format!("{}.maturity", self.bond_id),
                "a valuation date is required to convert a maturity date",
            )),
            (None, _) => Err(ConfigError::validation(
                format!("{}.maturity", self.bond_id),
                "either maturity or years_to_maturity must be given",
            )),
        }
    }

    /// Converts the record into an engine position.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Engine` wrapping a `Configuration` error for an
    /// unknown sector or rating, or `ConfigError::Validation` if the time to
    /// maturity cannot be resolved. Economic terms are checked later by the
    /// pricer.
    pub fn into_position(self, valuation_date: Option<NaiveDate>) -> ConfigResult<BondPosition> {
        let sector: Sector = self.sector.parse()?;
        let rating: CreditRating = self.credit_rating.parse()?;
        let years = self.years_to_maturity(valuation_date)?;
        let face_value = self.notional();

        let mut builder = BondPosition::builder()
            .id(self.bond_id)
            .sector(sector)
            .rating(rating)
            .face_value(face_value)
            .coupon_rate(self.coupon_rate)
            .coupon_frequency(self.coupon_frequency)
            .years_to_maturity(years)
            .ytm(self.ytm);
        if let Some(issuer) = self.issuer {
            builder = builder.issuer(issuer);
        }
        Ok(builder.build()?)
    }
}

/// Years between two dates on an actual/365.25 basis, rounded to 2 decimals.
#[must_use]
pub fn year_fraction(from: NaiveDate, to: NaiveDate) -> f64 {
    let days = (to - from).num_days() as f64;
    (days / DAYS_PER_YEAR * 100.0).round() / 100.0
}

/// Converts records into positions, keeping input order.
///
/// # Errors
///
/// Returns the first conversion error in input order.
pub fn into_positions(
    records: Vec<BondRecord>,
    valuation_date: Option<NaiveDate>,
) -> ConfigResult<Vec<BondPosition>> {
    records
        .into_iter()
        .map(|record| record.into_position(valuation_date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondwatch_core::BondwatchError;
    use rust_decimal_macros::dec;

    fn record() -> BondRecord {
        BondRecord {
            bond_id: "CORP-JPM-5Y".to_string(),
            issuer: Some("JPMorgan Chase".to_string()),
            sector: "Financial".to_string(),
            credit_rating: "A".to_string(),
            face_value: dec!(1_000_000),
            quantity: dec!(5),
            coupon_rate: 0.051,
            coupon_frequency: 1,
            maturity: NaiveDate::from_ymd_opt(2030, 6, 30),
            years_to_maturity: None,
            ytm: 0.0525,
        }
    }

    #[test]
    fn test_year_fraction() {
        let from = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let to = NaiveDate::from_ymd_opt(2027, 3, 31).unwrap();
        // 730 days / 365.25 = 1.9986
        assert_eq!(year_fraction(from, to), 2.0);

        let to = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        assert_eq!(year_fraction(from, to), 0.5);
    }

    #[test]
    fn test_into_position_uses_notional() {
        let as_of = NaiveDate::from_ymd_opt(2025, 6, 30);
        let position = record().into_position(as_of).unwrap();

        assert_eq!(position.id(), "CORP-JPM-5Y");
        assert_eq!(position.face_value(), dec!(5_000_000));
        assert_eq!(position.sector(), Sector::Financial);
        assert_eq!(position.rating(), CreditRating::A);
        assert_eq!(position.years_to_maturity(), 5.0);
        assert_eq!(position.issuer(), Some("JPMorgan Chase"));
    }

    #[test]
    fn test_explicit_years_win() {
        let mut r = record();
        r.years_to_maturity = Some(4.25);
        assert_eq!(r.years_to_maturity(None).unwrap(), 4.25);
    }

    #[test]
    fn test_missing_maturity() {
        let mut r = record();
        assert!(matches!(
            r.years_to_maturity(None),
            Err(ConfigError::Validation { .. })
        ));

        r.maturity = None;
        let err = r.into_position(NaiveDate::from_ymd_opt(2025, 1, 1)).unwrap_err();
        assert!(err.to_string().contains("years_to_maturity"));
    }

    #[test]
    fn test_unknown_sector_is_configuration_error() {
        let mut r = record();
        r.sector = "Crypto".to_string();
        let err = r.into_position(NaiveDate::from_ymd_opt(2025, 1, 1)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Engine(BondwatchError::Configuration { .. })
        ));
    }
}
