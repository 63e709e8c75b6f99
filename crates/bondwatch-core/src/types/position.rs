//! Bond position type.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CreditRating, RatingBucket, Sector};
use crate::error::{BondwatchError, BondwatchResult};

/// Largest number of coupon periods a position may span.
///
/// Covers a monthly-pay bond out to 800 years; anything beyond is a data
/// error, and the cash-flow schedule is sized from this count.
pub const MAX_COUPON_PERIODS: u32 = 9_600;

/// A fixed-rate bond held in the portfolio.
///
/// Positions are immutable once built. The builder only checks that the
/// required fields are present; the economic terms (maturity, frequency,
/// face value) are validated by the pricer, where they are first used.
///
/// # Example
///
/// ```rust
/// use bondwatch_core::types::{BondPosition, CreditRating, Sector};
/// use rust_decimal_macros::dec;
///
/// let bond = BondPosition::builder()
///     .id("UST-2Y")
///     .sector(Sector::Government)
///     .rating(CreditRating::AAA)
///     .face_value(dec!(10_000_000))
///     .coupon_rate(0.045)
///     .coupon_frequency(2)
///     .years_to_maturity(2.0)
///     .ytm(0.0442)
///     .build()
///     .unwrap();
///
/// assert_eq!(bond.id(), "UST-2Y");
/// assert_eq!(bond.periodic_yield(), 0.0221);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondPosition {
    id: String,
    issuer: Option<String>,
    sector: Sector,
    rating: CreditRating,
    face_value: Decimal,
    coupon_rate: f64,
    coupon_frequency: u32,
    years_to_maturity: f64,
    ytm: f64,
}

impl BondPosition {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondPositionBuilder {
        BondPositionBuilder::new()
    }

    /// Returns the position identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the issuer name, if known.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Returns the issuer sector.
    #[must_use]
    pub fn sector(&self) -> Sector {
        self.sector
    }

    /// Returns the credit rating.
    #[must_use]
    pub fn rating(&self) -> CreditRating {
        self.rating
    }

    /// Returns the rating bucket.
    #[must_use]
    pub fn rating_bucket(&self) -> RatingBucket {
        self.rating.bucket()
    }

    /// Returns the position notional (face value held).
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Returns the face value as f64 for pricing arithmetic.
    #[must_use]
    pub fn face_value_f64(&self) -> f64 {
        self.face_value.to_f64().unwrap_or(f64::NAN)
    }

    /// Returns the annual coupon rate as a decimal fraction (0.045 = 4.5%).
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Returns the number of coupon payments per year.
    #[must_use]
    pub fn coupon_frequency(&self) -> u32 {
        self.coupon_frequency
    }

    /// Returns the time to maturity in years.
    #[must_use]
    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    /// Returns the annualized yield to maturity as a decimal fraction.
    #[must_use]
    pub fn ytm(&self) -> f64 {
        self.ytm
    }

    /// Returns the yield per coupon period (`ytm / frequency`).
    ///
    /// Returns NaN when the frequency is zero; the pricer rejects such
    /// positions before this value is used.
    #[must_use]
    pub fn periodic_yield(&self) -> f64 {
        self.ytm / f64::from(self.coupon_frequency)
    }

    /// Returns the number of coupon periods to maturity (may be fractional).
    #[must_use]
    pub fn period_count(&self) -> f64 {
        f64::from(self.coupon_frequency) * self.years_to_maturity
    }

    /// Checks the economic terms required for pricing.
    ///
    /// # Errors
    ///
    /// Returns [`BondwatchError::Validation`] when time to maturity, coupon
    /// frequency or face value is non-positive, the position spans more than
    /// [`MAX_COUPON_PERIODS`] coupon periods, the coupon rate is negative, or
    /// the yield cannot be used as a discount rate.
    pub fn validate(&self) -> BondwatchResult<()> {
        if !self.years_to_maturity.is_finite() || self.years_to_maturity <= 0.0 {
            return Err(BondwatchError::validation(
                &self.id,
                format!(
                    "time to maturity must be positive, got {}",
                    self.years_to_maturity
                ),
            ));
        }

        if self.coupon_frequency == 0 {
            return Err(BondwatchError::validation(
                &self.id,
                "coupon frequency must be positive",
            ));
        }

        if self.period_count() > f64::from(MAX_COUPON_PERIODS) {
            return Err(BondwatchError::validation(
                &self.id,
                format!(
                    "{} coupon periods to maturity exceeds the limit of {MAX_COUPON_PERIODS}",
                    self.period_count()
                ),
            ));
        }

        if self.face_value <= Decimal::ZERO {
            return Err(BondwatchError::validation(
                &self.id,
                format!("face value must be positive, got {}", self.face_value),
            ));
        }

        if !self.coupon_rate.is_finite() || self.coupon_rate < 0.0 {
            return Err(BondwatchError::validation(
                &self.id,
                format!("coupon rate must be non-negative, got {}", self.coupon_rate),
            ));
        }

        if !self.ytm.is_finite() || 1.0 + self.periodic_yield() <= 0.0 {
            return Err(BondwatchError::validation(
                &self.id,
                format!("yield {} cannot be used as a discount rate", self.ytm),
            ));
        }

        Ok(())
    }
}

/// Builder for [`BondPosition`].
#[derive(Debug, Clone, Default)]
pub struct BondPositionBuilder {
    id: Option<String>,
    issuer: Option<String>,
    sector: Option<Sector>,
    rating: Option<CreditRating>,
    face_value: Option<Decimal>,
    coupon_rate: Option<f64>,
    coupon_frequency: u32,
    years_to_maturity: Option<f64>,
    ytm: Option<f64>,
}

impl BondPositionBuilder {
    /// Creates a new builder with annual coupons.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coupon_frequency: 1,
            ..Self::default()
        }
    }

    /// Sets the position identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the issuer name.
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the sector.
    #[must_use]
    pub fn sector(mut self, sector: Sector) -> Self {
        self.sector = Some(sector);
        self
    }

    /// Sets the credit rating.
    #[must_use]
    pub fn rating(mut self, rating: CreditRating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the position notional.
    #[must_use]
    pub fn face_value(mut self, face_value: Decimal) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the annual coupon rate (decimal fraction).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the number of coupon payments per year.
    #[must_use]
    pub fn coupon_frequency(mut self, frequency: u32) -> Self {
        self.coupon_frequency = frequency;
        self
    }

    /// Sets the time to maturity in years.
    #[must_use]
    pub fn years_to_maturity(mut self, years: f64) -> Self {
        self.years_to_maturity = Some(years);
        self
    }

    /// Sets the annualized yield to maturity (decimal fraction).
    #[must_use]
    pub fn ytm(mut self, ytm: f64) -> Self {
        self.ytm = Some(ytm);
        self
    }

    /// Builds the position.
    ///
    /// # Errors
    ///
    /// Returns [`BondwatchError::MissingField`] if a required field is missing.
    pub fn build(self) -> BondwatchResult<BondPosition> {
        Ok(BondPosition {
            id: self.id.ok_or_else(|| BondwatchError::missing_field("id"))?,
            issuer: self.issuer,
            sector: self
                .sector
                .ok_or_else(|| BondwatchError::missing_field("sector"))?,
            rating: self
                .rating
                .ok_or_else(|| BondwatchError::missing_field("rating"))?,
            face_value: self
                .face_value
                .ok_or_else(|| BondwatchError::missing_field("face_value"))?,
            coupon_rate: self
                .coupon_rate
                .ok_or_else(|| BondwatchError::missing_field("coupon_rate"))?,
            coupon_frequency: self.coupon_frequency,
            years_to_maturity: self
                .years_to_maturity
                .ok_or_else(|| BondwatchError::missing_field("years_to_maturity"))?,
            ytm: self.ytm.ok_or_else(|| BondwatchError::missing_field("ytm"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn builder() -> BondPositionBuilder {
        BondPosition::builder()
            .id("CORP-JPM-5Y")
            .issuer("JPMorgan Chase")
            .sector(Sector::Financial)
            .rating(CreditRating::A)
            .face_value(dec!(5_000_000))
            .coupon_rate(0.051)
            .years_to_maturity(5.0)
            .ytm(0.0525)
    }

    #[test]
    fn test_builder_defaults() {
        let bond = builder().build().unwrap();
        assert_eq!(bond.coupon_frequency(), 1);
        assert_eq!(bond.issuer(), Some("JPMorgan Chase"));
        assert_eq!(bond.rating_bucket(), RatingBucket::A);
        assert_eq!(bond.period_count(), 5.0);
        assert!(bond.validate().is_ok());
    }

    #[test]
    fn test_builder_missing_field() {
        let err = BondPosition::builder().id("X").build().unwrap_err();
        assert_eq!(err, BondwatchError::missing_field("sector"));
    }

    #[test]
    fn test_validate_rejects_non_positive_maturity() {
        let bond = builder().years_to_maturity(0.0).build().unwrap();
        let err = bond.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("time to maturity"));

        let bond = builder().years_to_maturity(-1.5).build().unwrap();
        assert!(bond.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_rejects_zero_frequency() {
        let bond = builder().coupon_frequency(0).build().unwrap();
        let err = bond.validate().unwrap_err();
        assert!(err.to_string().contains("coupon frequency"));
    }

    #[test]
    fn test_validate_caps_period_count() {
        let bond = builder()
            .coupon_frequency(12)
            .years_to_maturity(800.0)
            .build()
            .unwrap();
        assert_eq!(bond.period_count(), f64::from(MAX_COUPON_PERIODS));
        assert!(bond.validate().is_ok());

        let bond = builder()
            .coupon_frequency(u32::MAX)
            .years_to_maturity(1e6)
            .build()
            .unwrap();
        let err = bond.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("exceeds the limit of 9600"));
    }

    #[test]
    fn test_validate_rejects_bad_economics() {
        assert!(builder()
            .face_value(dec!(0))
            .build()
            .unwrap()
            .validate()
            .is_err());
        assert!(builder()
            .coupon_rate(-0.01)
            .build()
            .unwrap()
            .validate()
            .is_err());
        assert!(builder()
            .ytm(f64::NAN)
            .build()
            .unwrap()
            .validate()
            .is_err());
    }
}
