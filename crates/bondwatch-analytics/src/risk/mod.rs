//! Interest-rate risk analytics for bond positions.
//!
//! - **Duration**: Macaulay and modified
//! - **DV01**: dollar value of a basis point
//!
//! # Example
//!
//! ```rust
//! use bondwatch_analytics::pricing::price;
//! use bondwatch_analytics::risk::compute_risk;
//! use bondwatch_core::types::{BondPosition, CreditRating, Sector};
//! use rust_decimal_macros::dec;
//!
//! let bond = BondPosition::builder()
//!     .id("ZERO-5Y")
//!     .sector(Sector::Government)
//!     .rating(CreditRating::AAA)
//!     .face_value(dec!(1_000_000))
//!     .coupon_rate(0.0)
//!     .years_to_maturity(5.0)
//!     .ytm(0.04)
//!     .build()
//!     .unwrap();
//!
//! let priced = price(&bond).unwrap();
//! let risk = compute_risk(&bond, &priced.schedule, priced.present_value).unwrap();
//! assert_eq!(risk.macaulay_duration, 5.0);
//! ```

pub mod duration;
pub mod dv01;

pub use duration::{macaulay_duration, modified_from_macaulay};
pub use dv01::{dv01_from_duration, price_change_from_duration, BASIS_POINT};

use bondwatch_core::types::{BondPosition, CashFlowSchedule};
use bondwatch_core::{BondwatchError, BondwatchResult};
use serde::{Deserialize, Serialize};

/// Per-position interest-rate risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Dollar value of one basis point for the whole position.
    pub dv01: f64,
}

/// Computes Macaulay duration, modified duration and DV01 for a position.
///
/// `schedule` and `present_value` are the output of pricing the same
/// position.
///
/// # Errors
///
/// Returns `BondwatchError::Validation` if the present value is not a
/// positive finite number, or the schedule has no cash flows.
pub fn compute_risk(
    bond: &BondPosition,
    schedule: &CashFlowSchedule,
    present_value: f64,
) -> BondwatchResult<RiskMetrics> {
    if !present_value.is_finite() || present_value <= 0.0 {
        return Err(BondwatchError::validation(
            bond.id(),
            format!("present value must be positive, got {present_value}"),
        ));
    }
    if schedule.is_empty() {
        return Err(BondwatchError::validation(bond.id(), "no cash flows"));
    }

    let macaulay = macaulay_duration(schedule, bond.periodic_yield());
    let modified = modified_from_macaulay(macaulay, bond.ytm(), bond.coupon_frequency());
    let dv01 = dv01_from_duration(modified, present_value);

    Ok(RiskMetrics {
        macaulay_duration: macaulay,
        modified_duration: modified,
        dv01,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price;
    use approx::assert_relative_eq;
    use bondwatch_core::types::{CreditRating, Sector};
    use rust_decimal_macros::dec;

    fn bond(coupon: f64, frequency: u32, years: f64, ytm: f64) -> BondPosition {
        BondPosition::builder()
            .id("RISK")
            .sector(Sector::Technology)
            .rating(CreditRating::AA)
            .face_value(dec!(6_000_000))
            .coupon_rate(coupon)
            .coupon_frequency(frequency)
            .years_to_maturity(years)
            .ytm(ytm)
            .build()
            .unwrap()
    }

    fn risk_of(bond: &BondPosition) -> RiskMetrics {
        let priced = price(bond).unwrap();
        compute_risk(bond, &priced.schedule, priced.present_value).unwrap()
    }

    #[test]
    fn test_zero_coupon_duration_equals_maturity() {
        let risk = risk_of(&bond(0.0, 2, 7.3, 0.041));
        assert_eq!(risk.macaulay_duration, 7.3);
        assert_relative_eq!(risk.modified_duration, 7.3 / 1.0205, epsilon = 1e-12);
    }

    #[test]
    fn test_par_bond_annual() {
        // Annual par bond: D_mac = (1+y)/y × (1 - (1+y)^-n)
        let risk = risk_of(&bond(0.05, 1, 5.0, 0.05));
        let expected = 1.05 / 0.05 * (1.0 - 1.05_f64.powi(-5));
        assert_relative_eq!(risk.macaulay_duration, expected, epsilon = 1e-9);
        assert_relative_eq!(risk.modified_duration, expected / 1.05, epsilon = 1e-9);
        assert_relative_eq!(
            risk.dv01,
            expected / 1.05 * 6_000_000.0 * BASIS_POINT,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_duration_ordering() {
        let risk = risk_of(&bond(0.06, 2, 10.0, 0.05));
        assert!(risk.modified_duration < risk.macaulay_duration);
        assert!(risk.macaulay_duration < 10.0);
        assert!(risk.dv01 > 0.0);
    }

    #[test]
    fn test_non_positive_present_value_rejected() {
        let b = bond(0.05, 1, 5.0, 0.05);
        let schedule = price(&b).unwrap().schedule;

        let err = compute_risk(&b, &schedule, 0.0).unwrap_err();
        assert!(err.is_validation());
        assert!(compute_risk(&b, &schedule, f64::NAN).is_err());
        assert!(compute_risk(&b, &CashFlowSchedule::default(), 100.0).is_err());
    }
}
