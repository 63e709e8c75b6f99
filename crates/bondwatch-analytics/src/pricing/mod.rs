//! Present-value pricing of fixed-rate bond positions.
//!
//! Every cash flow is discounted at the position's own yield, compounded at
//! its coupon frequency:
//!
//! ```text
//! PV = Σ CF_k / (1 + y/f)^k
//! ```
//!
//! where `k` is the flow's period on the coupon grid (fractional for a final
//! stub) and `f` the coupon frequency.

mod schedule;

pub use schedule::cash_flow_schedule;

use bondwatch_core::types::{BondPosition, CashFlowSchedule};
use bondwatch_core::BondwatchResult;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Result of pricing one bond position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Present value of all remaining cash flows.
    pub present_value: f64,
    /// The schedule that was discounted.
    pub schedule: CashFlowSchedule,
}

impl PriceResult {
    /// Returns the present value as a percentage of face value.
    #[must_use]
    pub fn price_per_100(&self, face_value: f64) -> f64 {
        if face_value == 0.0 {
            return 0.0;
        }
        self.present_value / face_value * 100.0
    }
}

/// Discounts a schedule at a periodic yield.
///
/// `periodic_yield` is the annual yield divided by the coupon frequency.
#[must_use]
pub fn present_value(schedule: &CashFlowSchedule, periodic_yield: f64) -> f64 {
    let base = 1.0 + periodic_yield;
    schedule
        .iter()
        .map(|cf| cf.amount / base.powf(cf.period))
        .sum()
}

/// Prices a bond position off its own yield to maturity.
///
/// # Errors
///
/// Returns `BondwatchError::Validation` if the position's terms are invalid.
///
/// # Example
///
/// ```rust
/// use bondwatch_analytics::pricing::price;
/// use bondwatch_core::types::{BondPosition, CreditRating, Sector};
/// use rust_decimal_macros::dec;
///
/// // A bond yielding its coupon prices at par
/// let bond = BondPosition::builder()
///     .id("PAR")
///     .sector(Sector::Financial)
///     .rating(CreditRating::A)
///     .face_value(dec!(1_000_000))
///     .coupon_rate(0.051)
///     .years_to_maturity(5.0)
///     .ytm(0.051)
///     .build()
///     .unwrap();
///
/// let result = price(&bond).unwrap();
/// assert!((result.present_value - 1_000_000.0).abs() < 1e-6);
/// ```
pub fn price(bond: &BondPosition) -> BondwatchResult<PriceResult> {
    let schedule = cash_flow_schedule(bond)?;
    let pv = present_value(&schedule, bond.periodic_yield());

    trace!(
        position = bond.id(),
        flows = schedule.len(),
        present_value = pv,
        "Priced position"
    );

    Ok(PriceResult {
        present_value: pv,
        schedule,
    })
}
