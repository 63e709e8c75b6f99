//! Cash flow schedule generation.

use bondwatch_core::types::{BondPosition, CashFlow, CashFlowSchedule, MAX_COUPON_PERIODS};
use bondwatch_core::BondwatchResult;

/// Period counts closer than this to a whole number are treated as whole.
///
/// `frequency × years` is computed in floating point and can land a few ulps
/// off a whole number.
const PERIOD_EPSILON: f64 = 1e-9;

/// Generates the cash flow schedule of a bond position.
///
/// Coupons of `face × coupon_rate / frequency` fall on every whole period
/// `1..=floor(n)` where `n = frequency × years_to_maturity`. The face value is
/// repaid at period `n`: combined with the last coupon when `n` is whole,
/// otherwise alone at the fractional final period. Zero-amount coupons are
/// not emitted, so a zero-coupon bond produces a single cash flow.
///
/// The final flow's `time` is exactly the position's time to maturity.
///
/// # Errors
///
/// Returns `BondwatchError::Validation` if the bond's terms are invalid
/// (see [`BondPosition::validate`]), including a period count above
/// [`MAX_COUPON_PERIODS`].
///
/// # Example
///
/// ```rust
/// use bondwatch_analytics::pricing::cash_flow_schedule;
/// use bondwatch_core::types::{BondPosition, CreditRating, Sector};
/// use rust_decimal_macros::dec;
///
/// let bond = BondPosition::builder()
///     .id("UST-2Y")
///     .sector(Sector::Government)
///     .rating(CreditRating::AAA)
///     .face_value(dec!(100))
///     .coupon_rate(0.05)
///     .coupon_frequency(2)
///     .years_to_maturity(2.0)
///     .ytm(0.05)
///     .build()
///     .unwrap();
///
/// let schedule = cash_flow_schedule(&bond).unwrap();
/// let amounts: Vec<f64> = schedule.iter().map(|cf| cf.amount).collect();
/// assert_eq!(amounts, vec![2.5, 2.5, 2.5, 102.5]);
/// ```
pub fn cash_flow_schedule(bond: &BondPosition) -> BondwatchResult<CashFlowSchedule> {
    bond.validate()?;

    let frequency = f64::from(bond.coupon_frequency());
    let face = bond.face_value_f64();
    let coupon = face * bond.coupon_rate() / frequency;
    let years = bond.years_to_maturity();

    let mut periods = bond.period_count();
    let rounded = periods.round();
    let whole = rounded >= 1.0 && (periods - rounded).abs() < PERIOD_EPSILON;
    if whole {
        periods = rounded;
    }

    // Bounded by MAX_COUPON_PERIODS after validation
    let full_periods = periods.floor() as u32;
    let coupon_periods = if whole {
        full_periods - 1
    } else {
        full_periods
    };

    let mut flows = Vec::with_capacity(full_periods as usize + 1);

    if coupon > 0.0 {
        for k in 1..=coupon_periods {
            let period = f64::from(k);
            flows.push(CashFlow::coupon(period, period / frequency, coupon));
        }
    }

    let last = if whole && coupon > 0.0 {
        CashFlow::final_payment(periods, years, coupon, face)
    } else {
        CashFlow::principal(periods, years, face)
    };
    flows.push(last);

    Ok(CashFlowSchedule::new(flows))
}
