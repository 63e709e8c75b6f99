//! Macaulay and modified duration.
//!
//! ```text
//! D_mac = Σ t_k × PV(CF_k) / Σ PV(CF_k)
//! D_mod = D_mac / (1 + y/f)
//! ```

use bondwatch_core::types::CashFlowSchedule;

/// Calculates Macaulay duration in years.
///
/// A schedule with a single cash flow (zero-coupon bond, or a stub shorter
/// than one period) returns that flow's time exactly. Returns NaN for an
/// empty schedule or a schedule with zero present value.
#[must_use]
pub fn macaulay_duration(schedule: &CashFlowSchedule, periodic_yield: f64) -> f64 {
    if let [only] = schedule.flows() {
        return only.time;
    }

    let base = 1.0 + periodic_yield;
    let (weighted_time, total_pv) = schedule
        .iter()
        .fold((0.0, 0.0), |(weighted, total), cf| {
            let pv = cf.amount / base.powf(cf.period);
            (weighted + cf.time * pv, total + pv)
        });

    if total_pv == 0.0 {
        return f64::NAN;
    }
    weighted_time / total_pv
}

/// Converts Macaulay duration to modified duration.
#[must_use]
pub fn modified_from_macaulay(macaulay: f64, ytm: f64, frequency: u32) -> f64 {
    macaulay / (1.0 + ytm / f64::from(frequency))
}
