//! DV01 (dollar value of one basis point).
//!
//! ```text
//! DV01 = Modified Duration × Present Value × 0.0001
//! ```

/// One basis point as a decimal fraction.
pub const BASIS_POINT: f64 = 0.0001;

/// Calculates DV01 from modified duration and present value.
///
/// The result is in currency units for the whole position.
#[must_use]
pub fn dv01_from_duration(modified_duration: f64, present_value: f64) -> f64 {
    modified_duration * present_value * BASIS_POINT
}

/// Calculates the approximate price change for a yield move.
///
/// `yield_change` is a decimal fraction (0.01 = 100bp).
#[must_use]
pub fn price_change_from_duration(
    modified_duration: f64,
    present_value: f64,
    yield_change: f64,
) -> f64 {
    -modified_duration * present_value * yield_change
}
