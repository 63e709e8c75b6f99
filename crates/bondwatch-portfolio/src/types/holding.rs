//! Holding type.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use super::PricedPosition;

/// A priced position inside a portfolio snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// The priced position.
    pub position: PricedPosition,

    /// Share of total market value (0-1).
    pub weight: f64,

    /// Share of total market value as a percentage (0-100).
    /// Computed from market values, not as `weight × 100`.
    pub weight_pct: f64,
}

impl Deref for Holding {
    type Target = PricedPosition;

    fn deref(&self) -> &Self::Target {
        &self.position
    }
}
