//! Pricing pipeline settings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Book size, in positions, from which pricing fans out across threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// How a book of a given size is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// One position after another on the calling thread.
    Sequential,
    /// Positions spread over the rayon pool.
    Parallel,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        })
    }
}

/// Settings for [`price_positions`](crate::pricing::price_positions).
///
/// Each position prices independently, so the mode never changes the
/// output: priced positions come back in book order with identical values.
/// Small books stay sequential because spawning work costs more than
/// pricing a handful of bonds.
///
/// Read from the `[analytics]` table of a monitor configuration:
///
/// ```toml
/// [analytics]
/// parallel = true
/// parallel_threshold = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Allow parallel pricing. Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Smallest book, in positions, that is priced in parallel.
    pub parallel_threshold: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl AnalyticsConfig {
    /// Prices every book on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Prices books of at least `threshold` positions in parallel.
    ///
    /// A threshold of zero is treated as one: an empty book is never split.
    #[must_use]
    pub fn parallel_from(threshold: usize) -> Self {
        Self {
            parallel: true,
            parallel_threshold: threshold.max(1),
        }
    }

    /// Returns the mode used for a book of `positions` positions.
    #[must_use]
    pub fn mode_for(&self, positions: usize) -> PricingMode {
        let threshold = self.parallel_threshold.max(1);
        if cfg!(feature = "parallel") && self.parallel && positions >= threshold {
            PricingMode::Parallel
        } else {
            PricingMode::Sequential
        }
    }

    /// Returns true if a book of `positions` positions is priced in parallel.
    #[must_use]
    pub fn should_parallelize(&self, positions: usize) -> bool {
        self.mode_for(positions) == PricingMode::Parallel
    }
}
