//! Comparators: how an observed value is tested against thresholds.
//!
//! Every comparator reduces to an optional floor and an optional ceiling, so
//! the engine evaluates all of them the same way and deviations share one
//! sign convention: positive above the ceiling, negative below the floor.

use serde::{Deserialize, Serialize};
use std::fmt;

use bondwatch_core::{BondwatchError, BondwatchResult};

/// Threshold test of a mandate rule.
///
/// Serialized externally tagged, e.g. `{"at_most": 50.0}` or
/// `{"between": {"lower": 2.0, "upper": 5.0}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Passes when observed ≤ limit.
    AtMost(f64),
    /// Passes when observed ≥ limit.
    AtLeast(f64),
    /// Passes when |observed − target| ≤ tolerance.
    EqualTo {
        /// Target value.
        target: f64,
        /// Allowed absolute difference.
        #[serde(default)]
        tolerance: f64,
    },
    /// Passes when lower ≤ observed ≤ upper.
    Between {
        /// Floor (inclusive).
        lower: f64,
        /// Ceiling (inclusive).
        upper: f64,
    },
}

/// Floor and ceiling derived from a comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lowest passing value, if bounded below.
    pub floor: Option<f64>,
    /// Highest passing value, if bounded above.
    pub ceiling: Option<f64>,
}

/// Outcome of testing one value against [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Whether the value is within bounds.
    pub passed: bool,
    /// The violated bound on breach, the nearer bound on pass.
    pub threshold: f64,
    /// Observed − violated bound; 0 on pass.
    pub deviation: f64,
}

impl Bounds {
    /// Tests an observed value.
    #[must_use]
    pub fn test(&self, observed: f64) -> Outcome {
        if let Some(ceiling) = self.ceiling {
            if observed > ceiling {
                return Outcome {
                    passed: false,
                    threshold: ceiling,
                    deviation: observed - ceiling,
                };
            }
        }
        if let Some(floor) = self.floor {
            if observed < floor {
                return Outcome {
                    passed: false,
                    threshold: floor,
                    deviation: observed - floor,
                };
            }
        }

        let threshold = match (self.floor, self.ceiling) {
            (Some(floor), Some(ceiling)) => {
                if ceiling - observed <= observed - floor {
                    ceiling
                } else {
                    floor
                }
            }
            (None, Some(ceiling)) => ceiling,
            (Some(floor), None) => floor,
            (None, None) => observed,
        };

        Outcome {
            passed: true,
            threshold,
            deviation: 0.0,
        }
    }
}

impl Comparator {
    /// Reduces the comparator to a floor and a ceiling.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match *self {
            Self::AtMost(limit) => Bounds {
                floor: None,
                ceiling: Some(limit),
            },
            Self::AtLeast(limit) => Bounds {
                floor: Some(limit),
                ceiling: None,
            },
            Self::EqualTo { target, tolerance } => Bounds {
                floor: Some(target - tolerance),
                ceiling: Some(target + tolerance),
            },
            Self::Between { lower, upper } => Bounds {
                floor: Some(lower),
                ceiling: Some(upper),
            },
        }
    }

    /// Returns the comparator symbol (≤, ≥, =, range).
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::AtMost(_) => "≤",
            Self::AtLeast(_) => "≥",
            Self::EqualTo { .. } => "=",
            Self::Between { .. } => "range",
        }
    }

    /// Checks that thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns `BondwatchError::Configuration` for a non-finite threshold, a
    /// negative tolerance, or a range whose lower bound exceeds its upper.
    pub fn validate(&self, rule_id: &str) -> BondwatchResult<()> {
        let values = match *self {
            Self::AtMost(limit) | Self::AtLeast(limit) => [limit, limit],
            Self::EqualTo { target, tolerance } => [target, tolerance],
            Self::Between { lower, upper } => [lower, upper],
        };
        if values.iter().any(|v| !v.is_finite()) {
            return Err(BondwatchError::configuration(format!(
                "rule '{rule_id}': threshold must be finite"
            )));
        }

        match *self {
            Self::EqualTo { tolerance, .. } if tolerance < 0.0 => {
                Err(BondwatchError::configuration(format!(
                    "rule '{rule_id}': tolerance must be non-negative, got {tolerance}"
                )))
            }
            Self::Between { lower, upper } if lower > upper => {
                Err(BondwatchError::configuration(format!(
                    "rule '{rule_id}': range lower bound {lower} exceeds upper bound {upper}"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtMost(limit) => write!(f, "≤ {limit}"),
            Self::AtLeast(limit) => write!(f, "≥ {limit}"),
            Self::EqualTo { target, tolerance } if *tolerance > 0.0 => {
                write!(f, "= {target} ± {tolerance}")
            }
            Self::EqualTo { target, .. } => write!(f, "= {target}"),
            Self::Between { lower, upper } => write!(f, "[{lower}, {upper}]"),
        }
    }
}
