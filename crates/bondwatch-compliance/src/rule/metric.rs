//! Metric paths: which snapshot value a rule tests.
//!
//! Paths have the string form `scope:key:metric`:
//!
//! | Path | Value | Unit |
//! |------|-------|------|
//! | `portfolio:<metric>` | aggregate metric | see [`PortfolioMetric`] |
//! | `sector:<Sector>:% of MV` | sector allocation | percent |
//! | `rating:<Bucket>:% of MV` | rating bucket allocation | percent |
//! | `rating_at_or_above:<Bucket>:% of MV` | share rated at or above bucket | percent |
//! | `position:<id>:<metric>` | one holding | see [`PositionMetric`] |
//!
//! Scopes and metric names are matched ignoring case, spaces and dashes.
//! Position ids are matched exactly.

use bondwatch_core::types::{RatingBucket, Sector};
use bondwatch_core::BondwatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SHARE_OF_MV: &str = "% of MV";

/// Unit of a metric value, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    /// Percent of market value (0-100).
    Percent,
    /// Decimal fraction shown as a percentage (0.045 = 4.500%).
    Rate,
    /// Years.
    Years,
    /// Currency units.
    Currency,
}

impl MetricUnit {
    /// Formats a value in this unit.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Percent => format!("{value:.2}%"),
            Self::Rate => format!("{:.3}%", value * 100.0),
            Self::Years => format!("{value:.2}y"),
            Self::Currency => format!("${}", group_thousands(value)),
        }
    }
}

fn group_thousands(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Portfolio-level aggregate metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortfolioMetric {
    /// Total market value (currency).
    MarketValue,
    /// Weighted average yield to maturity (decimal fraction).
    Ytm,
    /// Weighted average coupon (decimal fraction).
    Coupon,
    /// Weighted modified duration (years).
    ModifiedDuration,
    /// Weighted Macaulay duration (years).
    MacaulayDuration,
    /// Total DV01 (currency).
    Dv01,
}

impl PortfolioMetric {
    /// Returns the canonical name used in paths.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketValue => "market_value",
            Self::Ytm => "ytm",
            Self::Coupon => "coupon",
            Self::ModifiedDuration => "modified_duration",
            Self::MacaulayDuration => "macaulay_duration",
            Self::Dv01 => "dv01",
        }
    }

    /// Returns the unit of this metric.
    #[must_use]
    pub fn unit(&self) -> MetricUnit {
        match self {
            Self::MarketValue | Self::Dv01 => MetricUnit::Currency,
            Self::Ytm | Self::Coupon => MetricUnit::Rate,
            Self::ModifiedDuration | Self::MacaulayDuration => MetricUnit::Years,
        }
    }

    fn parse(key: &str) -> Option<Self> {
        Some(match key {
            "marketvalue" | "mv" | "nav" => Self::MarketValue,
            "ytm" | "yield" => Self::Ytm,
            "coupon" => Self::Coupon,
            "modifiedduration" | "modduration" | "duration" => Self::ModifiedDuration,
            "macaulayduration" | "macduration" => Self::MacaulayDuration,
            "dv01" => Self::Dv01,
            _ => return None,
        })
    }
}

/// Per-position metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionMetric {
    /// Share of portfolio market value (percent, 0-100).
    Weight,
    /// Market value (currency).
    MarketValue,
    /// Yield to maturity (decimal fraction).
    Ytm,
    /// Modified duration (years).
    ModifiedDuration,
    /// Macaulay duration (years).
    MacaulayDuration,
    /// Position DV01 (currency).
    Dv01,
}

impl PositionMetric {
    /// Returns the canonical name used in paths.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::MarketValue => "market_value",
            Self::Ytm => "ytm",
            Self::ModifiedDuration => "modified_duration",
            Self::MacaulayDuration => "macaulay_duration",
            Self::Dv01 => "dv01",
        }
    }

    /// Returns the unit of this metric.
    #[must_use]
    pub fn unit(&self) -> MetricUnit {
        match self {
            Self::Weight => MetricUnit::Percent,
            Self::MarketValue | Self::Dv01 => MetricUnit::Currency,
            Self::Ytm => MetricUnit::Rate,
            Self::ModifiedDuration | Self::MacaulayDuration => MetricUnit::Years,
        }
    }

    fn parse(key: &str) -> Option<Self> {
        Some(match key {
            "weight" | "%ofmv" => Self::Weight,
            "marketvalue" | "mv" => Self::MarketValue,
            "ytm" | "yield" => Self::Ytm,
            "modifiedduration" | "modduration" | "duration" => Self::ModifiedDuration,
            "macaulayduration" | "macduration" => Self::MacaulayDuration,
            "dv01" => Self::Dv01,
            _ => return None,
        })
    }
}

/// The snapshot value a mandate rule tests.
///
/// # Example
///
/// ```rust
/// use bondwatch_compliance::rule::{MetricPath, PortfolioMetric};
/// use bondwatch_core::types::Sector;
///
/// let path: MetricPath = "sector:Government:% of MV".parse().unwrap();
/// assert_eq!(path, MetricPath::Sector(Sector::Government));
///
/// let path: MetricPath = "portfolio:DV01".parse().unwrap();
/// assert_eq!(path, MetricPath::Portfolio(PortfolioMetric::Dv01));
/// assert_eq!(path.to_string(), "portfolio:dv01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MetricPath {
    /// Portfolio aggregate.
    Portfolio(PortfolioMetric),
    /// Sector allocation.
    Sector(Sector),
    /// Rating bucket allocation.
    Rating(RatingBucket),
    /// Share of market value rated at or above a bucket.
    RatingAtOrAbove(RatingBucket),
    /// Metric of a single position.
    Position {
        /// Position identifier.
        id: String,
        /// Metric of that position.
        metric: PositionMetric,
    },
}

impl MetricPath {
    /// Creates a position path.
    #[must_use]
    pub fn position(id: impl Into<String>, metric: PositionMetric) -> Self {
        Self::Position {
            id: id.into(),
            metric,
        }
    }

    /// Returns the unit of the value this path resolves to.
    #[must_use]
    pub fn unit(&self) -> MetricUnit {
        match self {
            Self::Portfolio(metric) => metric.unit(),
            Self::Sector(_) | Self::Rating(_) | Self::RatingAtOrAbove(_) => MetricUnit::Percent,
            Self::Position { metric, .. } => metric.unit(),
        }
    }

    /// Returns the position id this path refers to, if any.
    #[must_use]
    pub fn position_id(&self) -> Option<&str> {
        match self {
            Self::Position { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portfolio(metric) => write!(f, "portfolio:{}", metric.name()),
            Self::Sector(sector) => write!(f, "sector:{sector}:{SHARE_OF_MV}"),
            Self::Rating(bucket) => write!(f, "rating:{}:{SHARE_OF_MV}", bucket.code()),
            Self::RatingAtOrAbove(bucket) => {
                write!(f, "rating_at_or_above:{}:{SHARE_OF_MV}", bucket.code())
            }
            Self::Position { id, metric } => write!(f, "position:{id}:{}", metric.name()),
        }
    }
}

/// Lowercases and strips spaces, dashes and underscores.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn invalid(path: &str, reason: &str) -> BondwatchError {
    BondwatchError::configuration(format!("invalid metric path '{path}': {reason}"))
}

/// Checks the optional trailing `% of MV` of an allocation path.
fn expect_share_of_mv(path: &str, metric: Option<&str>) -> Result<(), BondwatchError> {
    match metric.map(normalize).as_deref() {
        None | Some("%ofmv" | "weight" | "allocation") => Ok(()),
        Some(_) => Err(invalid(path, "allocation paths only support '% of MV'")),
    }
}

impl FromStr for MetricPath {
    type Err = BondwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scope, rest) = s
            .split_once(':')
            .ok_or_else(|| invalid(s, "expected 'scope:key[:metric]'"))?;
        let rest = rest.trim();

        match normalize(scope).as_str() {
            "portfolio" => PortfolioMetric::parse(&normalize(rest))
                .map(Self::Portfolio)
                .ok_or_else(|| invalid(s, "unknown portfolio metric")),
            "sector" => {
                let (key, metric) = split_key(rest);
                expect_share_of_mv(s, metric)?;
                Ok(Self::Sector(key.parse()?))
            }
            "rating" => {
                let (key, metric) = split_key(rest);
                expect_share_of_mv(s, metric)?;
                Ok(Self::Rating(key.parse()?))
            }
            "ratingatorabove" => {
                let (key, metric) = split_key(rest);
                expect_share_of_mv(s, metric)?;
                Ok(Self::RatingAtOrAbove(key.parse()?))
            }
            "position" => {
                // Ids may themselves contain ':'; the metric is the last segment
                let (id, metric) = rest
                    .rsplit_once(':')
                    .ok_or_else(|| invalid(s, "expected 'position:<id>:<metric>'"))?;
                let id = id.trim();
                if id.is_empty() {
                    return Err(invalid(s, "empty position id"));
                }
                let metric = PositionMetric::parse(&normalize(metric))
                    .ok_or_else(|| invalid(s, "unknown position metric"))?;
                Ok(Self::position(id, metric))
            }
            _ => Err(invalid(s, "unknown scope")),
        }
    }
}

fn split_key(rest: &str) -> (&str, Option<&str>) {
    match rest.split_once(':') {
        Some((key, metric)) => (key.trim(), Some(metric)),
        None => (rest.trim(), None),
    }
}

impl TryFrom<String> for MetricPath {
    type Error = BondwatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MetricPath> for String {
    fn from(path: MetricPath) -> Self {
        path.to_string()
    }
}
