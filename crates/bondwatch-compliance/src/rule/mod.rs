//! Mandate rule definitions.
//!
//! A rule is a uniform record: which metric to read ([`MetricPath`]), how to
//! test it ([`Comparator`]) and how serious a breach is ([`Severity`]).
//!
//! # Example
//!
//! ```rust
//! use bondwatch_compliance::rule::{Comparator, MandateRule, Severity};
//!
//! let rule = MandateRule::new(
//!     "SECTOR-GOVERNMENT",
//!     "sector:Government:% of MV".parse().unwrap(),
//!     Comparator::AtMost(50.0),
//! )
//! .with_severity(Severity::Critical)
//! .with_description("Sector Concentration [Government]");
//!
//! assert_eq!(rule.label(), "Sector Concentration [Government]");
//! ```

mod comparator;
mod metric;

pub use comparator::{Bounds, Comparator, Outcome};
pub use metric::{MetricPath, MetricUnit, PortfolioMetric, PositionMetric};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Breach severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Info,
    /// Warning - soft limit.
    Warning,
    /// Critical - hard mandate limit.
    #[default]
    Critical,
}

impl Severity {
    /// Returns all severities, least severe first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Info, Self::Warning, Self::Critical]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        };
        write!(f, "{name}")
    }
}

/// A single mandate rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandateRule {
    /// Unique rule identifier.
    pub id: String,

    /// Snapshot value under test.
    pub metric: MetricPath,

    /// Threshold test.
    pub comparator: Comparator,

    /// Severity of a breach.
    #[serde(default)]
    pub severity: Severity,

    /// Human-readable name of the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MandateRule {
    /// Creates a critical rule without description.
    #[must_use]
    pub fn new(id: impl Into<String>, metric: MetricPath, comparator: Comparator) -> Self {
        Self {
            id: id.into(),
            metric,
            comparator,
            severity: Severity::default(),
            description: None,
        }
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the description, or the metric path if there is none.
    #[must_use]
    pub fn label(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| self.metric.to_string())
    }
}
