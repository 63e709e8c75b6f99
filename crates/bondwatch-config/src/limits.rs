//! Mandate limits and their expansion into rules.

use bondwatch_compliance::rule::{Comparator, MandateRule, MetricPath, PortfolioMetric, PositionMetric};
use bondwatch_core::types::{RatingBucket, Sector};
use bondwatch_portfolio::PortfolioSnapshot;
use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

/// Investment mandate limits.
///
/// Weights and concentrations are percentages of market value (0-100),
/// durations are in years, DV01 in currency and the yield floor is a decimal
/// fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandateLimits {
    /// Ceiling on weighted modified duration.
    pub max_portfolio_duration: f64,
    /// Floor on weighted modified duration.
    pub min_portfolio_duration: f64,
    /// Ceiling on any single position's weight.
    pub max_position_weight: f64,
    /// Ceiling on any sector's allocation.
    pub max_sector_concentration: f64,
    /// Floor on the combined AAA and AA allocation.
    pub min_aaa_aa_weight: f64,
    /// Ceiling on any single position's DV01.
    pub max_position_dv01: f64,
    /// Floor on weighted yield to maturity.
    pub min_ytm: f64,
}

impl Default for MandateLimits {
    fn default() -> Self {
        Self {
            max_portfolio_duration: 5.0,
            min_portfolio_duration: 2.0,
            max_position_weight: 35.0,
            max_sector_concentration: 50.0,
            min_aaa_aa_weight: 60.0,
            max_position_dv01: 6_000.0,
            min_ytm: 0.03,
        }
    }
}

impl MandateLimits {
    /// Expands the limits into concrete rules for a book.
    ///
    /// Produces, in order: the duration range, one weight cap per holding,
    /// one concentration cap per sector held (first appearance order), the
    /// AAA/AA floor, one DV01 cap per holding and the yield floor.
    #[must_use]
    pub fn expand(&self, snapshot: &PortfolioSnapshot) -> Vec<MandateRule> {
        let holdings = snapshot.holdings();
        let mut sectors: Vec<Sector> = Vec::new();
        for h in holdings {
            if !sectors.contains(&h.sector()) {
                sectors.push(h.sector());
            }
        }

        let mut rules = Vec::with_capacity(2 * holdings.len() + sectors.len() + 3);

        rules.push(
            MandateRule::new(
                "DURATION",
                MetricPath::Portfolio(PortfolioMetric::ModifiedDuration),
                Comparator::Between {
                    lower: self.min_portfolio_duration,
                    upper: self.max_portfolio_duration,
                },
            )
            .with_description("Portfolio Duration"),
        );

        for h in holdings {
            rules.push(
                MandateRule::new(
                    format!("WEIGHT-{}", h.id()),
                    MetricPath::position(h.id(), PositionMetric::Weight),
                    Comparator::AtMost(self.max_position_weight),
                )
                .with_description(format!("Position Concentration [{}]", h.id())),
            );
        }

        for sector in sectors {
            rules.push(
                MandateRule::new(
                    format!("SECTOR-{}", sector.code()),
                    MetricPath::Sector(sector),
                    Comparator::AtMost(self.max_sector_concentration),
                )
                .with_description(format!("Sector Concentration [{sector}]")),
            );
        }

        rules.push(
            MandateRule::new(
                "QUALITY-AA",
                MetricPath::RatingAtOrAbove(RatingBucket::AA),
                Comparator::AtLeast(self.min_aaa_aa_weight),
            )
            .with_description("Credit Quality (AAA+AA floor)"),
        );

        for h in holdings {
            rules.push(
                MandateRule::new(
                    format!("DV01-{}", h.id()),
                    MetricPath::position(h.id(), PositionMetric::Dv01),
                    Comparator::AtMost(self.max_position_dv01),
                )
                .with_description(format!("DV01 Limit [{}]", h.id())),
            );
        }

        rules.push(
            MandateRule::new(
                "MIN-YTM",
                MetricPath::Portfolio(PortfolioMetric::Ytm),
                Comparator::AtLeast(self.min_ytm),
            )
            .with_description("Minimum Portfolio YTM"),
        );

        rules
    }
}

impl Validate for MandateLimits {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let fields = [
            ("max_portfolio_duration", self.max_portfolio_duration),
            ("min_portfolio_duration", self.min_portfolio_duration),
            ("max_position_weight", self.max_position_weight),
            ("max_sector_concentration", self.max_sector_concentration),
            ("min_aaa_aa_weight", self.min_aaa_aa_weight),
            ("max_position_dv01", self.max_position_dv01),
            ("min_ytm", self.min_ytm),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                errors.push(ValidationError::new(field, "must be a non-negative number"));
            }
        }

        if self.min_portfolio_duration > self.max_portfolio_duration {
            errors.push(ValidationError::new(
                "min_portfolio_duration",
                format!(
                    "{} exceeds max_portfolio_duration {}",
                    self.min_portfolio_duration, self.max_portfolio_duration
                ),
            ));
        }

        for (field, value) in [
            ("max_position_weight", self.max_position_weight),
            ("max_sector_concentration", self.max_sector_concentration),
            ("min_aaa_aa_weight", self.min_aaa_aa_weight),
        ] {
            if value > 100.0 {
                errors.push(ValidationError::new(field, "is a percentage and cannot exceed 100"));
            }
        }

        errors
    }
}
