//! Verdict: the outcome of one rule against one snapshot.

use serde::{Deserialize, Serialize};

use crate::rule::{Comparator, MandateRule, MetricPath, Outcome, Severity};

/// Result of evaluating one mandate rule.
///
/// `deviation` is signed: positive means above the ceiling, negative means
/// below the floor, zero means the rule passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Rule identifier.
    pub rule_id: String,

    /// Rule description, or the metric path if the rule has none.
    pub label: String,

    /// Metric that was tested.
    pub metric: MetricPath,

    /// Comparator that was applied.
    pub comparator: Comparator,

    /// Severity of the rule.
    pub severity: Severity,

    /// Observed metric value.
    pub observed: f64,

    /// The violated bound on breach, the nearer bound on pass.
    pub threshold: f64,

    /// Whether the rule passed.
    pub passed: bool,

    /// Observed − violated bound; 0 on pass.
    pub deviation: f64,

    /// Human-readable outcome.
    pub detail: String,
}

impl Verdict {
    /// Builds a verdict from a rule, its observed value and the test outcome.
    #[must_use]
    pub fn new(rule: &MandateRule, observed: f64, outcome: Outcome) -> Self {
        let detail = describe(rule, observed, &outcome);
        Self {
            rule_id: rule.id.clone(),
            label: rule.label(),
            metric: rule.metric.clone(),
            comparator: rule.comparator,
            severity: rule.severity,
            observed,
            threshold: outcome.threshold,
            passed: outcome.passed,
            deviation: outcome.deviation,
            detail,
        }
    }

    /// Returns true if the rule was breached.
    #[must_use]
    pub fn is_breach(&self) -> bool {
        !self.passed
    }

    /// Returns the status marker used in reports.
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "BREACH"
        }
    }
}

fn describe(rule: &MandateRule, observed: f64, outcome: &Outcome) -> String {
    let unit = rule.metric.unit();
    let value = unit.format(observed);
    let bounds = rule.comparator.bounds();

    if !outcome.passed {
        let bound = unit.format(outcome.threshold);
        return if outcome.deviation > 0.0 {
            format!("{value} exceeds max {bound}")
        } else {
            format!("{value} below min {bound}")
        };
    }

    match (bounds.floor, bounds.ceiling) {
        (Some(floor), Some(ceiling)) => format!(
            "{value} within [{}, {}]",
            unit.format(floor),
            unit.format(ceiling)
        ),
        (None, Some(ceiling)) => format!("{value} within max {}", unit.format(ceiling)),
        (Some(floor), None) => format!("{value} above min {}", unit.format(floor)),
        (None, None) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::PortfolioMetric;
    use bondwatch_core::types::Sector;

    #[test]
    fn test_breach_detail() {
        let rule = MandateRule::new(
            "GOV",
            MetricPath::Sector(Sector::Government),
            Comparator::AtMost(50.0),
        );
        let outcome = rule.comparator.bounds().test(55.0);
        let verdict = Verdict::new(&rule, 55.0, outcome);

        assert!(verdict.is_breach());
        assert_eq!(verdict.status(), "BREACH");
        assert_eq!(verdict.detail, "55.00% exceeds max 50.00%");
        assert_eq!(verdict.label, "sector:Government:% of MV");
    }

    #[test]
    fn test_pass_details() {
        let rule = MandateRule::new(
            "DUR",
            MetricPath::Portfolio(PortfolioMetric::ModifiedDuration),
            Comparator::Between {
                lower: 2.0,
                upper: 5.0,
            },
        );
        let verdict = Verdict::new(&rule, 4.25, rule.comparator.bounds().test(4.25));
        assert_eq!(verdict.detail, "4.25y within [2.00y, 5.00y]");

        let rule = MandateRule::new(
            "YTM",
            MetricPath::Portfolio(PortfolioMetric::Ytm),
            Comparator::AtLeast(0.03),
        )
        .with_description("Minimum Portfolio YTM");
        let verdict = Verdict::new(&rule, 0.0442, rule.comparator.bounds().test(0.0442));
        assert_eq!(verdict.detail, "4.420% above min 3.000%");
        assert_eq!(verdict.label, "Minimum Portfolio YTM");
    }

    #[test]
    fn test_floor_breach_detail() {
        let rule = MandateRule::new(
            "YTM",
            MetricPath::Portfolio(PortfolioMetric::Ytm),
            Comparator::AtLeast(0.03),
        );
        let verdict = Verdict::new(&rule, 0.025, rule.comparator.bounds().test(0.025));
        assert_eq!(verdict.detail, "2.500% below min 3.000%");
        assert!(verdict.deviation < 0.0);
    }
}
