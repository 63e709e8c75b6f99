//! Surveillance report: verdicts plus summary and ranked breaches.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::rule::Severity;
use crate::verdict::Verdict;

/// Summary counts of a surveillance run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of rules evaluated.
    pub total: usize,
    /// Number of rules that passed.
    pub passed: usize,
    /// Number of rules breached.
    pub breached: usize,
}

/// One breached rule in the ranked breach list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    /// Rule identifier.
    pub rule_id: String,
    /// Signed deviation from the violated bound.
    pub deviation: f64,
    /// Severity of the rule.
    pub severity: Severity,
}

/// Result of evaluating a rule set against one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveillanceReport {
    /// Verdicts in rule order.
    pub verdicts: Vec<Verdict>,

    /// Summary counts.
    pub summary: ReportSummary,

    /// Breaches ordered by descending absolute deviation.
    pub breaches: Vec<Breach>,
}

impl SurveillanceReport {
    /// Returns true if no rule was breached.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.summary.breached == 0
    }

    /// Returns the share of rules that passed, in percent.
    ///
    /// An empty rule set counts as 100% passing.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        if self.summary.total == 0 {
            return 100.0;
        }
        self.summary.passed as f64 / self.summary.total as f64 * 100.0
    }

    /// Returns the verdicts of passing rules, in rule order.
    #[must_use]
    pub fn passes(&self) -> Vec<&Verdict> {
        self.verdicts.iter().filter(|v| v.passed).collect()
    }

    /// Returns the breached verdicts in ranked order.
    #[must_use]
    pub fn breached_verdicts(&self) -> Vec<&Verdict> {
        self.breaches
            .iter()
            .filter_map(|b| self.verdict(&b.rule_id))
            .collect()
    }

    /// Returns breaches of a given severity, in ranked order.
    #[must_use]
    pub fn breaches_by_severity(&self, severity: Severity) -> Vec<&Breach> {
        self.breaches
            .iter()
            .filter(|b| b.severity == severity)
            .collect()
    }

    /// Looks up a verdict by rule id.
    #[must_use]
    pub fn verdict(&self, rule_id: &str) -> Option<&Verdict> {
        self.verdicts.iter().find(|v| v.rule_id == rule_id)
    }

    /// Returns the one-line surveillance status.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.is_clear() {
            "ALL CLEAR".to_string()
        } else {
            format!(
                "{} BREACH(ES) REQUIRE ATTENTION",
                self.summary.breached
            )
        }
    }
}

/// Builds a report from verdicts.
///
/// The breach list is sorted by descending absolute deviation; ties keep
/// rule order.
#[must_use]
pub fn build_report(verdicts: Vec<Verdict>) -> SurveillanceReport {
    let total = verdicts.len();
    let passed = verdicts.iter().filter(|v| v.passed).count();

    let mut breaches: Vec<Breach> = verdicts
        .iter()
        .filter(|v| v.is_breach())
        .map(|v| Breach {
            rule_id: v.rule_id.clone(),
            deviation: v.deviation,
            severity: v.severity,
        })
        .collect();
    // Stable sort: equal deviations stay in rule order
    breaches.sort_by(|a, b| {
        b.deviation
            .abs()
            .partial_cmp(&a.deviation.abs())
            .unwrap_or(Ordering::Equal)
    });

    SurveillanceReport {
        verdicts,
        summary: ReportSummary {
            total,
            passed,
            breached: total - passed,
        },
        breaches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Comparator, MandateRule, MetricPath, PortfolioMetric};

    fn verdict(id: &str, observed: f64, comparator: Comparator, severity: Severity) -> Verdict {
        let rule = MandateRule::new(id, MetricPath::Portfolio(PortfolioMetric::Dv01), comparator)
            .with_severity(severity);
        Verdict::new(&rule, observed, comparator.bounds().test(observed))
    }

    #[test]
    fn test_summary_counts() {
        let report = build_report(vec![
            verdict("A", 1.0, Comparator::AtMost(2.0), Severity::Critical),
            verdict("B", 3.0, Comparator::AtMost(2.0), Severity::Critical),
            verdict("C", 1.0, Comparator::AtLeast(0.0), Severity::Info),
            verdict("D", 1.0, Comparator::AtLeast(0.5), Severity::Info),
        ]);

        assert_eq!(
            report.summary,
            ReportSummary {
                total: 4,
                passed: 3,
                breached: 1
            }
        );
        assert_eq!(report.pass_rate(), 75.0);
        assert!(!report.is_clear());
        assert_eq!(report.status_line(), "1 BREACH(ES) REQUIRE ATTENTION");
        assert_eq!(report.passes().len(), 3);
    }

    #[test]
    fn test_breaches_ranked_by_absolute_deviation() {
        let report = build_report(vec![
            verdict("SMALL", 55.0, Comparator::AtMost(50.0), Severity::Critical),
            verdict("FLOOR", 10.0, Comparator::AtLeast(18.0), Severity::Warning),
            verdict("LARGE", 62.0, Comparator::AtMost(50.0), Severity::Critical),
        ]);

        let order: Vec<&str> = report.breaches.iter().map(|b| b.rule_id.as_str()).collect();
        assert_eq!(order, vec!["LARGE", "FLOOR", "SMALL"]);
        assert_eq!(report.breaches[0].deviation, 12.0);
        assert_eq!(report.breaches[1].deviation, -8.0);

        let ranked: Vec<&str> = report
            .breached_verdicts()
            .iter()
            .map(|v| v.rule_id.as_str())
            .collect();
        assert_eq!(ranked, order);

        // Verdicts themselves stay in rule order
        assert_eq!(report.verdicts[0].rule_id, "SMALL");
    }

    #[test]
    fn test_ties_keep_rule_order() {
        let report = build_report(vec![
            verdict("FIRST", 7.0, Comparator::AtMost(5.0), Severity::Warning),
            verdict("SECOND", 3.0, Comparator::AtLeast(5.0), Severity::Critical),
        ]);
        assert_eq!(report.breaches[0].rule_id, "FIRST");
        assert_eq!(report.breaches[1].rule_id, "SECOND");
    }

    #[test]
    fn test_breaches_by_severity() {
        let report = build_report(vec![
            verdict("W", 7.0, Comparator::AtMost(5.0), Severity::Warning),
            verdict("C1", 9.0, Comparator::AtMost(5.0), Severity::Critical),
            verdict("C2", 6.0, Comparator::AtMost(5.0), Severity::Critical),
        ]);

        let critical: Vec<&str> = report
            .breaches_by_severity(Severity::Critical)
            .iter()
            .map(|b| b.rule_id.as_str())
            .collect();
        assert_eq!(critical, vec!["C1", "C2"]);
        assert!(report.breaches_by_severity(Severity::Info).is_empty());
    }

    #[test]
    fn test_empty_report_is_clear() {
        let report = build_report(Vec::new());
        assert!(report.is_clear());
        assert_eq!(report.pass_rate(), 100.0);
        assert_eq!(report.status_line(), "ALL CLEAR");
        assert!(report.verdict("X").is_none());
    }
}
