//! Compliance engine: evaluates mandate rules against a snapshot.
//!
//! Evaluation is two-phase. All rules are checked for configuration problems
//! first, so a bad rule set produces an error and no verdicts at all. Then
//! each rule is evaluated independently, in input order.

use bondwatch_core::{BondwatchError, BondwatchResult};
use bondwatch_portfolio::PortfolioSnapshot;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::rule::{MandateRule, MetricPath, PortfolioMetric, PositionMetric};
use crate::verdict::Verdict;

/// Evaluates every rule against the snapshot.
///
/// Returns one verdict per rule, in rule order.
///
/// # Errors
///
/// Returns `BondwatchError::Configuration` (before producing any verdict)
/// if two rules share an id, a comparator is malformed, or a rule names a
/// position that is not in the snapshot.
pub fn evaluate(
    snapshot: &PortfolioSnapshot,
    rules: &[MandateRule],
) -> BondwatchResult<Vec<Verdict>> {
    validate_rules(snapshot, rules)?;

    let verdicts = rules
        .iter()
        .map(|rule| evaluate_rule(snapshot, rule))
        .collect::<BondwatchResult<Vec<_>>>()?;

    let breaches = verdicts.iter().filter(|v| v.is_breach()).count();
    info!(rules = rules.len(), breaches, "Evaluated mandate rules");

    Ok(verdicts)
}

/// Checks a rule set against a snapshot without evaluating it.
///
/// # Errors
///
/// See [`evaluate`].
pub fn validate_rules(snapshot: &PortfolioSnapshot, rules: &[MandateRule]) -> BondwatchResult<()> {
    let mut ids = HashSet::with_capacity(rules.len());

    for rule in rules {
        if !ids.insert(rule.id.as_str()) {
            return Err(BondwatchError::configuration(format!(
                "duplicate rule id '{}'",
                rule.id
            )));
        }

        rule.comparator.validate(&rule.id)?;

        if let Some(id) = rule.metric.position_id() {
            if !snapshot.contains(id) {
                return Err(BondwatchError::configuration(format!(
                    "rule '{}' references position '{id}' which is not in the portfolio",
                    rule.id
                )));
            }
        }
    }

    Ok(())
}

/// Reads the value a metric path refers to.
///
/// Absent sectors and rating buckets read as 0. Returns `None` only for a
/// position id that is not in the snapshot.
#[must_use]
pub fn observe(snapshot: &PortfolioSnapshot, path: &MetricPath) -> Option<f64> {
    let value = match path {
        MetricPath::Portfolio(metric) => match metric {
            PortfolioMetric::MarketValue => snapshot.total_market_value_f64(),
            PortfolioMetric::Ytm => snapshot.weighted_ytm(),
            PortfolioMetric::Coupon => snapshot.weighted_coupon(),
            PortfolioMetric::ModifiedDuration => snapshot.weighted_modified_duration(),
            PortfolioMetric::MacaulayDuration => snapshot.weighted_macaulay_duration(),
            PortfolioMetric::Dv01 => snapshot.total_dv01(),
        },
        MetricPath::Sector(sector) => snapshot.sector_weight(*sector),
        MetricPath::Rating(bucket) => snapshot.rating_weight(*bucket),
        MetricPath::RatingAtOrAbove(bucket) => snapshot.rating_at_or_above_weight(*bucket),
        MetricPath::Position { id, metric } => {
            let holding = snapshot.holding(id)?;
            match metric {
                PositionMetric::Weight => holding.weight_pct,
                PositionMetric::MarketValue => holding.market_value_f64(),
                PositionMetric::Ytm => holding.ytm(),
                PositionMetric::ModifiedDuration => holding.modified_duration(),
                PositionMetric::MacaulayDuration => holding.macaulay_duration(),
                PositionMetric::Dv01 => holding.dv01(),
            }
        }
    };
    Some(value)
}

fn evaluate_rule(snapshot: &PortfolioSnapshot, rule: &MandateRule) -> BondwatchResult<Verdict> {
    let observed = observe(snapshot, &rule.metric).ok_or_else(|| {
        BondwatchError::configuration(format!(
            "rule '{}' references a position which is not in the portfolio",
            rule.id
        ))
    })?;

    let outcome = rule.comparator.bounds().test(observed);
    let verdict = Verdict::new(rule, observed, outcome);

    if verdict.passed {
        debug!(rule = %verdict.rule_id, observed, "Rule passed");
    } else {
        warn!(
            rule = %verdict.rule_id,
            severity = %verdict.severity,
            observed,
            threshold = verdict.threshold,
            deviation = verdict.deviation,
            "Mandate breach"
        );
    }

    Ok(verdict)
}
