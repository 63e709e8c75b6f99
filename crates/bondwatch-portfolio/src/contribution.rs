//! Risk contribution analysis.
//!
//! Shows how each holding's share of DV01 compares with its share of market
//! value. Long-dated positions carry more rate risk than their weight
//! suggests. This is a reporting view; compliance rules test DV01 directly.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::snapshot::PortfolioSnapshot;

/// Contribution of a single holding to portfolio DV01.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingContribution {
    /// Holding identifier.
    pub id: String,

    /// Market value weight as percentage of total (0-100).
    pub weight_pct: f64,

    /// Absolute contribution (position DV01).
    pub contribution: f64,

    /// Contribution as percentage of total DV01 (0-100).
    pub contribution_pct: f64,
}

impl HoldingContribution {
    /// Returns DV01 share divided by MV share.
    ///
    /// Above 1.0 the holding carries more rate risk than its weight.
    #[must_use]
    pub fn risk_to_weight(&self) -> f64 {
        if self.weight_pct == 0.0 {
            return 0.0;
        }
        self.contribution_pct / self.weight_pct
    }
}

/// DV01 contribution analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dv01Contributions {
    /// Contributions by holding, in snapshot order.
    pub by_holding: Vec<HoldingContribution>,

    /// Total portfolio DV01.
    pub total_dv01: f64,
}

impl Dv01Contributions {
    /// Returns the top N contributors by absolute DV01.
    #[must_use]
    pub fn top_contributors(&self, n: usize) -> Vec<&HoldingContribution> {
        let mut sorted: Vec<&HoldingContribution> = self.by_holding.iter().collect();
        sorted.sort_by(|a, b| {
            b.contribution
                .abs()
                .partial_cmp(&a.contribution.abs())
                .unwrap_or(Ordering::Equal)
        });
        sorted.truncate(n);
        sorted
    }

    /// Returns holdings whose DV01 share exceeds their MV share.
    #[must_use]
    pub fn overweight_risk(&self) -> Vec<&HoldingContribution> {
        self.by_holding
            .iter()
            .filter(|c| c.contribution_pct > c.weight_pct)
            .collect()
    }
}

/// Calculates each holding's contribution to portfolio DV01.
#[must_use]
pub fn dv01_contributions(snapshot: &PortfolioSnapshot) -> Dv01Contributions {
    let total_dv01 = snapshot.total_dv01();

    let by_holding = snapshot
        .holdings()
        .iter()
        .map(|h| {
            let contribution = h.dv01();
            let contribution_pct = if total_dv01 == 0.0 {
                0.0
            } else {
                contribution / total_dv01 * 100.0
            };
            HoldingContribution {
                id: h.id().to_string(),
                weight_pct: h.weight_pct,
                contribution,
                contribution_pct,
            }
        })
        .collect();

    Dv01Contributions {
        by_holding,
        total_dv01,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_snapshot;
    use approx::assert_relative_eq;

    #[test]
    fn test_contributions_sum_to_100() {
        let contributions = dv01_contributions(&sample_snapshot());

        let total: f64 = contributions
            .by_holding
            .iter()
            .map(|c| c.contribution_pct)
            .sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
        assert_eq!(contributions.by_holding.len(), 4);
        assert_eq!(contributions.by_holding[0].id, "G1");
    }

    #[test]
    fn test_long_bond_overweights_risk() {
        let contributions = dv01_contributions(&sample_snapshot());

        // F1 is the 10-year position
        let top = contributions.top_contributors(1);
        assert_eq!(top[0].id, "F1");

        let overweight: Vec<&str> = contributions
            .overweight_risk()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert!(overweight.contains(&"F1"));
        assert!(!overweight.contains(&"G1"));
        assert!(contributions.by_holding[3].risk_to_weight() > 1.0);
    }
}
