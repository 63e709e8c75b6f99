//! Cash flow types for bond pricing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowKind {
    /// Regular coupon payment
    Coupon,
    /// Principal repayment at maturity
    Principal,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowKind::Coupon => "Coupon",
            CashFlowKind::Principal => "Principal",
            CashFlowKind::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A single cash flow positioned on the coupon-period grid.
///
/// `period` is the discounting exponent (it may be fractional for the final
/// payment of a bond whose maturity is not a whole number of periods) and
/// `time` is the same point expressed in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Period index (1-based, possibly fractional for the last flow).
    pub period: f64,
    /// Time from valuation in years.
    pub time: f64,
    /// Cash amount in currency units.
    pub amount: f64,
    /// Type of cash flow.
    pub kind: CashFlowKind,
}

impl CashFlow {
    /// Creates a coupon cash flow.
    #[must_use]
    pub fn coupon(period: f64, time: f64, amount: f64) -> Self {
        Self {
            period,
            time,
            amount,
            kind: CashFlowKind::Coupon,
        }
    }

    /// Creates a principal-only cash flow.
    #[must_use]
    pub fn principal(period: f64, time: f64, amount: f64) -> Self {
        Self {
            period,
            time,
            amount,
            kind: CashFlowKind::Principal,
        }
    }

    /// Creates a final cash flow (coupon + principal).
    #[must_use]
    pub fn final_payment(period: f64, time: f64, coupon: f64, principal: f64) -> Self {
        Self {
            period,
            time,
            amount: coupon + principal,
            kind: CashFlowKind::CouponAndPrincipal,
        }
    }

    /// Returns true if this flow repays principal.
    #[must_use]
    pub fn is_principal(&self) -> bool {
        matches!(
            self.kind,
            CashFlowKind::Principal | CashFlowKind::CouponAndPrincipal
        )
    }
}

/// Ordered cash flows of one bond position.
///
/// Schedules are derived data: they are regenerated from the position
/// whenever pricing is requested and never stored alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Creates a schedule from flows already in time order.
    #[must_use]
    pub fn new(flows: Vec<CashFlow>) -> Self {
        Self { flows }
    }

    /// Returns the cash flows.
    #[must_use]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Returns an iterator over the cash flows.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if the schedule has no cash flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Returns the last cash flow.
    #[must_use]
    pub fn last(&self) -> Option<&CashFlow> {
        self.flows.last()
    }

    /// Returns the undiscounted sum of all cash flows.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.flows.iter().map(|cf| cf.amount).sum()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
