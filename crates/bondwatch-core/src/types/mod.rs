//! Domain types for Bondwatch.
//!
//! - [`BondPosition`]: an immutable fixed-rate bond holding
//! - [`CashFlow`] / [`CashFlowSchedule`]: derived payment schedule
//! - [`Sector`], [`CreditRating`], [`RatingBucket`]: closed classification sets

mod cashflow;
mod position;
mod rating;
mod sector;

pub use cashflow::{CashFlow, CashFlowKind, CashFlowSchedule};
pub use position::{BondPosition, BondPositionBuilder, MAX_COUPON_PERIODS};
pub use rating::{CreditRating, RatingBucket};
pub use sector::Sector;
