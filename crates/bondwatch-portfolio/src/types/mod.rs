//! Core types for portfolio analytics.

mod config;
mod holding;
mod priced;

pub use config::{AnalyticsConfig, PricingMode, DEFAULT_PARALLEL_THRESHOLD};
pub use holding::Holding;
pub use priced::PricedPosition;

// Re-export classification types used throughout the crate
pub use bondwatch_core::types::{BondPosition, RatingBucket, Sector};
