//! # Bondwatch Core
//!
//! Core types and errors for the Bondwatch fixed income surveillance engine.
//!
//! This crate provides the building blocks shared by every stage of the
//! pipeline:
//!
//! - **Positions**: [`BondPosition`](types::BondPosition) and its builder
//! - **Cash flows**: [`CashFlowSchedule`](types::CashFlowSchedule)
//! - **Classification**: closed [`Sector`](types::Sector) and
//!   [`CreditRating`](types::CreditRating) sets that fail fast on unknown input
//! - **Errors**: [`BondwatchError`] with its three engine error kinds
//!
//! ## Example
//!
//! ```rust
//! use bondwatch_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bond = BondPosition::builder()
//!     .id("MUNI-NYC-8Y")
//!     .sector("Municipal".parse()?)
//!     .rating("AA".parse()?)
//!     .face_value(dec!(4_000_000))
//!     .coupon_rate(0.032)
//!     .years_to_maturity(8.0)
//!     .ytm(0.0335)
//!     .build()?;
//!
//! assert_eq!(bond.sector(), Sector::Municipal);
//! # Ok::<(), BondwatchError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{BondwatchError, BondwatchResult};
    pub use crate::types::{
        BondPosition, BondPositionBuilder, CashFlow, CashFlowKind, CashFlowSchedule, CreditRating,
        RatingBucket, Sector,
    };
}

// Re-export commonly used types at crate root
pub use error::{BondwatchError, BondwatchResult};
pub use types::{BondPosition, CreditRating, RatingBucket, Sector};
