//! # Bondwatch Config
//!
//! Input construction for the Bondwatch surveillance engine, kept apart
//! from the engine itself:
//!
//! - **Records**: [`BondRecord`] rows from CSV, JSON or TOML files
//! - **Limits**: [`MandateLimits`] expanded into rules against a book
//! - **Monitor**: [`MonitorConfig`] describing one surveillance run
//! - **Sample**: a built-in five-bond book
//!
//! ## Example
//!
//! ```rust
//! use bondwatch_config::prelude::*;
//! use bondwatch_compliance::surveil;
//! use bondwatch_portfolio::prelude::*;
//! use chrono::NaiveDate;
//!
//! let as_of = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
//! let book = sample_positions(as_of)?;
//! let snapshot = aggregate(price_positions(&book, &AnalyticsConfig::default())?)?;
//!
//! let rules = MandateLimits::default().expand(&snapshot);
//! let report = surveil(&snapshot, &rules)?;
//! assert_eq!(report.summary.total, rules.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod limits;
pub mod loader;
pub mod monitor;
pub mod records;
pub mod sample;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use limits::MandateLimits;
pub use monitor::MonitorConfig;
pub use records::BondRecord;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::limits::MandateLimits;
    pub use crate::loader::{
        load_limits, load_positions, load_records, load_rules, parse_date, FileFormat,
    };
    pub use crate::monitor::MonitorConfig;
    pub use crate::records::{year_fraction, BondRecord};
    pub use crate::sample::{sample_positions, sample_records};
}
