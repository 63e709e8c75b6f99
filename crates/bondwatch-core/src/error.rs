//! Error types for the Bondwatch engine.
//!
//! Every stage of the pipeline (pricing, risk, aggregation, compliance)
//! reports failures through [`BondwatchError`]. Errors are raised at the
//! stage where the bad input is first used and are never retried.

use thiserror::Error;

/// A specialized Result type for Bondwatch operations.
pub type BondwatchResult<T> = Result<T, BondwatchError>;

/// The main error type for Bondwatch operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondwatchError {
    /// Malformed bond economics (non-positive maturity, frequency or present value).
    #[error("Validation failed for '{id}': {reason}")]
    Validation {
        /// Identifier of the offending position.
        id: String,
        /// Description of what is invalid.
        reason: String,
    },

    /// Aggregation was attempted on a portfolio with no positions.
    #[error("Portfolio has no positions")]
    EmptyPortfolio,

    /// A rule or category definition cannot be resolved.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Description of the configuration problem.
        reason: String,
    },

    /// A required field was not supplied to a builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },
}

impl BondwatchError {
    /// Creates a validation error for a position.
    #[must_use]
    pub fn validation(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
