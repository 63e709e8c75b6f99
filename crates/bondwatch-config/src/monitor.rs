//! Monitor run configuration.

use std::path::{Path, PathBuf};

use bondwatch_compliance::MandateRule;
use bondwatch_core::types::BondPosition;
use bondwatch_portfolio::types::AnalyticsConfig;
use bondwatch_portfolio::PortfolioSnapshot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::limits::MandateLimits;
use crate::loader::{load_positions, load_rules, resolve};
use crate::sample::sample_positions;

/// Configuration for one surveillance run.
///
/// ```toml
/// valuation_date = "2025-06-30"
/// positions = "book.csv"
/// rules = "mandate.json"
///
/// [limits]
/// max_sector_concentration = 45.0
///
/// [analytics]
/// parallel_threshold = 500
/// ```
///
/// Relative paths are resolved against the directory of the config file.
/// Without `positions` the sample book is used; without `rules` the
/// `limits` are expanded against the book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Valuation date; today when absent.
    pub valuation_date: Option<NaiveDate>,

    /// Positions file (CSV, JSON or TOML).
    pub positions: Option<PathBuf>,

    /// Rules file (JSON or TOML).
    pub rules: Option<PathBuf>,

    /// Mandate limits used when no rules file is given.
    pub limits: MandateLimits,

    /// Pricing settings.
    pub analytics: AnalyticsConfig,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl MonitorConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O, parse or validation error.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Returns the valuation date, falling back to `today`.
    #[must_use]
    pub fn valuation_date_or(&self, today: NaiveDate) -> NaiveDate {
        self.valuation_date.unwrap_or(today)
    }

    /// Returns the resolved positions path, if any.
    #[must_use]
    pub fn positions_path(&self) -> Option<PathBuf> {
        self.positions
            .as_deref()
            .map(|p| resolve(self.base_dir.as_deref(), p))
    }

    /// Returns the resolved rules path, if any.
    #[must_use]
    pub fn rules_path(&self) -> Option<PathBuf> {
        self.rules
            .as_deref()
            .map(|p| resolve(self.base_dir.as_deref(), p))
    }

    /// Loads the book, or the sample book when no positions file is set.
    ///
    /// # Errors
    ///
    /// Returns a load or conversion error.
    pub fn load_positions(&self, valuation_date: NaiveDate) -> ConfigResult<Vec<BondPosition>> {
        match self.positions_path() {
            Some(path) => load_positions(path, Some(valuation_date)),
            None => sample_positions(valuation_date),
        }
    }

    /// Loads the rules file, or expands the limits against the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a load error.
    pub fn load_rules(&self, snapshot: &PortfolioSnapshot) -> ConfigResult<Vec<MandateRule>> {
        match self.rules_path() {
            Some(path) => load_rules(path),
            None => Ok(self.limits.expand(snapshot)),
        }
    }
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = self
            .limits
            .validate()
            .into_iter()
            .map(|e| ValidationError::new(format!("limits.{}", e.field), e.message))
            .collect();

        if self.analytics.parallel_threshold == 0 {
            errors.push(ValidationError::new(
                "analytics.parallel_threshold",
                "must be at least 1",
            ));
        }

        errors
    }
}
