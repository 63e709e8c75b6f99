//! File loaders for positions, rules and limits.
//!
//! The format is chosen by file extension:
//!
//! | Extension | Positions            | Rules             | Limits  |
//! |-----------|----------------------|-------------------|---------|
//! | `.csv`    | one record per row   | -                 | -       |
//! | `.json`   | array of records     | array of rules    | object  |
//! | `.toml`   | `[[positions]]`      | `[[rules]]`       | table   |
//!
//! TOML dates must be quoted (`maturity = "2030-06-30"`).

use std::path::{Path, PathBuf};

use bondwatch_compliance::MandateRule;
use bondwatch_core::types::BondPosition;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult, Validate};
use crate::limits::MandateLimits;
use crate::records::{into_positions, BondRecord};

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON.
    Json,
    /// TOML.
    Toml,
}

impl FileFormat {
    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct PositionsFile {
    positions: Vec<BondRecord>,
}

#[derive(Deserialize)]
struct RulesFile {
    rules: Vec<MandateRule>,
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: DeserializeOwned>(content: &str, format: FileFormat) -> ConfigResult<T> {
    match format {
        FileFormat::Json => Ok(serde_json::from_str(content)?),
        FileFormat::Toml => Ok(toml::from_str(content)?),
        FileFormat::Csv => Err(ConfigError::Deserialization(
            "CSV only carries position records".to_string(),
        )),
    }
}

/// Parses position records from CSV text.
///
/// # Errors
///
/// Returns `ConfigError::Csv` on the first malformed row.
pub fn parse_records_csv<R: std::io::Read>(reader: R) -> ConfigResult<Vec<BondRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: BondRecord = result?;
        records.push(record);
    }
    Ok(records)
}

/// Loads position records from a CSV, JSON or TOML file.
///
/// # Errors
///
/// Returns an I/O, format or parse error.
pub fn load_records(path: impl AsRef<Path>) -> ConfigResult<Vec<BondRecord>> {
    let path = path.as_ref();
    let records = match FileFormat::from_path(path)? {
        FileFormat::Csv => {
            let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_records_csv(file)?
        }
        FileFormat::Json => parse(&read(path)?, FileFormat::Json)?,
        FileFormat::Toml => parse::<PositionsFile>(&read(path)?, FileFormat::Toml)?.positions,
    };
    debug!(path = %path.display(), count = records.len(), "Loaded position records");
    Ok(records)
}

/// Loads positions from a file and converts them for the given valuation date.
///
/// # Errors
///
/// Returns a load error or the first record conversion error.
pub fn load_positions(
    path: impl AsRef<Path>,
    valuation_date: Option<NaiveDate>,
) -> ConfigResult<Vec<BondPosition>> {
    let path = path.as_ref();
    let positions = into_positions(load_records(path)?, valuation_date)?;
    info!(path = %path.display(), positions = positions.len(), "Loaded positions");
    Ok(positions)
}

/// Loads mandate rules from a JSON or TOML file.
///
/// Rules are not checked against a book here; unresolvable paths surface as
/// configuration errors when the rules are evaluated.
///
/// # Errors
///
/// Returns an I/O, format or parse error.
pub fn load_rules(path: impl AsRef<Path>) -> ConfigResult<Vec<MandateRule>> {
    let path = path.as_ref();
    let content = read(path)?;
    let rules = match FileFormat::from_path(path)? {
        FileFormat::Toml => parse::<RulesFile>(&content, FileFormat::Toml)?.rules,
        format => parse(&content, format)?,
    };
    info!(path = %path.display(), rules = rules.len(), "Loaded mandate rules");
    Ok(rules)
}

/// Loads and validates mandate limits from a JSON or TOML file.
///
/// # Errors
///
/// Returns an I/O, format, parse or validation error.
pub fn load_limits(path: impl AsRef<Path>) -> ConfigResult<MandateLimits> {
    let path = path.as_ref();
    let limits: MandateLimits = parse(&read(path)?, FileFormat::from_path(path)?)?;
    limits.validate_or_error()?;
    Ok(limits)
}

/// Resolves `path` against `base` unless it is already absolute.
#[must_use]
pub fn resolve(base: Option<&Path>, path: &Path) -> PathBuf {
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDate` if the text is not a valid date.
pub fn parse_date(value: &str) -> ConfigResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
        ConfigError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}
