//! Issuer sector classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BondwatchError;

/// Issuer sector for allocation and concentration analysis.
///
/// The set is closed: strings that do not name one of these sectors fail to
/// parse instead of landing in a catch-all bucket.
///
/// # Examples
///
/// ```
/// use bondwatch_core::types::Sector;
///
/// let sector: Sector = "govt".parse().unwrap();
/// assert_eq!(sector, Sector::Government);
/// assert!("Crypto".parse::<Sector>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// Sovereign government bonds
    Government,
    /// Government agency and GSE bonds
    Agency,
    /// Supranational issuer bonds (World Bank, etc.)
    Supranational,
    /// Municipal bonds
    Municipal,
    /// Banks, insurers and other financial institutions
    Financial,
    /// Technology companies
    Technology,
    /// Industrial companies
    Industrial,
    /// Utility companies
    Utility,
    /// Energy producers
    Energy,
    /// Healthcare companies
    Healthcare,
    /// Consumer goods and services
    Consumer,
    /// Telecom and media
    Communications,
    /// Asset-backed securities
    AssetBacked,
    /// Mortgage-backed securities
    MortgageBacked,
    /// Covered bonds
    CoveredBond,
}

impl Sector {
    /// Returns all sectors in a standard order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Government,
            Self::Agency,
            Self::Supranational,
            Self::Municipal,
            Self::Financial,
            Self::Technology,
            Self::Industrial,
            Self::Utility,
            Self::Energy,
            Self::Healthcare,
            Self::Consumer,
            Self::Communications,
            Self::AssetBacked,
            Self::MortgageBacked,
            Self::CoveredBond,
        ]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Government => "Government",
            Self::Agency => "Agency",
            Self::Supranational => "Supranational",
            Self::Municipal => "Municipal",
            Self::Financial => "Financial",
            Self::Technology => "Technology",
            Self::Industrial => "Industrial",
            Self::Utility => "Utility",
            Self::Energy => "Energy",
            Self::Healthcare => "Healthcare",
            Self::Consumer => "Consumer",
            Self::Communications => "Communications",
            Self::AssetBacked => "Asset-Backed",
            Self::MortgageBacked => "Mortgage-Backed",
            Self::CoveredBond => "Covered Bond",
        }
    }

    /// Returns a short code for the sector.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Government => "GOVT",
            Self::Agency => "AGCY",
            Self::Supranational => "SUPRA",
            Self::Municipal => "MUNI",
            Self::Financial => "FIN",
            Self::Technology => "TECH",
            Self::Industrial => "IND",
            Self::Utility => "UTIL",
            Self::Energy => "ENGY",
            Self::Healthcare => "HLTH",
            Self::Consumer => "CONS",
            Self::Communications => "COMM",
            Self::AssetBacked => "ABS",
            Self::MortgageBacked => "MBS",
            Self::CoveredBond => "CVB",
        }
    }

    /// Returns true if this is a government or quasi-government sector.
    #[must_use]
    pub fn is_government_related(&self) -> bool {
        matches!(
            self,
            Self::Government | Self::Agency | Self::Supranational | Self::Municipal
        )
    }

    /// Returns true if this is a securitized sector.
    #[must_use]
    pub fn is_securitized(&self) -> bool {
        matches!(
            self,
            Self::AssetBacked | Self::MortgageBacked | Self::CoveredBond
        )
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Sector {
    type Err = BondwatchError;

    /// Parses a sector from its name or code, ignoring case, spaces and dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();

        Self::all()
            .iter()
            .copied()
            .find(|sector| {
                let name: String = sector
                    .name()
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '-')
                    .collect::<String>()
                    .to_ascii_uppercase();
                name == key || sector.code() == key
            })
            .ok_or_else(|| BondwatchError::configuration(format!("unknown sector '{s}'")))
    }
}
