//! Credit rating types.
//!
//! - [`CreditRating`]: notched, agency-agnostic rating scale (AAA to D)
//! - [`RatingBucket`]: letter-grade groups used for credit-quality allocation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BondwatchError;

/// Normalized credit rating (agency-agnostic).
///
/// Ordering runs from highest quality to lowest, so `AAA < AA < BBB`.
///
/// # Examples
///
/// ```
/// use bondwatch_core::types::{CreditRating, RatingBucket};
///
/// let rating: CreditRating = "Aa1".parse().unwrap();
/// assert_eq!(rating, CreditRating::AAPlus);
/// assert_eq!(rating.bucket(), RatingBucket::AA);
/// assert!(CreditRating::AAA < CreditRating::BBB);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreditRating {
    /// Highest quality
    AAA = 1,
    /// AA+
    AAPlus = 2,
    /// AA
    AA = 3,
    /// AA-
    AAMinus = 4,
    /// A+
    APlus = 5,
    /// A
    A = 6,
    /// A-
    AMinus = 7,
    /// BBB+
    BBBPlus = 8,
    /// BBB
    BBB = 9,
    /// BBB- (lowest investment grade)
    BBBMinus = 10,
    /// BB+
    BBPlus = 11,
    /// BB
    BB = 12,
    /// BB-
    BBMinus = 13,
    /// B+
    BPlus = 14,
    /// B
    B = 15,
    /// B-
    BMinus = 16,
    /// CCC+
    CCCPlus = 17,
    /// CCC
    CCC = 18,
    /// CCC-
    CCCMinus = 19,
    /// CC
    CC = 20,
    /// C
    C = 21,
    /// Default
    D = 22,
    /// Not rated
    NotRated = 99,
}

impl CreditRating {
    /// Returns the numeric score (1 = AAA, 22 = D, 99 = NR).
    #[must_use]
    pub fn score(&self) -> u8 {
        *self as u8
    }

    /// Returns true if this is investment grade (BBB- or better).
    #[must_use]
    pub fn is_investment_grade(&self) -> bool {
        *self <= CreditRating::BBBMinus
    }

    /// Returns the rating bucket for this rating.
    #[must_use]
    pub fn bucket(&self) -> RatingBucket {
        match self {
            Self::AAA => RatingBucket::AAA,
            Self::AAPlus | Self::AA | Self::AAMinus => RatingBucket::AA,
            Self::APlus | Self::A | Self::AMinus => RatingBucket::A,
            Self::BBBPlus | Self::BBB | Self::BBBMinus => RatingBucket::BBB,
            Self::BBPlus | Self::BB | Self::BBMinus => RatingBucket::BB,
            Self::BPlus | Self::B | Self::BMinus => RatingBucket::B,
            Self::CCCPlus | Self::CCC | Self::CCCMinus | Self::CC | Self::C => RatingBucket::CCC,
            Self::D => RatingBucket::Default,
            Self::NotRated => RatingBucket::NotRated,
        }
    }

    /// Returns the S&P-style notation.
    #[must_use]
    pub fn sp_notation(&self) -> &'static str {
        match self {
            Self::AAA => "AAA",
            Self::AAPlus => "AA+",
            Self::AA => "AA",
            Self::AAMinus => "AA-",
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BBBPlus => "BBB+",
            Self::BBB => "BBB",
            Self::BBBMinus => "BBB-",
            Self::BBPlus => "BB+",
            Self::BB => "BB",
            Self::BBMinus => "BB-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CCCPlus => "CCC+",
            Self::CCC => "CCC",
            Self::CCCMinus => "CCC-",
            Self::CC => "CC",
            Self::C => "C",
            Self::D => "D",
            Self::NotRated => "NR",
        }
    }

    /// Parses a rating from S&P or Moody's notation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        // Moody's notation is case-sensitive ("A1" vs "a1" is not ambiguous,
        // but "Aa1" would collide with S&P after uppercasing).
        match s.trim() {
            "Aaa" => return Some(Self::AAA),
            "Aa1" => return Some(Self::AAPlus),
            "Aa2" => return Some(Self::AA),
            "Aa3" => return Some(Self::AAMinus),
            "A1" => return Some(Self::APlus),
            "A2" => return Some(Self::A),
            "A3" => return Some(Self::AMinus),
            "Baa1" => return Some(Self::BBBPlus),
            "Baa2" => return Some(Self::BBB),
            "Baa3" => return Some(Self::BBBMinus),
            "Ba1" => return Some(Self::BBPlus),
            "Ba2" => return Some(Self::BB),
            "Ba3" => return Some(Self::BBMinus),
            "B1" => return Some(Self::BPlus),
            "B2" => return Some(Self::B),
            "B3" => return Some(Self::BMinus),
            "Caa1" => return Some(Self::CCCPlus),
            "Caa2" => return Some(Self::CCC),
            "Caa3" => return Some(Self::CCCMinus),
            "Ca" => return Some(Self::CC),
            _ => {}
        }

        match s.trim().to_uppercase().as_str() {
            "AAA" => Some(Self::AAA),
            "AA+" => Some(Self::AAPlus),
            "AA" => Some(Self::AA),
            "AA-" => Some(Self::AAMinus),
            "A+" => Some(Self::APlus),
            "A" => Some(Self::A),
            "A-" => Some(Self::AMinus),
            "BBB+" => Some(Self::BBBPlus),
            "BBB" => Some(Self::BBB),
            "BBB-" => Some(Self::BBBMinus),
            "BB+" => Some(Self::BBPlus),
            "BB" => Some(Self::BB),
            "BB-" => Some(Self::BBMinus),
            "B+" => Some(Self::BPlus),
            "B" => Some(Self::B),
            "B-" => Some(Self::BMinus),
            "CCC+" => Some(Self::CCCPlus),
            "CCC" => Some(Self::CCC),
            "CCC-" => Some(Self::CCCMinus),
            "CC" => Some(Self::CC),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "NR" | "NOT RATED" | "NOTRATED" => Some(Self::NotRated),
            _ => None,
        }
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sp_notation())
    }
}

impl FromStr for CreditRating {
    type Err = BondwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| BondwatchError::configuration(format!("unknown credit rating '{s}'")))
    }
}

/// Letter-grade rating bucket for credit-quality allocation.
///
/// Ordered from highest quality to lowest, so a bucket compares less than
/// any bucket of worse quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatingBucket {
    /// AAA
    AAA,
    /// AA+, AA, AA-
    AA,
    /// A+, A, A-
    A,
    /// BBB+, BBB, BBB-
    BBB,
    /// BB+, BB, BB-
    BB,
    /// B+, B, B-
    B,
    /// CCC+, CCC, CCC-, CC, C
    CCC,
    /// D
    Default,
    /// Not Rated
    NotRated,
}

impl RatingBucket {
    /// Returns the short code used in metric paths ("AAA", "BBB", "NR", ...).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AAA => "AAA",
            Self::AA => "AA",
            Self::A => "A",
            Self::BBB => "BBB",
            Self::BB => "BB",
            Self::B => "B",
            Self::CCC => "CCC",
            Self::Default => "D",
            Self::NotRated => "NR",
        }
    }

    /// Returns the label for this bucket.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CCC => "CCC & Below",
            Self::Default => "Default",
            Self::NotRated => "Not Rated",
            other => other.code(),
        }
    }

    /// Returns true if this bucket is investment grade.
    #[must_use]
    pub fn is_investment_grade(&self) -> bool {
        matches!(self, Self::AAA | Self::AA | Self::A | Self::BBB)
    }

    /// Returns true if this bucket is at least as good as `floor`.
    ///
    /// Not-rated holdings never qualify.
    #[must_use]
    pub fn is_at_or_above(&self, floor: RatingBucket) -> bool {
        *self != Self::NotRated && *self <= floor
    }

    /// Returns all buckets in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::AAA,
            Self::AA,
            Self::A,
            Self::BBB,
            Self::BB,
            Self::B,
            Self::CCC,
            Self::Default,
            Self::NotRated,
        ]
    }
}

impl fmt::Display for RatingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RatingBucket {
    type Err = BondwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|b| b.code() == key || b.label().to_uppercase() == key)
            .ok_or_else(|| BondwatchError::configuration(format!("unknown rating bucket '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_rating_ordering() {
        assert!(CreditRating::AAA < CreditRating::AA);
        assert!(CreditRating::BBBMinus < CreditRating::BBPlus);
        assert!(CreditRating::D < CreditRating::NotRated);
    }

    #[test]
    fn test_credit_rating_investment_grade() {
        assert!(CreditRating::AAA.is_investment_grade());
        assert!(CreditRating::BBBMinus.is_investment_grade());
        assert!(!CreditRating::BBPlus.is_investment_grade());
        assert!(!CreditRating::NotRated.is_investment_grade());
    }

    #[test]
    fn test_credit_rating_bucket() {
        assert_eq!(CreditRating::AAA.bucket(), RatingBucket::AAA);
        assert_eq!(CreditRating::AAMinus.bucket(), RatingBucket::AA);
        assert_eq!(CreditRating::CC.bucket(), RatingBucket::CCC);
        assert_eq!(CreditRating::D.bucket(), RatingBucket::Default);
    }

    #[test]
    fn test_credit_rating_parse() {
        assert_eq!("AAA".parse::<CreditRating>().unwrap(), CreditRating::AAA);
        assert_eq!("aa".parse::<CreditRating>().unwrap(), CreditRating::AA);
        assert_eq!("Aa1".parse::<CreditRating>().unwrap(), CreditRating::AAPlus);
        assert_eq!("Baa2".parse::<CreditRating>().unwrap(), CreditRating::BBB);
        assert_eq!("NR".parse::<CreditRating>().unwrap(), CreditRating::NotRated);
        assert!("XXX".parse::<CreditRating>().unwrap_err().is_configuration());
    }

    #[test]
    fn test_bucket_parse_and_order() {
        assert_eq!("aa".parse::<RatingBucket>().unwrap(), RatingBucket::AA);
        assert_eq!("NR".parse::<RatingBucket>().unwrap(), RatingBucket::NotRated);
        assert!("Z".parse::<RatingBucket>().is_err());

        assert!(RatingBucket::AAA.is_at_or_above(RatingBucket::AA));
        assert!(RatingBucket::AA.is_at_or_above(RatingBucket::AA));
        assert!(!RatingBucket::A.is_at_or_above(RatingBucket::AA));
        assert!(!RatingBucket::NotRated.is_at_or_above(RatingBucket::CCC));
    }

    #[test]
    fn test_serde() {
        let rating = CreditRating::BBBPlus;
        let json = serde_json::to_string(&rating).unwrap();
        let parsed: CreditRating = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rating);
    }
}
