//! Canonical contract month.
//!
//! Risk files encode expiry as an 8-digit `YYYYMMDD` code, while settlement
//! files write free-form dates such as `30-Jan-2025`. Both reduce to a
//! [`MonthKey`] so that contracts from the two files can be joined.
//!
//! # Examples
//!
//! ```
//! use risk_core::types::MonthKey;
//!
//! assert_eq!(MonthKey::from_expiry_code("20250130").to_string(), "JAN-2025");
//! assert_eq!(MonthKey::from_expiry_code("2025013").to_string(), "UNK");
//! assert_eq!(
//!     MonthKey::from_settlement_expiry("27 Feb 2025").map(|m| m.to_string()),
//!     Some("FEB-2025".to_string())
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Three-letter month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Label of the unknown-month sentinel.
pub const UNKNOWN_MONTH_LABEL: &str = "UNK";

/// Numeric date layouts accepted when a settlement expiry has no month name.
const NUMERIC_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y%m%d"];

/// Contract month, or the `UNK` sentinel for unparseable expiries.
///
/// `Unknown` compares equal only to itself, so unknown-month contracts join
/// only with other unknown-month records. Ordering is chronological with
/// `Unknown` last.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthKey {
    /// A calendar month.
    Known {
        /// Four-digit year
        year: i32,
        /// Month number, 1 to 12
        month: u32,
    },
    /// Absent or unparseable expiry.
    Unknown,
}

impl MonthKey {
    /// Create a known month, returning `None` for a month outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12)
            .contains(&month)
            .then_some(MonthKey::Known { year, month })
    }

    /// Derive the month from a risk-file `YYYYMMDD` expiry code.
    ///
    /// The code must be exactly eight ASCII digits with a month of `01` to
    /// `12`; anything else maps to [`MonthKey::Unknown`].
    pub fn from_expiry_code(code: &str) -> Self {
        let code = code.trim();
        if code.len() != 8 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return MonthKey::Unknown;
        }
        let year = code[..4].parse::<i32>().ok();
        let month = code[4..6].parse::<u32>().ok();
        match (year, month) {
            (Some(year), Some(month)) => Self::new(year, month).unwrap_or(MonthKey::Unknown),
            _ => MonthKey::Unknown,
        }
    }

    /// Derive the month from a settlement-file expiry cell.
    ///
    /// The text is upper-cased and stripped of whitespace, then searched for
    /// a three-letter month name and a `20xx` year anywhere in it. Purely
    /// numeric dates (`2025-01-30`, `30/01/2025`, ...) are accepted as a
    /// fallback. Returns `None` when no month can be derived.
    pub fn from_settlement_expiry(text: &str) -> Option<Self> {
        let compact: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        if let Some(index) = MONTH_LABELS.iter().position(|m| compact.contains(m)) {
            let year = find_year(&compact)?;
            return Self::new(year, index as u32 + 1);
        }

        NUMERIC_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text.trim(), fmt).ok())
            .and_then(|date| Self::new(date.year(), date.month()))
    }

    /// Whether this is the `UNK` sentinel.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, MonthKey::Unknown)
    }
}

/// First `20dd` run in the text, read as a year.
fn find_year(text: &str) -> Option<i32> {
    text.as_bytes().windows(4).find_map(|w| {
        let is_year =
            w[0] == b'2' && w[1] == b'0' && w[2].is_ascii_digit() && w[3].is_ascii_digit();
        if is_year {
            std::str::from_utf8(w).ok()?.parse().ok()
        } else {
            None
        }
    })
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKey::Known { year, month } => {
                write!(f, "{}-{:04}", MONTH_LABELS[(*month - 1) as usize], year)
            }
            MonthKey::Unknown => f.write_str(UNKNOWN_MONTH_LABEL),
        }
    }
}

impl FromStr for MonthKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        if upper == UNKNOWN_MONTH_LABEL {
            return Ok(MonthKey::Unknown);
        }
        let invalid = || CoreError::InvalidMonthKey(s.to_string());
        let (label, year) = upper.split_once('-').ok_or_else(invalid)?;
        let month = MONTH_LABELS
            .iter()
            .position(|m| *m == label)
            .ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        Self::new(year, month as u32 + 1).ok_or_else(invalid)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MonthKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MonthKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
