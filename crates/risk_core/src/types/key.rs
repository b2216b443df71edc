//! Composite contract keys.
//!
//! Risk files and settlement files are produced independently and share no
//! identifiers. A [`ContractKey`] of `(symbol, month, instrument, strike)`
//! is what lets their records be joined. Strikes are compared as two-place
//! decimal text so that `62000` and `62000.0000001` collapse to one key.
//! Futures always key on `0.00`.

use std::fmt;

use crate::format::format_two_places;
use crate::types::{InstrumentType, MonthKey};

/// Upper-case a ticker and drop all whitespace.
///
/// # Examples
/// ```
/// use risk_core::types::normalize_symbol;
///
/// assert_eq!(normalize_symbol(" crude oil "), "CRUDEOIL");
/// ```
pub fn normalize_symbol(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Strike component of a contract key, formatted to two decimal places.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeKey(String);

impl StrikeKey {
    /// Strike key for an instrument; futures ignore `strike`.
    pub fn new(instrument: InstrumentType, strike: f64) -> Self {
        match instrument {
            InstrumentType::Future => Self("0.00".to_string()),
            InstrumentType::Option => Self(format_two_places(strike)),
        }
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StrikeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a contract across independently produced files.
///
/// Two records are the same entity iff symbol, month, instrument type, and
/// two-place strike are all equal. Put/call is deliberately not part of the
/// key.
///
/// # Examples
///
/// ```
/// use risk_core::types::{ContractKey, InstrumentType, MonthKey};
///
/// let month = MonthKey::new(2025, 1).unwrap();
/// let a = ContractKey::new("gold", month, InstrumentType::Option, 62000.0);
/// let b = ContractKey::new("GOLD", month, InstrumentType::Option, 62000.001);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "GOLD|JAN-2025|OPT|62000.00");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractKey {
    symbol: String,
    month: MonthKey,
    instrument: InstrumentType,
    strike: StrikeKey,
}

impl ContractKey {
    /// Build a key, normalising the symbol and formatting the strike.
    pub fn new(
        symbol: impl AsRef<str>,
        month: MonthKey,
        instrument: InstrumentType,
        strike: f64,
    ) -> Self {
        Self {
            symbol: normalize_symbol(symbol.as_ref()),
            month,
            instrument,
            strike: StrikeKey::new(instrument, strike),
        }
    }

    /// Normalised symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Contract month.
    pub fn month(&self) -> MonthKey {
        self.month
    }

    /// Instrument type.
    pub fn instrument(&self) -> InstrumentType {
        self.instrument
    }

    /// Two-place strike.
    pub fn strike(&self) -> &StrikeKey {
        &self.strike
    }
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.symbol, self.month, self.instrument, self.strike
        )
    }
}
