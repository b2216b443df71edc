//! Instrument classification.
//!
//! # Examples
//!
//! ```
//! use risk_core::types::{InstrumentType, OptionRight};
//!
//! let fut: InstrumentType = "future".parse().unwrap();
//! assert_eq!(fut, InstrumentType::Future);
//! assert_eq!(fut.code(), "FUT");
//!
//! assert_eq!(OptionRight::from_code("CE"), Some(OptionRight::Call));
//! assert_eq!(OptionRight::from_code("-"), None);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Whether a contract is a future or an option.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstrumentType {
    /// Futures contract. Keys on strike `0.00`.
    #[cfg_attr(feature = "serde", serde(rename = "FUT", alias = "FUTURE"))]
    Future,
    /// Options contract. Keys on its strike at two decimal places.
    #[cfg_attr(feature = "serde", serde(rename = "OPT", alias = "OPTION"))]
    Option,
}

impl InstrumentType {
    /// Short code used in keys and exports (`FUT` / `OPT`).
    pub fn code(&self) -> &'static str {
        match self {
            InstrumentType::Future => "FUT",
            InstrumentType::Option => "OPT",
        }
    }

    /// Whether this is an option.
    #[inline]
    pub fn is_option(&self) -> bool {
        matches!(self, InstrumentType::Option)
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for InstrumentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FUT" | "FUTURE" | "FUTURES" => Ok(InstrumentType::Future),
            "OPT" | "OPTION" | "OPTIONS" => Ok(InstrumentType::Option),
            _ => Err(CoreError::InvalidInstrumentType(s.to_string())),
        }
    }
}

/// Call/put discriminator carried as option metadata.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionRight {
    /// Call option
    #[cfg_attr(feature = "serde", serde(rename = "C", alias = "CE"))]
    Call,
    /// Put option
    #[cfg_attr(feature = "serde", serde(rename = "P", alias = "PE"))]
    Put,
}

impl OptionRight {
    /// Parse a risk-file or settlement-file right code.
    ///
    /// Accepts `C`/`CE`/`CALL` and `P`/`PE`/`PUT` in any case. Anything else,
    /// including the `-` placeholder, yields `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "C" | "CE" | "CALL" => Some(OptionRight::Call),
            "P" | "PE" | "PUT" => Some(OptionRight::Put),
            _ => None,
        }
    }

    /// Single-letter code (`C` / `P`).
    pub fn code(&self) -> &'static str {
        match self {
            OptionRight::Call => "C",
            OptionRight::Put => "P",
        }
    }
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OptionRight {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| CoreError::InvalidOptionRight(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_type_parsing() {
        assert_eq!("FUT".parse::<InstrumentType>().unwrap(), InstrumentType::Future);
        assert_eq!("opt".parse::<InstrumentType>().unwrap(), InstrumentType::Option);
        assert_eq!(" Option ".parse::<InstrumentType>().unwrap(), InstrumentType::Option);
        assert!("SWAP".parse::<InstrumentType>().is_err());
    }

    #[test]
    fn test_instrument_type_display() {
        assert_eq!(InstrumentType::Future.to_string(), "FUT");
        assert_eq!(InstrumentType::Option.to_string(), "OPT");
        assert!(InstrumentType::Option.is_option());
        assert!(!InstrumentType::Future.is_option());
    }

    #[test]
    fn test_option_right_codes() {
        assert_eq!(OptionRight::from_code("c"), Some(OptionRight::Call));
        assert_eq!(OptionRight::from_code("PE"), Some(OptionRight::Put));
        assert_eq!(OptionRight::from_code("put"), Some(OptionRight::Put));
        assert_eq!(OptionRight::from_code(""), None);
        assert_eq!(OptionRight::from_code("XX"), None);
        assert!("-".parse::<OptionRight>().is_err());
    }
}
