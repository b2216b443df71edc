//! User-entered positions.

use crate::types::{normalize_symbol, ContractKey, InstrumentType, MonthKey, OptionRight};

/// A signed lot count against a contract key.
///
/// Positive lots are long, negative lots are short. A position with zero
/// lots is inert and never contributes to aggregation.
///
/// # Examples
///
/// ```
/// use risk_core::types::{InstrumentType, MonthKey, Position};
///
/// let pos = Position::new("xyz", MonthKey::new(2025, 1).unwrap(), InstrumentType::Future, 0.0, -3);
/// assert_eq!(pos.key().to_string(), "XYZ|JAN-2025|FUT|0.00");
/// assert!(!pos.is_inert());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Normalised symbol
    pub symbol: String,
    /// Contract month
    pub month: MonthKey,
    /// Future or option
    pub instrument: InstrumentType,
    /// Strike, ignored for futures
    pub strike: f64,
    /// Signed lot count
    pub lots: i64,
    /// Optional call/put preference used to pick between same-strike options
    pub right: Option<OptionRight>,
}

impl Position {
    /// Create a position without a call/put preference.
    pub fn new(
        symbol: impl AsRef<str>,
        month: MonthKey,
        instrument: InstrumentType,
        strike: f64,
        lots: i64,
    ) -> Self {
        Self {
            symbol: normalize_symbol(symbol.as_ref()),
            month,
            instrument,
            strike,
            lots,
            right: None,
        }
    }

    /// Set the call/put preference.
    pub fn with_right(mut self, right: Option<OptionRight>) -> Self {
        self.right = right;
        self
    }

    /// Composite join key.
    pub fn key(&self) -> ContractKey {
        ContractKey::new(&self.symbol, self.month, self.instrument, self.strike)
    }

    /// Whether the position has zero lots.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.lots == 0
    }
}
