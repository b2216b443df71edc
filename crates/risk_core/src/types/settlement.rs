//! Settlement-file record.

use crate::types::{normalize_symbol, ContractKey, InstrumentType, MonthKey, OptionRight};

/// Closing price and open interest for one contract on one trading day.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement {
    /// Normalised symbol
    pub symbol: String,
    /// Contract month
    pub month: MonthKey,
    /// Future or option, inferred from the option-type column
    pub instrument: InstrumentType,
    /// Strike price, `0.0` when absent
    pub strike: f64,
    /// Call/put flag from the option-type column
    pub right: Option<OptionRight>,
    /// Close price
    pub close: Option<f64>,
    /// Open interest in lots
    pub open_interest: Option<f64>,
    /// Instrument name column, as written
    pub instrument_name: Option<String>,
    /// Expiry cell, as written
    pub expiry_raw: String,
}

impl Settlement {
    /// Create a settlement record with no price fields.
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
            strike,
            right: None,
            close: None,
            open_interest: None,
            instrument_name: None,
            expiry_raw: String::new(),
        }
    }

    /// Set the close price.
    pub fn with_close(mut self, close: Option<f64>) -> Self {
        self.close = close;
        self
    }

    /// Set the open interest.
    pub fn with_open_interest(mut self, open_interest: Option<f64>) -> Self {
        self.open_interest = open_interest;
        self
    }

    /// Set the call/put flag.
    pub fn with_right(mut self, right: Option<OptionRight>) -> Self {
        self.right = right;
        self
    }

    /// Composite join key.
    pub fn key(&self) -> ContractKey {
        ContractKey::new(&self.symbol, self.month, self.instrument, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_key_matches_contract_key_shape() {
        let s = Settlement::new("gold m", MonthKey::new(2025, 2).unwrap(), InstrumentType::Option, 72000.0)
            .with_right(Some(OptionRight::Call));
        assert_eq!(s.symbol, "GOLDM");
        assert_eq!(s.key().to_string(), "GOLDM|FEB-2025|OPT|72000.00");
    }
}
