//! Risk-file contract entity.

use crate::scenario::ScenarioArray;
use crate::types::{ContractKey, InstrumentType, MonthKey, OptionRight, Settlement};

/// A tradable instrument-month(-strike) with its scenario array.
///
/// Settlement fields are `None` until the contract is joined with a
/// matching settlement record.
///
/// # Examples
///
/// ```
/// use risk_core::scenario::ScenarioArray;
/// use risk_core::types::{Contract, InstrumentType, MonthKey};
///
/// let contract = Contract::new(
///     "XYZ",
///     MonthKey::new(2025, 1).unwrap(),
///     InstrumentType::Future,
///     0.0,
///     ScenarioArray::new(vec![10.0, -20.0, 5.0]),
/// );
/// assert_eq!(contract.worst_absolute(), 20.0);
/// assert!(contract.settlement_price.is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contract {
    /// Normalised underlying symbol
    pub symbol: String,
    /// Contract month
    pub month: MonthKey,
    /// Future or option
    pub instrument: InstrumentType,
    /// Strike price, `0.0` for futures
    pub strike: f64,
    /// Call/put flag for options, when the source provides one
    pub right: Option<OptionRight>,
    /// Raw expiry code as written in the risk file
    pub expiry_code: String,
    /// Price-scan range from the contract's scan-rate block
    pub price_scan: Option<f64>,
    /// Ordered scenario values
    pub scenarios: ScenarioArray,
    /// Settlement (close) price from the settlement file
    pub settlement_price: Option<f64>,
    /// Open interest from the settlement file
    pub open_interest: Option<f64>,
}

impl Contract {
    /// Create an unmatched contract. Futures always carry strike `0.0`.
    pub fn new(
        symbol: impl Into<String>,
        month: MonthKey,
        instrument: InstrumentType,
        strike: f64,
        scenarios: ScenarioArray,
    ) -> Self {
        let strike = match instrument {
            InstrumentType::Future => 0.0,
            InstrumentType::Option => strike,
        };
        Self {
            symbol: symbol.into(),
            month,
            instrument,
            strike,
            right: None,
            expiry_code: String::new(),
            price_scan: None,
            scenarios,
            settlement_price: None,
            open_interest: None,
        }
    }

    /// Set the call/put flag.
    pub fn with_right(mut self, right: Option<OptionRight>) -> Self {
        self.right = right;
        self
    }

    /// Set the raw expiry code.
    pub fn with_expiry_code(mut self, code: impl Into<String>) -> Self {
        self.expiry_code = code.into();
        self
    }

    /// Set the price-scan range.
    pub fn with_price_scan(mut self, price_scan: Option<f64>) -> Self {
        self.price_scan = price_scan;
        self
    }

    /// Copy close price and open interest from a settlement record.
    pub fn with_settlement(mut self, settlement: &Settlement) -> Self {
        self.settlement_price = settlement.close;
        self.open_interest = settlement.open_interest;
        self
    }

    /// Composite join key.
    pub fn key(&self) -> ContractKey {
        ContractKey::new(&self.symbol, self.month, self.instrument, self.strike)
    }

    /// `max(|v|)` over this contract's scenarios.
    #[inline]
    pub fn worst_absolute(&self) -> f64 {
        self.scenarios.worst_absolute()
    }

    /// Whether settlement data has been joined onto this contract.
    pub fn has_settlement(&self) -> bool {
        self.settlement_price.is_some() || self.open_interest.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan() -> MonthKey {
        MonthKey::new(2025, 1).unwrap()
    }

    #[test]
    fn test_future_strike_forced_to_zero() {
        let c = Contract::new(
            "XYZ",
            jan(),
            InstrumentType::Future,
            99.0,
            ScenarioArray::default(),
        );
        assert_eq!(c.strike, 0.0);
        assert_eq!(c.key().to_string(), "XYZ|JAN-2025|FUT|0.00");
    }

    #[test]
    fn test_with_settlement_copies_fields() {
        let c = Contract::new(
            "XYZ",
            jan(),
            InstrumentType::Future,
            0.0,
            ScenarioArray::new(vec![1.0]),
        );
        assert!(!c.has_settlement());

        let s = Settlement::new("XYZ", jan(), InstrumentType::Future, 0.0)
            .with_close(Some(100.25))
            .with_open_interest(Some(42.0));
        let c = c.with_settlement(&s);
        assert_eq!(c.settlement_price, Some(100.25));
        assert_eq!(c.open_interest, Some(42.0));
        assert!(c.has_settlement());
    }

    #[test]
    fn test_option_metadata() {
        let c = Contract::new(
            "GOLD",
            jan(),
            InstrumentType::Option,
            62000.0,
            ScenarioArray::new(vec![-3.0, 4.0]),
        )
        .with_right(Some(OptionRight::Put))
        .with_expiry_code("20250127")
        .with_price_scan(Some(0.06));
        assert_eq!(c.right, Some(OptionRight::Put));
        assert_eq!(c.expiry_code, "20250127");
        assert_eq!(c.price_scan, Some(0.06));
        assert_eq!(c.worst_absolute(), 4.0);
    }
}
