//! Key-indexed contract set.

use std::collections::{BTreeSet, HashMap};

use risk_core::format::format_two_places;
use risk_core::{Contract, ContractKey, InstrumentType, MonthKey, OptionRight, Position};

/// Criteria for [`ContractBook::filter`]. Unset criteria match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractFilter {
    /// Case-insensitive substring of symbol, month, type, strike, close or
    /// open interest
    pub search: Option<String>,
    /// Exact month
    pub month: Option<MonthKey>,
    /// Exact instrument type
    pub instrument: Option<InstrumentType>,
}

impl ContractFilter {
    /// Match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text. Blank text is treated as unset.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = Some(search.trim().to_lowercase()).filter(|s| !s.is_empty());
        self
    }

    /// Set the month.
    pub fn with_month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the instrument type.
    pub fn with_instrument(mut self, instrument: InstrumentType) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Whether a contract satisfies every set criterion.
    pub fn matches(&self, contract: &Contract) -> bool {
        if self.month.is_some_and(|m| m != contract.month) {
            return false;
        }
        if self.instrument.is_some_and(|i| i != contract.instrument) {
            return false;
        }
        match &self.search {
            Some(needle) => search_haystack(contract).contains(needle.as_str()),
            None => true,
        }
    }
}

fn search_haystack(contract: &Contract) -> String {
    let mut parts = vec![
        contract.symbol.clone(),
        contract.month.to_string(),
        contract.instrument.code().to_string(),
    ];
    if contract.instrument.is_option() {
        parts.push(format_two_places(contract.strike));
    }
    if let Some(close) = contract.settlement_price {
        parts.push(close.to_string());
    }
    if let Some(oi) = contract.open_interest {
        parts.push(oi.to_string());
    }
    parts.join(" ").to_lowercase()
}

/// The working contract set, indexed by composite key.
///
/// Several contracts may share a composite key when they differ only in
/// call/put. Plain key lookup returns the first one listed.
#[derive(Clone, Debug, Default)]
pub struct ContractBook {
    contracts: Vec<Contract>,
    by_key: HashMap<ContractKey, usize>,
    by_key_and_right: HashMap<(ContractKey, OptionRight), usize>,
}

impl ContractBook {
    /// Index a contract list.
    pub fn new(contracts: Vec<Contract>) -> Self {
        let mut by_key = HashMap::with_capacity(contracts.len());
        let mut by_key_and_right = HashMap::new();
        for (i, contract) in contracts.iter().enumerate() {
            let key = contract.key();
            if let Some(right) = contract.right {
                by_key_and_right.entry((key.clone(), right)).or_insert(i);
            }
            by_key.entry(key).or_insert(i);
        }
        Self {
            contracts,
            by_key,
            by_key_and_right,
        }
    }

    /// All contracts in load order.
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Iterate contracts in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Contract> {
        self.contracts.iter()
    }

    /// Number of contracts.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// First contract with the composite key.
    pub fn get(&self, key: &ContractKey) -> Option<&Contract> {
        self.by_key.get(key).map(|&i| &self.contracts[i])
    }

    /// Contract with the composite key and the given call/put flag.
    pub fn get_with_right(&self, key: &ContractKey, right: OptionRight) -> Option<&Contract> {
        self.by_key_and_right
            .get(&(key.clone(), right))
            .map(|&i| &self.contracts[i])
    }

    /// Contract a position refers to.
    ///
    /// A position with a call/put flag prefers the contract with the same
    /// flag and falls back to the plain key.
    pub fn lookup(&self, position: &Position) -> Option<&Contract> {
        let key = position.key();
        position
            .right
            .and_then(|right| self.get_with_right(&key, right))
            .or_else(|| self.get(&key))
    }

    /// Contracts matching a filter, in load order.
    pub fn filter(&self, filter: &ContractFilter) -> Vec<&Contract> {
        self.contracts.iter().filter(|c| filter.matches(c)).collect()
    }

    /// Distinct months, chronological, `UNK` last.
    pub fn months(&self) -> Vec<MonthKey> {
        self.contracts
            .iter()
            .map(|c| c.month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct symbols, sorted.
    pub fn symbols(&self) -> Vec<String> {
        self.contracts
            .iter()
            .map(|c| c.symbol.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<Vec<Contract>> for ContractBook {
    fn from(contracts: Vec<Contract>) -> Self {
        Self::new(contracts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::ScenarioArray;

    fn month(m: u32) -> MonthKey {
        MonthKey::new(2025, m).unwrap()
    }

    fn book() -> ContractBook {
        ContractBook::new(vec![
            Contract::new("SILVER", month(3), InstrumentType::Future, 0.0, ScenarioArray::new(vec![1.0])),
            Contract::new("GOLD", month(2), InstrumentType::Option, 78000.0, ScenarioArray::new(vec![2.0]))
                .with_right(Some(OptionRight::Call)),
            Contract::new("GOLD", month(2), InstrumentType::Option, 78000.0, ScenarioArray::new(vec![3.0]))
                .with_right(Some(OptionRight::Put)),
            Contract::new("GOLD", MonthKey::Unknown, InstrumentType::Future, 0.0, ScenarioArray::new(vec![4.0])),
        ])
    }

    #[test]
    fn test_plain_lookup_returns_first_listed() {
        let book = book();
        let key = ContractKey::new("GOLD", month(2), InstrumentType::Option, 78000.0);
        assert_eq!(book.get(&key).unwrap().right, Some(OptionRight::Call));
        assert_eq!(
            book.get_with_right(&key, OptionRight::Put).unwrap().worst_absolute(),
            3.0
        );
    }

    #[test]
    fn test_position_lookup_prefers_right() {
        let book = book();
        let put = Position::new("GOLD", month(2), InstrumentType::Option, 78000.0, 1)
            .with_right(Some(OptionRight::Put));
        assert_eq!(book.lookup(&put).unwrap().worst_absolute(), 3.0);

        let any = Position::new("GOLD", month(2), InstrumentType::Option, 78000.0, 1);
        assert_eq!(book.lookup(&any).unwrap().worst_absolute(), 2.0);

        let missing = Position::new("GOLD", month(2), InstrumentType::Option, 79000.0, 1);
        assert!(book.lookup(&missing).is_none());
    }

    #[test]
    fn test_months_and_symbols() {
        let book = book();
        assert_eq!(book.months(), vec![month(2), month(3), MonthKey::Unknown]);
        assert_eq!(book.symbols(), vec!["GOLD".to_string(), "SILVER".to_string()]);
    }

    #[test]
    fn test_filter() {
        let book = book();
        assert_eq!(book.filter(&ContractFilter::new()).len(), 4);

        let futures = ContractFilter::new().with_instrument(InstrumentType::Future);
        assert_eq!(book.filter(&futures).len(), 2);

        let feb = ContractFilter::new().with_month(month(2)).with_search("78000");
        assert_eq!(book.filter(&feb).len(), 2);

        let search = ContractFilter::new().with_search("  silver ");
        assert_eq!(book.filter(&search)[0].symbol, "SILVER");

        let blank = ContractFilter::new().with_search("   ");
        assert_eq!(blank.search, None);
    }
}
