//! Contract extraction from a parsed risk document.

use std::collections::HashSet;

use risk_core::{Contract, ContractKey, OptionRight};

use crate::contract::contract_elements;
use crate::document::SpanDocument;
use crate::symbols::SymbolTable;

/// Per-record anomalies seen during extraction.
///
/// None of these abort a load. Contracts counted in `missing_scenarios`,
/// `unresolved_symbols` or `duplicates` are not in the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Future and option elements found
    pub contract_elements: usize,
    /// Dropped: no scenario array or an empty one
    pub missing_scenarios: usize,
    /// Dropped: underlying portfolio id has no symbol
    pub unresolved_symbols: usize,
    /// Dropped: repeat of an earlier contract
    pub duplicates: usize,
    /// Scenario values that were not numeric and were read as `0`
    pub coerced_values: usize,
    /// Kept contracts whose expiry code gave no month
    pub unknown_months: usize,
}

impl ExtractionStats {
    /// Total number of dropped contract elements.
    pub fn dropped(&self) -> usize {
        self.missing_scenarios + self.unresolved_symbols + self.duplicates
    }
}

/// Extracted contracts with their statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractExtraction {
    /// Contracts in document order, first occurrence of each identity only
    pub contracts: Vec<Contract>,
    /// Anomaly counters
    pub stats: ExtractionStats,
}

/// Extract contracts from a document, resolving symbols through `symbols`.
///
/// Identity for de-duplication is the composite key plus the call/put flag.
pub fn extract_contracts(doc: &SpanDocument, symbols: &SymbolTable) -> ContractExtraction {
    let mut out = ContractExtraction::default();
    let mut seen: HashSet<(ContractKey, Option<OptionRight>)> = HashSet::new();

    for element in contract_elements(doc) {
        out.stats.contract_elements += 1;

        let Some((scenarios, coerced)) = element.scenarios() else {
            out.stats.missing_scenarios += 1;
            continue;
        };

        let symbol = element
            .underlying_pf_id()
            .and_then(|id| symbols.resolve(&id).map(str::to_string));
        let Some(symbol) = symbol else {
            tracing::debug!(
                ordinal = element.ordinal(),
                pf_id = ?element.underlying_pf_id(),
                "Skipping contract with unresolved underlying"
            );
            out.stats.unresolved_symbols += 1;
            continue;
        };

        let contract = Contract::new(
            symbol,
            element.month(),
            element.instrument(),
            element.strike(),
            scenarios,
        )
        .with_right(element.right())
        .with_expiry_code(element.expiry_code().unwrap_or_default())
        .with_price_scan(element.price_scan());

        if !seen.insert((contract.key(), contract.right)) {
            out.stats.duplicates += 1;
            continue;
        }

        out.stats.coerced_values += coerced;
        if contract.month.is_unknown() {
            out.stats.unknown_months += 1;
        }
        out.contracts.push(contract);
    }

    tracing::info!(
        contracts = out.contracts.len(),
        elements = out.stats.contract_elements,
        missing_scenarios = out.stats.missing_scenarios,
        unresolved = out.stats.unresolved_symbols,
        duplicates = out.stats.duplicates,
        coerced = out.stats.coerced_values,
        "Extracted risk-file contracts"
    );
    out
}
