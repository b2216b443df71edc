//! Merge execution.

use std::collections::HashMap;

use adapter_span::{contract_elements, ContractElement, SpanDocument};
use risk_core::format::{format_exchange_decimal, parse_number};
use risk_core::scenario::merge_by_max;

use crate::error::MergeError;
use crate::merge::MergeMode;

/// Observability counters for one merge. They never influence the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeCounters {
    /// Distinct contracts indexed from the earlier document
    pub earlier_indexed: usize,
    /// Later-document contracts that carry scenario values
    pub later_processed: usize,
    /// Later contracts found in the earlier index and merged
    pub merged: usize,
    /// Later contracts with no earlier counterpart, kept as-is
    pub new_in_later: usize,
}

/// Result of a merge.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeOutcome {
    /// Mode that produced the document
    pub mode: MergeMode,
    /// Output document
    pub document: SpanDocument,
    /// Counters, all zero for the pass-through modes
    pub counters: MergeCounters,
}

/// Run a merge in the given mode.
///
/// # Errors
///
/// [`MergeError::MissingDocument`] when the mode needs a document that is
/// `None`. A document the mode does not need is ignored.
pub fn merge_snapshots(
    mode: MergeMode,
    earlier: Option<&SpanDocument>,
    later: Option<&SpanDocument>,
) -> Result<MergeOutcome, MergeError> {
    let missing = |role| MergeError::MissingDocument { mode, role };
    match mode {
        MergeMode::EarlierOnly => {
            let earlier = earlier.ok_or_else(|| missing("earlier"))?;
            Ok(pass_through(mode, earlier))
        }
        MergeMode::LaterOnly => {
            let later = later.ok_or_else(|| missing("later"))?;
            Ok(pass_through(mode, later))
        }
        MergeMode::MergeMax => {
            let earlier = earlier.ok_or_else(|| missing("earlier"))?;
            let later = later.ok_or_else(|| missing("later"))?;
            Ok(merge_max(earlier, later))
        }
    }
}

fn pass_through(mode: MergeMode, document: &SpanDocument) -> MergeOutcome {
    tracing::info!(mode = %mode, "Passing document through unmodified");
    MergeOutcome {
        mode,
        document: document.clone(),
        counters: MergeCounters::default(),
    }
}

/// The later document with every matched contract's scenarios replaced by
/// the scenario-wise maximum of both snapshots.
///
/// Contracts are matched by contract id, expiry code, strike and call/put.
/// Merged overlap values are written in exchange decimal format. Scenarios
/// present only in the later document keep their text. Contracts present
/// only in the earlier document are not added.
pub fn merge_max(earlier: &SpanDocument, later: &SpanDocument) -> MergeOutcome {
    let mut counters = MergeCounters::default();

    let mut index: HashMap<String, Vec<f64>> = HashMap::new();
    for contract in contract_elements(earlier) {
        if let Some(values) = numeric_scenarios(&contract) {
            index.entry(contract.snapshot_key()).or_insert(values);
        }
    }
    counters.earlier_indexed = index.len();

    let mut replacements: HashMap<usize, Vec<String>> = HashMap::new();
    for contract in contract_elements(later) {
        let Some(later_values) = numeric_scenarios(&contract) else {
            continue;
        };
        counters.later_processed += 1;

        let Some(earlier_values) = index.get(&contract.snapshot_key()) else {
            counters.new_in_later += 1;
            continue;
        };
        let overlap = earlier_values.len().min(later_values.len());
        let texts = merge_by_max(earlier_values, &later_values)
            .into_iter()
            .take(overlap)
            .map(format_exchange_decimal)
            .collect();
        replacements.insert(contract.ordinal(), texts);
        counters.merged += 1;
    }

    tracing::info!(
        earlier_indexed = counters.earlier_indexed,
        later_processed = counters.later_processed,
        merged = counters.merged,
        new_in_later = counters.new_in_later,
        "Merged risk snapshots by scenario maximum"
    );
    MergeOutcome {
        mode: MergeMode::MergeMax,
        document: later.with_scenario_values(&replacements),
        counters,
    }
}

/// Scenario values with non-numeric text read as `0`.
fn numeric_scenarios(contract: &ContractElement<'_>) -> Option<Vec<f64>> {
    contract
        .scenario_texts()
        .map(|texts| texts.iter().map(|t| parse_number(t).unwrap_or(0.0)).collect())
}
