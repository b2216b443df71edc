//! Risk-file to settlement join.

use std::collections::HashMap;

use risk_core::{Contract, ContractKey, Settlement};

/// Contracts after the join, with the number that found a settlement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoinOutcome {
    /// Every input contract, in input order
    pub contracts: Vec<Contract>,
    /// Contracts that received settlement data
    pub matched: usize,
}

/// Left-join settlements onto contracts by composite key.
///
/// Contracts decide which entities exist; unmatched settlement rows are
/// unused. Call/put is not part of the key. When several settlement rows
/// share a key the last one wins.
///
/// # Examples
///
/// ```
/// use risk_core::{Contract, InstrumentType, MonthKey, ScenarioArray, Settlement};
/// use risk_engine::join;
///
/// let jan = MonthKey::new(2025, 1).unwrap();
/// let contract = Contract::new("XYZ", jan, InstrumentType::Future, 0.0,
///     ScenarioArray::new(vec![10.0, -20.0, 5.0]));
/// let settlement = Settlement::new("XYZ", jan, InstrumentType::Future, 0.0)
///     .with_close(Some(100.25));
///
/// let out = join(vec![contract], &[settlement]);
/// assert_eq!(out.matched, 1);
/// assert_eq!(out.contracts[0].settlement_price, Some(100.25));
/// ```
pub fn join(contracts: Vec<Contract>, settlements: &[Settlement]) -> JoinOutcome {
    let index: HashMap<ContractKey, &Settlement> =
        settlements.iter().map(|s| (s.key(), s)).collect();

    let mut matched = 0;
    let contracts: Vec<Contract> = contracts
        .into_iter()
        .map(|contract| match index.get(&contract.key()) {
            Some(settlement) => {
                matched += 1;
                contract.with_settlement(settlement)
            }
            None => contract,
        })
        .collect();

    tracing::info!(
        contracts = contracts.len(),
        settlements = settlements.len(),
        matched,
        "Joined settlement data"
    );
    JoinOutcome { contracts, matched }
}
