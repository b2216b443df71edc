//! Calendar-spread grouping of positions.

use std::collections::HashMap;

use risk_core::{InstrumentType, MonthKey, OptionRight, Position, StrikeKey};

use crate::book::ContractBook;

/// One month of a spread group.
#[derive(Clone, Debug, PartialEq)]
pub struct SpreadLeg {
    /// Contract month
    pub month: MonthKey,
    /// Signed lots
    pub lots: i64,
    /// Call/put preference of the position, options only
    pub right: Option<OptionRight>,
    /// Settlement price of the matched contract
    pub close: Option<f64>,
    /// `worst_absolute(contract) * |lots|`, `None` when unmatched
    pub approx_impact: Option<f64>,
}

/// Positions on the same underlying (and strike, for options) across months.
#[derive(Clone, Debug, PartialEq)]
pub struct SpreadGroup {
    /// Underlying symbol
    pub symbol: String,
    /// Future or option
    pub instrument: InstrumentType,
    /// Strike, `0.00` for futures
    pub strike: StrikeKey,
    /// Legs in chronological order
    pub legs: Vec<SpreadLeg>,
    /// Sum of lots over all legs
    pub net_lots: i64,
}

impl SpreadGroup {
    /// `SYMBOL|FUT` or `SYMBOL|OPT|STRIKE`.
    pub fn label(&self) -> String {
        match self.instrument {
            InstrumentType::Future => format!("{}|FUT", self.symbol),
            InstrumentType::Option => format!("{}|OPT|{}", self.symbol, self.strike),
        }
    }

    /// Whether the group spans more than one leg.
    pub fn is_spread(&self) -> bool {
        self.legs.len() > 1
    }
}

/// Group non-zero positions by underlying and, for options, strike.
///
/// Groups appear in order of their first position.
pub fn group_spreads(positions: &[Position], book: &ContractBook) -> Vec<SpreadGroup> {
    let mut groups: Vec<SpreadGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for position in positions.iter().filter(|p| !p.is_inert()) {
        let strike = StrikeKey::new(position.instrument, position.strike);
        let probe = SpreadGroup {
            symbol: position.symbol.clone(),
            instrument: position.instrument,
            strike,
            legs: Vec::new(),
            net_lots: 0,
        };
        let slot = *index.entry(probe.label()).or_insert_with(|| {
            groups.push(probe);
            groups.len() - 1
        });

        let contract = book.lookup(position);
        let group = &mut groups[slot];
        group.net_lots += position.lots;
        group.legs.push(SpreadLeg {
            month: position.month,
            lots: position.lots,
            right: position.right,
            close: contract.and_then(|c| c.settlement_price),
            approx_impact: contract.map(|c| c.worst_absolute() * position.lots.unsigned_abs() as f64),
        });
    }

    for group in &mut groups {
        group.legs.sort_by_key(|leg| leg.month);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::{Contract, ScenarioArray, Settlement};

    fn month(m: u32) -> MonthKey {
        MonthKey::new(2025, m).unwrap()
    }

    fn book() -> ContractBook {
        let feb = Settlement::new("GOLD", month(2), InstrumentType::Future, 0.0).with_close(Some(78500.0));
        ContractBook::new(vec![
            Contract::new("GOLD", month(2), InstrumentType::Future, 0.0, ScenarioArray::new(vec![-100.0, 50.0]))
                .with_settlement(&feb),
            Contract::new("GOLD", month(4), InstrumentType::Future, 0.0, ScenarioArray::new(vec![-120.0, 60.0])),
        ])
    }

    #[test]
    fn test_calendar_spread() {
        let positions = vec![
            Position::new("GOLD", month(4), InstrumentType::Future, 0.0, -1),
            Position::new("GOLD", month(2), InstrumentType::Future, 0.0, 2),
            Position::new("GOLD", month(6), InstrumentType::Future, 0.0, 0),
        ];
        let groups = group_spreads(&positions, &book());
        assert_eq!(groups.len(), 1);

        let group = &groups[0];
        assert_eq!(group.label(), "GOLD|FUT");
        assert_eq!(group.net_lots, 1);
        assert!(group.is_spread());
        assert_eq!(group.legs[0].month, month(2));
        assert_eq!(group.legs[0].close, Some(78500.0));
        assert_eq!(group.legs[0].approx_impact, Some(200.0));
        assert_eq!(group.legs[1].close, None);
        assert_eq!(group.legs[1].approx_impact, Some(120.0));
    }

    #[test]
    fn test_options_group_by_strike() {
        let positions = vec![
            Position::new("GOLD", month(2), InstrumentType::Option, 78000.0, 1),
            Position::new("GOLD", month(3), InstrumentType::Option, 79000.0, 1),
            Position::new("GOLD", month(3), InstrumentType::Option, 78000.0, -1),
        ];
        let groups = group_spreads(&positions, &book());
        let labels: Vec<String> = groups.iter().map(|g| g.label()).collect();
        assert_eq!(labels, vec!["GOLD|OPT|78000.00", "GOLD|OPT|79000.00"]);
        assert_eq!(groups[0].net_lots, 0);
        assert_eq!(groups[0].legs[0].approx_impact, None);
    }
}
