//! Per-scenario aggregation across a position set.

use risk_core::scenario::{accumulate_scaled, worst_scenario};
use risk_core::{ContractKey, Position, ScenarioArray};

use crate::book::ContractBook;

/// A matched position's own scenario exposure.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionImpact {
    /// The position as entered
    pub position: Position,
    /// Composite key of the matched contract
    pub key: ContractKey,
    /// Contract scenarios scaled by the position's lots
    pub series: ScenarioArray,
}

impl PositionImpact {
    /// Largest magnitude in the scaled series.
    pub fn worst_absolute(&self) -> f64 {
        self.series.worst_absolute()
    }
}

/// Aggregated scenario risk of a position set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortfolioRisk {
    /// Per-scenario sum of scaled contract series
    pub series: Vec<f64>,
    /// `max(|series[i]|)`, `0` when nothing matched
    pub worst: f64,
    /// Index of the dominant scenario, first occurrence on ties
    pub worst_index: Option<usize>,
    /// Matched positions in input order
    pub contributions: Vec<PositionImpact>,
    /// Non-zero positions whose key matched no contract
    pub unmatched: Vec<Position>,
    /// Positions skipped for having zero lots
    pub inert: usize,
}

impl PortfolioRisk {
    /// The `n` largest contributors by worst-case impact, largest first.
    /// Equal impacts keep input order.
    pub fn top_contributors(&self, n: usize) -> Vec<&PositionImpact> {
        let mut ranked: Vec<&PositionImpact> = self.contributions.iter().collect();
        ranked.sort_by(|a, b| b.worst_absolute().total_cmp(&a.worst_absolute()));
        ranked.truncate(n);
        ranked
    }

    /// The first `n` `(index, value)` pairs of the series.
    pub fn scenario_preview(&self, n: usize) -> Vec<(usize, f64)> {
        self.series.iter().copied().enumerate().take(n).collect()
    }

    /// Whether no position matched.
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}

/// Sum lot-scaled contract scenarios across positions.
///
/// Zero-lot positions are inert and skipped. A position whose key matches no
/// contract is reported in [`PortfolioRisk::unmatched`] and left out of the
/// sum. The series is as long as the longest matched contract.
pub fn aggregate_portfolio(positions: &[Position], book: &ContractBook) -> PortfolioRisk {
    let mut risk = PortfolioRisk::default();

    for position in positions {
        if position.is_inert() {
            risk.inert += 1;
            continue;
        }
        let Some(contract) = book.lookup(position) else {
            tracing::warn!(key = %position.key(), lots = position.lots, "Position matches no contract");
            risk.unmatched.push(position.clone());
            continue;
        };

        let factor = position.lots as f64;
        accumulate_scaled(&mut risk.series, contract.scenarios.values(), factor);
        risk.contributions.push(PositionImpact {
            position: position.clone(),
            key: contract.key(),
            series: contract.scenarios.scaled(factor),
        });
    }

    if let Some((index, worst)) = worst_scenario(&risk.series) {
        risk.worst = worst;
        risk.worst_index = Some(index);
    }

    tracing::info!(
        positions = positions.len(),
        matched = risk.contributions.len(),
        unmatched = risk.unmatched.len(),
        inert = risk.inert,
        worst = risk.worst,
        "Aggregated portfolio scenarios"
    );
    risk
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use risk_core::{Contract, InstrumentType, MonthKey};

    fn jan() -> MonthKey {
        MonthKey::new(2025, 1).unwrap()
    }

    fn book() -> ContractBook {
        ContractBook::new(vec![
            Contract::new("XYZ", jan(), InstrumentType::Future, 0.0, ScenarioArray::new(vec![10.0, -20.0, 5.0])),
            Contract::new("ABC", jan(), InstrumentType::Future, 0.0, ScenarioArray::new(vec![1.0, 1.0, 1.0, 30.0])),
        ])
    }

    fn fut(symbol: &str, lots: i64) -> Position {
        Position::new(symbol, jan(), InstrumentType::Future, 0.0, lots)
    }

    #[test]
    fn test_empty_portfolio() {
        let risk = aggregate_portfolio(&[], &book());
        assert!(risk.series.is_empty());
        assert_eq!(risk.worst, 0.0);
        assert_eq!(risk.worst_index, None);
        assert!(risk.is_empty());
    }

    #[test]
    fn test_series_grows_to_longest_contract() {
        let risk = aggregate_portfolio(&[fut("XYZ", 1), fut("ABC", 1)], &book());
        assert_eq!(risk.series, vec![11.0, -19.0, 6.0, 30.0]);
        assert_eq!(risk.worst, 30.0);
        assert_eq!(risk.worst_index, Some(3));
    }

    #[test]
    fn test_inert_and_unmatched_are_excluded() {
        let risk = aggregate_portfolio(&[fut("XYZ", 0), fut("NOPE", 4), fut("XYZ", 2)], &book());
        assert_eq!(risk.inert, 1);
        assert_eq!(risk.unmatched.len(), 1);
        assert_eq!(risk.unmatched[0].symbol, "NOPE");
        assert_eq!(risk.series, vec![20.0, -40.0, 10.0]);
        assert_relative_eq!(risk.contributions[0].worst_absolute(), 40.0);
    }

    #[test]
    fn test_top_contributors_and_preview() {
        let risk = aggregate_portfolio(&[fut("XYZ", 1), fut("ABC", -1), fut("XYZ", 3)], &book());
        let top = risk.top_contributors(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].position.symbol, "XYZ");
        assert_eq!(top[0].position.lots, 3);
        assert_eq!(top[1].position.symbol, "ABC");

        assert_eq!(risk.scenario_preview(2), vec![(0, 39.0), (1, -81.0)]);
        assert_eq!(risk.scenario_preview(10).len(), 4);
    }
}
