//! The in-memory working set for one session.

use adapter_bhav::{BhavParser, BhavStats};
use adapter_span::{ExtractionStats, SpanParser};
use risk_core::Position;

use crate::book::ContractBook;
use crate::error::EngineError;
use crate::join::join;
use crate::portfolio::{aggregate_portfolio, group_spreads, PortfolioRisk, SpreadGroup};

/// Counters from one successful load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Risk-file extraction counters
    pub extraction: ExtractionStats,
    /// Settlement-report row counters
    pub settlement: BhavStats,
    /// Contracts in the working set
    pub contracts: usize,
    /// Contracts that received settlement data
    pub matched: usize,
}

/// Build a contract book from a risk document and a settlement report.
///
/// Both documents are fully read before anything is returned.
pub fn load_contract_book(
    span_text: &str,
    bhav_text: &str,
) -> Result<(ContractBook, LoadSummary), EngineError> {
    let extraction = SpanParser::parse_contracts(span_text)?;
    let settlements = BhavParser::parse(bhav_text)?;
    let joined = join(extraction.contracts, &settlements.settlements);

    let summary = LoadSummary {
        extraction: extraction.stats,
        settlement: settlements.stats,
        contracts: joined.contracts.len(),
        matched: joined.matched,
    };
    Ok((ContractBook::new(joined.contracts), summary))
}

/// Contracts and positions held between user actions.
///
/// A load replaces the whole working set or nothing: on error the previous
/// set is left as it was and the caller decides whether to [`clear`].
///
/// [`clear`]: RiskSession::clear
#[derive(Clone, Debug, Default)]
pub struct RiskSession {
    book: ContractBook,
    positions: Vec<Position>,
    summary: Option<LoadSummary>,
}

impl RiskSession {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both documents and swap in the new working set.
    ///
    /// Positions are reset on success.
    pub fn load(&mut self, span_text: &str, bhav_text: &str) -> Result<LoadSummary, EngineError> {
        let (book, summary) = load_contract_book(span_text, bhav_text)?;
        tracing::info!(
            contracts = summary.contracts,
            matched = summary.matched,
            dropped = summary.extraction.dropped(),
            skipped_rows = summary.settlement.skipped,
            "Loaded working set"
        );
        self.book = book;
        self.positions.clear();
        self.summary = Some(summary);
        Ok(summary)
    }

    /// Drop contracts, positions and the load summary.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The contract book.
    pub fn book(&self) -> &ContractBook {
        &self.book
    }

    /// Counters of the last successful load.
    pub fn summary(&self) -> Option<&LoadSummary> {
        self.summary.as_ref()
    }

    /// Current positions.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Append a position.
    pub fn add_position(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Replace all positions.
    pub fn set_positions(&mut self, positions: Vec<Position>) {
        self.positions = positions;
    }

    /// Replace the position at `index`.
    pub fn replace_position(&mut self, index: usize, position: Position) -> Result<(), EngineError> {
        let len = self.positions.len();
        let slot = self
            .positions
            .get_mut(index)
            .ok_or(EngineError::PositionIndex { index, len })?;
        *slot = position;
        Ok(())
    }

    /// Remove and return the position at `index`.
    pub fn remove_position(&mut self, index: usize) -> Result<Position, EngineError> {
        if index >= self.positions.len() {
            return Err(EngineError::PositionIndex {
                index,
                len: self.positions.len(),
            });
        }
        Ok(self.positions.remove(index))
    }

    /// Aggregate the current positions.
    pub fn portfolio_risk(&self) -> PortfolioRisk {
        aggregate_portfolio(&self.positions, &self.book)
    }

    /// Group the current positions into spreads.
    pub fn spreads(&self) -> Vec<SpreadGroup> {
        group_spreads(&self.positions, &self.book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::{InstrumentType, MonthKey};

    const SPAN: &str = "<spanFile><phyPf><pfId>1</pfId><pfCode>XYZ</pfCode></phyPf>\
        <fut><pe>20250130</pe><undC><pfId>1</pfId></undC><ra><a>10</a><a>-20</a><a>5</a></ra></fut>\
        </spanFile>";
    const BHAV: &str = "<table><tr><th>Symbol</th><th>Expiry Date</th><th>Close</th></tr>\
        <tr><td>XYZ</td><td>30JAN2025</td><td>100.25</td></tr></table>";

    fn xyz(lots: i64) -> Position {
        Position::new("XYZ", MonthKey::new(2025, 1).unwrap(), InstrumentType::Future, 0.0, lots)
    }

    #[test]
    fn test_load_builds_working_set() {
        let mut session = RiskSession::new();
        let summary = session.load(SPAN, BHAV).unwrap();
        assert_eq!(summary.contracts, 1);
        assert_eq!(summary.matched, 1);
        assert_eq!(session.book().len(), 1);
        assert_eq!(session.summary(), Some(&summary));
    }

    #[test]
    fn test_failed_load_keeps_previous_set() {
        let mut session = RiskSession::new();
        session.load(SPAN, BHAV).unwrap();
        session.add_position(xyz(1));

        let err = session.load("<spanFile>", BHAV).unwrap_err();
        assert!(err.is_load_failure());
        assert_eq!(session.book().len(), 1);
        assert_eq!(session.positions().len(), 1);

        session.clear();
        assert!(session.book().is_empty());
        assert!(session.positions().is_empty());
        assert!(session.summary().is_none());
    }

    #[test]
    fn test_successful_load_resets_positions() {
        let mut session = RiskSession::new();
        session.load(SPAN, BHAV).unwrap();
        session.add_position(xyz(1));
        session.load(SPAN, BHAV).unwrap();
        assert!(session.positions().is_empty());
    }

    #[test]
    fn test_position_editing() {
        let mut session = RiskSession::new();
        session.load(SPAN, BHAV).unwrap();
        session.set_positions(vec![xyz(2), xyz(5)]);

        session.replace_position(1, xyz(-3)).unwrap();
        assert_eq!(session.portfolio_risk().series, vec![-10.0, 20.0, -5.0]);
        assert_eq!(session.spreads()[0].net_lots, -1);

        assert_eq!(session.remove_position(0).unwrap().lots, 2);
        assert!(matches!(
            session.remove_position(5),
            Err(EngineError::PositionIndex { index: 5, len: 1 })
        ));
        assert!(session.replace_position(1, xyz(1)).is_err());
    }
}
