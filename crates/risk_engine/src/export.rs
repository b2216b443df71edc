//! CSV projection of contracts and positions.

use serde::{Deserialize, Serialize};

use risk_core::format::{format_exchange_decimal, format_two_places, parse_number};
use risk_core::{Contract, CoreError, InstrumentType, MonthKey, OptionRight, Position};

use crate::error::EngineError;

/// One row of the contracts CSV.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContractRow {
    /// Symbol
    pub symbol: String,
    /// `MMM-YYYY` or `UNK`
    pub month: String,
    /// `FUT` or `OPT`
    #[serde(rename = "type")]
    pub instrument: &'static str,
    /// Two-decimal strike for options, empty for futures
    pub strike: String,
    /// Settlement price
    pub close: Option<String>,
    /// Open interest
    pub oi: Option<String>,
    /// Price-scan range
    pub scan: Option<String>,
    /// Worst absolute scenario value, two decimals
    pub worst_abs_ra: String,
}

impl From<&Contract> for ContractRow {
    fn from(c: &Contract) -> Self {
        Self {
            symbol: c.symbol.clone(),
            month: c.month.to_string(),
            instrument: c.instrument.code(),
            strike: option_strike(c.instrument, c.strike),
            close: c.settlement_price.map(format_exchange_decimal),
            oi: c.open_interest.map(format_exchange_decimal),
            scan: c.price_scan.map(format_exchange_decimal),
            worst_abs_ra: format_two_places(c.worst_absolute()),
        }
    }
}

/// One row of the positions CSV.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionRow {
    /// Symbol
    pub symbol: String,
    /// `MMM-YYYY` or `UNK`
    pub month: String,
    /// `FUT` or `OPT`
    #[serde(rename = "type")]
    pub instrument: String,
    /// Two-decimal strike for options, blank for futures
    #[serde(default)]
    pub strike: String,
    /// Signed lots
    pub lots: i64,
    /// `C` or `P`, optional
    #[serde(default)]
    pub right: Option<String>,
}

impl From<&Position> for PositionRow {
    fn from(p: &Position) -> Self {
        Self {
            symbol: p.symbol.clone(),
            month: p.month.to_string(),
            instrument: p.instrument.code().to_string(),
            strike: option_strike(p.instrument, p.strike),
            lots: p.lots,
            right: p.right.map(|r| r.code().to_string()),
        }
    }
}

impl PositionRow {
    /// Convert to a position, validating month, type, strike and right.
    pub fn into_position(self) -> Result<Position, EngineError> {
        let month: MonthKey = self
            .month
            .parse()
            .map_err(|e: CoreError| EngineError::import(e.to_string()))?;
        let instrument: InstrumentType = self
            .instrument
            .parse()
            .map_err(|e: CoreError| EngineError::import(e.to_string()))?;
        let strike = match self.strike.trim() {
            "" => 0.0,
            text => parse_number(text)
                .ok_or_else(|| EngineError::import(format!("invalid strike '{}'", text)))?,
        };
        let right = match self.right.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) => Some(
                code.parse::<OptionRight>()
                    .map_err(|e| EngineError::import(e.to_string()))?,
            ),
        };
        Ok(Position::new(self.symbol, month, instrument, strike, self.lots).with_right(right))
    }
}

fn option_strike(instrument: InstrumentType, strike: f64) -> String {
    match instrument {
        InstrumentType::Option => format_two_places(strike),
        InstrumentType::Future => String::new(),
    }
}

fn write_rows<T: Serialize>(rows: impl IntoIterator<Item = T>, delimiter: u8) -> Result<String, EngineError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| EngineError::export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| EngineError::export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| EngineError::export(e.to_string()))
}

/// Contracts as CSV with columns
/// `symbol,month,type,strike,close,oi,scan,worst_abs_ra`.
///
/// # Examples
///
/// ```
/// use risk_core::{Contract, InstrumentType, MonthKey, ScenarioArray};
/// use risk_engine::export::contracts_to_csv;
///
/// let c = Contract::new("XYZ", MonthKey::new(2025, 1).unwrap(), InstrumentType::Future, 0.0,
///     ScenarioArray::new(vec![10.0, -20.0, 5.0]));
/// let csv = contracts_to_csv([&c], b',').unwrap();
/// assert_eq!(csv, "symbol,month,type,strike,close,oi,scan,worst_abs_ra\nXYZ,JAN-2025,FUT,,,,,20.00\n");
/// ```
pub fn contracts_to_csv<'a>(
    contracts: impl IntoIterator<Item = &'a Contract>,
    delimiter: u8,
) -> Result<String, EngineError> {
    write_rows(contracts.into_iter().map(ContractRow::from), delimiter)
}

/// Positions as CSV with columns `symbol,month,type,strike,lots,right`.
pub fn positions_to_csv(positions: &[Position], delimiter: u8) -> Result<String, EngineError> {
    write_rows(positions.iter().map(PositionRow::from), delimiter)
}

/// Read positions from CSV with a header row.
///
/// The `right` column may be absent and `strike` may be blank.
pub fn positions_from_csv(text: &str, delimiter: u8) -> Result<Vec<Position>, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut positions = Vec::new();
    for (i, record) in reader.deserialize::<PositionRow>().enumerate() {
        let line = i + 2;
        let row = record.map_err(|e| EngineError::import(format!("line {}: {}", line, e)))?;
        let position = row.into_position().map_err(|e| match e {
            EngineError::Import(msg) => EngineError::import(format!("line {}: {}", line, msg)),
            other => other,
        })?;
        positions.push(position);
    }
    tracing::debug!(positions = positions.len(), "Imported positions");
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::{ScenarioArray, Settlement};

    fn feb() -> MonthKey {
        MonthKey::new(2025, 2).unwrap()
    }

    #[test]
    fn test_contract_row_with_settlement() {
        let s = Settlement::new("GOLD", feb(), InstrumentType::Option, 78000.0)
            .with_close(Some(1050.5))
            .with_open_interest(Some(1200.0));
        let c = Contract::new("GOLD", feb(), InstrumentType::Option, 78000.0, ScenarioArray::new(vec![-3.333, 1.0]))
            .with_price_scan(Some(4500.0))
            .with_settlement(&s);
        let csv = contracts_to_csv([&c], b';').unwrap();
        assert_eq!(
            csv,
            "symbol;month;type;strike;close;oi;scan;worst_abs_ra\n\
             GOLD;FEB-2025;OPT;78000.00;1050.5;1200;4500;3.33\n"
        );
    }

    #[test]
    fn test_positions_export_then_import() {
        let positions = vec![
            Position::new("GOLD", feb(), InstrumentType::Future, 0.0, -3),
            Position::new("GOLD", feb(), InstrumentType::Option, 78000.0, 2).with_right(Some(OptionRight::Put)),
        ];
        let csv = positions_to_csv(&positions, b',').unwrap();
        assert_eq!(
            csv,
            "symbol,month,type,strike,lots,right\n\
             GOLD,FEB-2025,FUT,,-3,\n\
             GOLD,FEB-2025,OPT,78000.00,2,P\n"
        );
        assert_eq!(positions_from_csv(&csv, b',').unwrap(), positions);
    }

    #[test]
    fn test_import_without_right_column() {
        let text = "symbol,month,type,strike,lots\n xyz ,JAN-2025,FUT,,4\nGOLD,FEB-2025,OPT,78000,-1\n";
        let positions = positions_from_csv(text, b',').unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].symbol, "XYZ");
        assert_eq!(positions[0].strike, 0.0);
        assert_eq!(positions[1].right, None);
        assert_eq!(positions[1].key().to_string(), "GOLD|FEB-2025|OPT|78000.00");
    }

    #[test]
    fn test_import_errors_name_the_line() {
        let err = positions_from_csv("symbol,month,type,strike,lots\nXYZ,JANUARY,FUT,,1\n", b',')
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = positions_from_csv("symbol,month,type,strike,lots\nXYZ,JAN-2025,SWAP,,1\n", b',')
            .unwrap_err();
        assert!(matches!(err, EngineError::Import(_)));

        let err = positions_from_csv("symbol,month,type,strike,lots\nXYZ,JAN-2025,FUT,,many\n", b',')
            .unwrap_err();
        assert!(matches!(err, EngineError::Import(_)));

        let err = positions_from_csv("symbol,month,type,strike,lots\nXYZ,JAN-2025,OPT,high,1\n", b',')
            .unwrap_err();
        assert_eq!(err.to_string(), "Position import failed: line 2: invalid strike 'high'");
    }
}
