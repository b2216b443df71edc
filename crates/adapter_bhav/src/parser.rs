//! Settlement-report column mapping and record building.

use risk_core::format::parse_number;
use risk_core::{normalize_symbol, InstrumentType, MonthKey, OptionRight, Settlement};

use crate::error::BhavError;
use crate::table::{read_first_table, Rows};

/// Header label of the symbol column.
pub const SYMBOL_COLUMN: &str = "Symbol";
/// Header label of the expiry column.
pub const EXPIRY_COLUMN: &str = "Expiry Date";
/// Header label of the option-type column.
pub const OPTION_TYPE_COLUMN: &str = "Option Type";
/// Header label of the strike column.
pub const STRIKE_COLUMN: &str = "Strike Price";
/// Header label of the close-price column.
pub const CLOSE_COLUMN: &str = "Close";
/// Header label of the open-interest column.
pub const OPEN_INTEREST_COLUMN: &str = "Open Interest(Lots)";
/// Header label of the instrument-name column.
pub const INSTRUMENT_NAME_COLUMN: &str = "Instrument Name";

/// Option-type cell value that means "not an option".
const PLACEHOLDER: &str = "-";

/// Row counters for one report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BhavStats {
    /// Data rows below the header
    pub rows_read: usize,
    /// Rows skipped for lack of a symbol or a derivable month
    pub skipped: usize,
}

/// Settlement records read from one report.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettlementTable {
    /// Records in row order
    pub settlements: Vec<Settlement>,
    /// Row counters
    pub stats: BhavStats,
}

/// Column positions resolved from the header row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Columns {
    symbol: usize,
    expiry: usize,
    option_type: Option<usize>,
    strike: Option<usize>,
    close: Option<usize>,
    open_interest: Option<usize>,
    instrument_name: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, BhavError> {
        let find = |label: &str| {
            let wanted = label_key(label);
            header.iter().position(|h| label_key(h) == wanted)
        };
        let require = |label: &str| {
            find(label).ok_or_else(|| BhavError::schema(format!("missing column '{}'", label)))
        };
        Ok(Self {
            symbol: require(SYMBOL_COLUMN)?,
            expiry: require(EXPIRY_COLUMN)?,
            option_type: find(OPTION_TYPE_COLUMN),
            strike: find(STRIKE_COLUMN),
            close: find(CLOSE_COLUMN),
            open_interest: find(OPEN_INTEREST_COLUMN),
            instrument_name: find(INSTRUMENT_NAME_COLUMN),
        })
    }
}

/// Header comparison key: lower-case, whitespace removed.
fn label_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// Settlement-report parser.
pub struct BhavParser;

impl BhavParser {
    /// Read settlement records from a report.
    ///
    /// # Errors
    ///
    /// - [`BhavError::MalformedDocument`] when no table is found
    /// - [`BhavError::SchemaMismatch`] when the table is empty or the
    ///   `Symbol` or `Expiry Date` column is missing
    ///
    /// # Examples
    ///
    /// ```
    /// use adapter_bhav::BhavParser;
    ///
    /// let html = "<table>\
    ///     <tr><th>Symbol</th><th>Expiry Date</th><th>Close</th></tr>\
    ///     <tr><td>XYZ</td><td>30JAN2025</td><td>100.25</td></tr>\
    ///   </table>";
    /// let table = BhavParser::parse(html).unwrap();
    /// assert_eq!(table.settlements[0].key().to_string(), "XYZ|JAN-2025|FUT|0.00");
    /// assert_eq!(table.settlements[0].close, Some(100.25));
    /// ```
    pub fn parse(html: &str) -> Result<SettlementTable, BhavError> {
        let rows = read_first_table(html)?;
        Self::from_rows(&rows)
    }

    /// Build settlement records from already-read rows. Row `0` is the header.
    pub fn from_rows(rows: &Rows) -> Result<SettlementTable, BhavError> {
        let (header, data) = rows
            .split_first()
            .ok_or_else(|| BhavError::schema("table has no header row"))?;
        let columns = Columns::from_header(header)?;

        let mut out = SettlementTable::default();
        for row in data {
            out.stats.rows_read += 1;
            match settlement_from_row(row, &columns) {
                Some(settlement) => out.settlements.push(settlement),
                None => out.stats.skipped += 1,
            }
        }

        tracing::info!(
            settlements = out.settlements.len(),
            rows = out.stats.rows_read,
            skipped = out.stats.skipped,
            "Read settlement report"
        );
        Ok(out)
    }
}

fn settlement_from_row(row: &[String], columns: &Columns) -> Option<Settlement> {
    let symbol = normalize_symbol(cell(row, Some(columns.symbol)));
    if symbol.is_empty() {
        return None;
    }
    let expiry = cell(row, Some(columns.expiry));
    let Some(month) = MonthKey::from_settlement_expiry(expiry) else {
        tracing::debug!(symbol = %symbol, expiry, "Skipping row without a derivable month");
        return None;
    };

    let option_type = match cell(row, columns.option_type).trim() {
        "" => PLACEHOLDER,
        other => other,
    };
    let instrument = if option_type == PLACEHOLDER {
        InstrumentType::Future
    } else {
        InstrumentType::Option
    };
    let strike = parse_number(cell(row, columns.strike)).unwrap_or(0.0);
    let instrument_name = Some(cell(row, columns.instrument_name))
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let mut settlement = Settlement::new(symbol, month, instrument, strike)
        .with_right(OptionRight::from_code(option_type))
        .with_close(parse_number(cell(row, columns.close)))
        .with_open_interest(parse_number(cell(row, columns.open_interest)));
    settlement.instrument_name = instrument_name;
    settlement.expiry_raw = expiry.to_string();
    Some(settlement)
}
