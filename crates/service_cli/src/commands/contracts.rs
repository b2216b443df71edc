//! Contracts command implementation
//!
//! Loads a risk file and a settlement report, joins them and prints or
//! exports the contract table.

use std::path::Path;

use risk_core::{InstrumentType, MonthKey};
use risk_engine::export::contracts_to_csv;
use risk_engine::{load_contract_book, ContractFilter};
use tracing::info;

use crate::commands::{or_dash, read_input, write_output};
use crate::config::MaxspanConfig;
use crate::Result;

/// Arguments of the contracts command
pub struct ContractsArgs<'a> {
    pub span: &'a Path,
    pub bhav: &'a Path,
    pub month: Option<&'a str>,
    pub instrument: Option<&'a str>,
    pub search: Option<&'a str>,
    pub output: Option<&'a Path>,
}

/// Build the contract filter from command arguments
fn build_filter(args: &ContractsArgs<'_>) -> Result<ContractFilter> {
    let mut filter = ContractFilter::new();
    if let Some(month) = args.month {
        filter = filter.with_month(month.parse::<MonthKey>()?);
    }
    if let Some(instrument) = args.instrument {
        filter = filter.with_instrument(instrument.parse::<InstrumentType>()?);
    }
    if let Some(search) = args.search {
        filter = filter.with_search(search);
    }
    Ok(filter)
}

/// Run the contracts command
pub fn run(args: &ContractsArgs<'_>, config: &MaxspanConfig) -> Result<()> {
    let filter = build_filter(args)?;
    let span = read_input(args.span)?;
    let bhav = read_input(args.bhav)?;

    let (book, summary) = load_contract_book(&span, &bhav)?;
    info!(
        contracts = summary.contracts,
        matched = summary.matched,
        missing_scenarios = summary.extraction.missing_scenarios,
        unresolved = summary.extraction.unresolved_symbols,
        duplicates = summary.extraction.duplicates,
        skipped_rows = summary.settlement.skipped,
        "Loaded contracts"
    );

    let selected = book.filter(&filter);

    match args.output {
        Some(path) => {
            let csv = contracts_to_csv(selected.iter().copied(), config.delimiter())?;
            write_output(path, &csv)?;
            println!("Wrote {} of {} contracts to {}", selected.len(), book.len(), path.display());
        }
        None => {
            println!(
                "{:<14} {:<9} {:<4} {:>12} {:>12} {:>10} {:>10} {:>14}",
                "SYMBOL", "MONTH", "TYPE", "STRIKE", "CLOSE", "OI", "SCAN", "WORST_ABS_RA"
            );
            for c in &selected {
                let strike = if c.instrument.is_option() {
                    format!("{:.2}", c.strike)
                } else {
                    "-".to_string()
                };
                println!(
                    "{:<14} {:<9} {:<4} {:>12} {:>12} {:>10} {:>10} {:>14.2}",
                    c.symbol,
                    c.month.to_string(),
                    c.instrument.code(),
                    strike,
                    or_dash(c.settlement_price),
                    or_dash(c.open_interest),
                    or_dash(c.price_scan),
                    c.worst_absolute()
                );
            }
            let months: Vec<String> = book.months().iter().map(|m| m.to_string()).collect();
            println!();
            println!("{} of {} contracts shown", selected.len(), book.len());
            println!("Months: {}", months.join(", "));
            println!("Symbols: {}", book.symbols().join(", "));
        }
    }
    Ok(())
}
