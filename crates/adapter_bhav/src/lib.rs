//! # adapter_bhav: Settlement Report Adapter
//!
//! Reads the exchange's daily settlement (Bhav) report, an HTML table, into
//! [`risk_core::Settlement`] records.
//!
//! Columns are located by header label, case-insensitively, so column order
//! in the report does not matter. `Symbol` and `Expiry Date` are required;
//! `Option Type`, `Strike Price`, `Close`, `Open Interest(Lots)` and
//! `Instrument Name` are read when present.
//!
//! ## Usage
//!
//! ```rust
//! use adapter_bhav::BhavParser;
//!
//! let html = r#"<html><body><table>
//!   <tr><th>Symbol</th><th>Expiry Date</th><th>Option Type</th>
//!       <th>Strike Price</th><th>Close</th></tr>
//!   <tr><td>GOLD</td><td>27JAN2025</td><td>PE</td><td>78,000</td><td>412.5</td></tr>
//! </table></body></html>"#;
//!
//! let table = BhavParser::parse(html).unwrap();
//! assert_eq!(table.settlements[0].key().to_string(), "GOLD|JAN-2025|OPT|78000.00");
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod parser;
pub mod table;

pub use error::BhavError;
pub use parser::{BhavParser, BhavStats, SettlementTable};
