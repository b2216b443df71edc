//! # risk_core: Contract and Scenario Foundation
//!
//! ## Foundation Layer Role
//!
//! risk_core is the bottom layer of the workspace, providing:
//! - Contract identity: `ContractKey`, `MonthKey`, `InstrumentType`, `OptionRight` (`types`)
//! - Entities: `Contract`, `Settlement`, `Position` (`types`)
//! - Scenario arithmetic: `ScenarioArray`, `worst_absolute`, `merge_by_max` (`scenario`)
//! - Exchange number conventions: `parse_number`, `format_exchange_decimal` (`format`)
//! - Error types: `CoreError` (`error`)
//!
//! Adapters (`adapter_span`, `adapter_bhav`) produce these types, and
//! `risk_engine` consumes them. Nothing in this crate performs I/O.
//!
//! ## Usage Examples
//!
//! ```rust
//! use risk_core::scenario::{merge_by_max, worst_absolute};
//! use risk_core::types::{ContractKey, InstrumentType, MonthKey};
//!
//! assert_eq!(worst_absolute(&[10.0, -20.0, 5.0]), 20.0);
//! assert_eq!(merge_by_max(&[5.0, 5.0], &[3.0, 9.0, 1.0]), vec![5.0, 9.0, 1.0]);
//!
//! let month = MonthKey::from_expiry_code("20250130");
//! let key = ContractKey::new("xyz", month, InstrumentType::Future, 0.0);
//! assert_eq!(key.to_string(), "XYZ|JAN-2025|FUT|0.00");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for the public value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod format;
pub mod scenario;
pub mod types;

pub use error::CoreError;
pub use scenario::{merge_by_max, worst_absolute, ScenarioArray};
pub use types::{
    normalize_symbol, Contract, ContractKey, InstrumentType, MonthKey, OptionRight, Position,
    Settlement, StrikeKey,
};
