//! Contract identity and entity types.
//!
//! This module provides:
//! - `instrument`: `InstrumentType` (future/option) and `OptionRight` (call/put)
//! - `month`: `MonthKey`, the canonical `MMM-YYYY` contract month
//! - `key`: `ContractKey`, the composite join key shared by every source file
//! - `contract`: `Contract`, a risk-file contract enriched with settlement data
//! - `settlement`: `Settlement`, one row of the settlement-price file
//! - `position`: `Position`, a signed lot count against a contract key

pub mod contract;
pub mod instrument;
pub mod key;
pub mod month;
pub mod position;
pub mod settlement;

pub use contract::Contract;
pub use instrument::{InstrumentType, OptionRight};
pub use key::{normalize_symbol, ContractKey, StrikeKey};
pub use month::MonthKey;
pub use position::Position;
pub use settlement::Settlement;
