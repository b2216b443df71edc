//! # risk_engine: Contract Join, Portfolio Risk and Snapshot Merge
//!
//! Combines the adapters' output into the working contract set and runs the
//! two downstream workflows over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               risk_engine                     │
//! ├───────────────────────────────────────────────┤
//! │  join       - risk file ⋈ settlement by key   │
//! │  book       - ContractBook, filtering         │
//! │  portfolio/ - aggregation, spread grouping    │
//! │  merge/     - earlier/later snapshot merge    │
//! │  session    - working set for one session     │
//! │  export     - CSV projection and import       │
//! └───────────────────────────────────────────────┘
//!          ↓                        ↓
//! ┌──────────────────────┐ ┌──────────────────────┐
//! │    adapter_span      │ │    adapter_bhav      │
//! └──────────────────────┘ └──────────────────────┘
//!          ↓                        ↓
//! ┌───────────────────────────────────────────────┐
//! │                 risk_core                     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use risk_core::{InstrumentType, MonthKey, Position};
//! use risk_engine::RiskSession;
//!
//! let span = r#"<spanFile>
//!   <phyPf><pfId>1</pfId><pfCode>XYZ</pfCode></phyPf>
//!   <fut><pe>20250130</pe><undC><pfId>1</pfId></undC>
//!     <ra><a>10</a><a>-20</a><a>5</a></ra></fut>
//! </spanFile>"#;
//! let bhav = "<table><tr><th>Symbol</th><th>Expiry Date</th><th>Close</th></tr>\
//!             <tr><td>XYZ</td><td>30JAN2025</td><td>100.25</td></tr></table>";
//!
//! let mut session = RiskSession::new();
//! session.load(span, bhav).unwrap();
//!
//! let jan = MonthKey::new(2025, 1).unwrap();
//! session.add_position(Position::new("XYZ", jan, InstrumentType::Future, 0.0, -1));
//! let risk = session.portfolio_risk();
//! assert_eq!(risk.series, vec![-10.0, 20.0, -5.0]);
//! assert_eq!(risk.worst, 20.0);
//! ```

#![deny(missing_docs)]

pub mod book;
pub mod error;
pub mod export;
pub mod join;
pub mod merge;
pub mod portfolio;
pub mod session;

pub use book::{ContractBook, ContractFilter};
pub use error::{EngineError, MergeError};
pub use join::{join, JoinOutcome};
pub use merge::{merge_max, merge_snapshots, MergeCounters, MergeMode, MergeOutcome};
pub use portfolio::{
    aggregate_portfolio, group_spreads, PortfolioRisk, PositionImpact, SpreadGroup, SpreadLeg,
};
pub use session::{load_contract_book, LoadSummary, RiskSession};
