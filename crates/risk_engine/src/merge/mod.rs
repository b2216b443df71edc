//! Snapshot merge of two risk documents.
//!
//! Compares an earlier (beginning-of-day) and a later (intraday) risk
//! document and produces one output document. The output always follows the
//! later document's layout; see [`MergeMode`] for the three outcomes.

mod engine;
mod mode;

pub use engine::{merge_max, merge_snapshots, MergeCounters, MergeOutcome};
pub use mode::MergeMode;
