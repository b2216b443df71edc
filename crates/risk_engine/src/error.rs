//! Error types for the risk engine.

use adapter_bhav::BhavError;
use adapter_span::SpanError;
use thiserror::Error;

use crate::merge::MergeMode;

/// Errors raised by snapshot merging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The selected mode needs a document that was not supplied.
    #[error("Merge mode '{mode}' requires the {role} document")]
    MissingDocument {
        /// Selected mode
        mode: MergeMode,
        /// `earlier` or `later`
        role: &'static str,
    },
}

/// Errors raised by the risk engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Risk-file failure
    #[error(transparent)]
    Span(#[from] SpanError),

    /// Settlement-file failure
    #[error(transparent)]
    Bhav(#[from] BhavError),

    /// Snapshot merge failure
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// CSV projection could not be written.
    #[error("CSV export failed: {0}")]
    Export(String),

    /// Position CSV could not be read.
    #[error("Position import failed: {0}")]
    Import(String),

    /// Position index outside the working list.
    #[error("Position index {index} out of range for {len} positions")]
    PositionIndex {
        /// Requested index
        index: usize,
        /// Number of positions held
        len: usize,
    },
}

impl EngineError {
    /// Create an export error
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Create an import error
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    /// Whether the error aborted a document load.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Span(_) | Self::Bhav(_))
    }
}
