//! CLI error types.

use adapter_bhav::BhavError;
use adapter_span::SpanError;
use risk_core::CoreError;
use risk_engine::{EngineError, MergeError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument could not be interpreted
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Value parsing failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Risk-file failure
    #[error(transparent)]
    Span(#[from] SpanError),

    /// Settlement-file failure
    #[error(transparent)]
    Bhav(#[from] BhavError),

    /// Engine failure
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Merge failure
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
