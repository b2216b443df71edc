//! Error types for risk-file reading and writing.

use thiserror::Error;

/// Errors raised while reading or writing a risk-scenario document.
///
/// Only structural failures are errors. Missing scenario arrays, unresolved
/// portfolio ids, and non-numeric values are counted in
/// [`crate::ExtractionStats`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// The text is not well-formed markup.
    #[error("Malformed risk document: {0}")]
    MalformedDocument(String),

    /// The document could not be serialised back to markup.
    #[error("Failed to write risk document: {0}")]
    Write(String),
}

impl SpanError {
    /// Create a malformed-document error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpanError::malformed("unclosed element <fut>");
        assert_eq!(
            err.to_string(),
            "Malformed risk document: unclosed element <fut>"
        );
    }
}
