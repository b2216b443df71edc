//! Error types for settlement-report reading.

use thiserror::Error;

/// Errors raised while reading a settlement report.
///
/// Rows that cannot be keyed are skipped and counted in
/// [`crate::BhavStats`]; they never produce an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BhavError {
    /// No table could be read from the text.
    #[error("Malformed settlement document: {0}")]
    MalformedDocument(String),

    /// A table was found but lacks a required column or header row.
    #[error("Settlement schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl BhavError {
    /// Create a malformed-document error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Create a schema-mismatch error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            BhavError::schema("missing column 'Symbol'").to_string(),
            "Settlement schema mismatch: missing column 'Symbol'"
        );
        assert_eq!(
            BhavError::malformed("no table found").to_string(),
            "Malformed settlement document: no table found"
        );
    }
}
