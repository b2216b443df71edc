//! Error types for core value parsing.
//!
//! Only user-supplied labels (instrument type, option right, month key) can
//! fail to parse. Numeric values from exchange files never error: they are
//! coerced by [`crate::format::parse_number`] instead.

use thiserror::Error;

/// Errors raised when parsing core value types from text.
///
/// # Examples
/// ```
/// use risk_core::CoreError;
///
/// let err = CoreError::InvalidInstrumentType("SWAP".to_string());
/// assert_eq!(format!("{}", err), "Invalid instrument type: SWAP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Instrument type label is neither a future nor an option.
    #[error("Invalid instrument type: {0}")]
    InvalidInstrumentType(String),

    /// Option right label is neither call nor put.
    #[error("Invalid option right: {0}")]
    InvalidOptionRight(String),

    /// Month label is not of the form `MMM-YYYY` or `UNK`.
    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidMonthKey("13-2025".to_string());
        assert_eq!(format!("{}", err), "Invalid month key: 13-2025");

        let err = CoreError::InvalidOptionRight("X".to_string());
        assert!(err.to_string().contains("option right"));
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> =
            Box::new(CoreError::InvalidInstrumentType("SWAP".to_string()));
        assert!(err.to_string().contains("SWAP"));
    }
}
