//! Exchange number conventions.
//!
//! Exchange files write numbers as plain decimal text, sometimes with
//! thousands separators. Scenario values are written back with a fixed
//! ten-place precision whose trailing zeros (and a trailing decimal point)
//! are stripped, so `1234.5000000000` is emitted as `1234.5`.

/// Fixed precision used when writing scenario values.
pub const EXCHANGE_DECIMAL_PLACES: usize = 10;

/// Parse a numeric cell or text node.
///
/// Thousands separators and surrounding whitespace are ignored. Empty,
/// non-numeric, and non-finite text yields `None`.
///
/// # Examples
/// ```
/// use risk_core::format::parse_number;
///
/// assert_eq!(parse_number(" 1,234.50 "), Some(1234.5));
/// assert_eq!(parse_number("-"), None);
/// assert_eq!(parse_number(""), None);
/// ```
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a value the way exchange risk files write scenario values.
///
/// # Examples
/// ```
/// use risk_core::format::format_exchange_decimal;
///
/// assert_eq!(format_exchange_decimal(1234.5), "1234.5");
/// assert_eq!(format_exchange_decimal(0.0), "0");
/// assert_eq!(format_exchange_decimal(-12.0), "-12");
/// ```
pub fn format_exchange_decimal(value: f64) -> String {
    let fixed = format!("{:.*}", EXCHANGE_DECIMAL_PLACES, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    // "-0" only appears for values that round to zero
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a value with two decimal places, mapping negative zero to `0.00`.
pub fn format_two_places(value: f64) -> String {
    let text = format!("{:.2}", value);
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_plain() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-0.125"), Some(-0.125));
        assert_eq!(parse_number("+7"), Some(7.0));
    }

    #[test]
    fn test_parse_number_thousands_separator() {
        assert_eq!(parse_number("12,34,567.25"), Some(1234567.25));
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_format_exchange_decimal_strips_zeros() {
        assert_eq!(format_exchange_decimal(1234.5), "1234.5");
        assert_eq!(format_exchange_decimal(100.0), "100");
        assert_eq!(format_exchange_decimal(0.0000000001), "0.0000000001");
        assert_eq!(format_exchange_decimal(-3.25), "-3.25");
    }

    #[test]
    fn test_format_exchange_decimal_zero_forms() {
        assert_eq!(format_exchange_decimal(0.0), "0");
        assert_eq!(format_exchange_decimal(-0.0), "0");
        assert_eq!(format_exchange_decimal(-0.00000000001), "0");
    }

    #[test]
    fn test_format_exchange_decimal_rounds_to_precision() {
        assert_eq!(format_exchange_decimal(1.00000000004), "1");
        assert_eq!(format_exchange_decimal(2.123456789012), "2.123456789");
    }

    #[test]
    fn test_format_two_places() {
        assert_eq!(format_two_places(62000.0), "62000.00");
        assert_eq!(format_two_places(-0.0), "0.00");
        assert_eq!(format_two_places(100.255), "100.25");
    }
}
