//! Display formatting for evaluation results

use std::fmt;

use tally_expr::EvalResult;

/// Maximum number of fractional digits shown for non-integers
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Integers at or above this magnitude go through the fractional path
const INTEGER_DISPLAY_LIMIT: f64 = 1e15;

/// What a front end shows for one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    /// A formatted finite number
    Number(String),
    /// Generic error state
    Error,
}

impl DisplayValue {
    pub fn is_error(&self) -> bool {
        matches!(self, DisplayValue::Error)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Number(text) => f.write_str(text),
            DisplayValue::Error => f.write_str("Error"),
        }
    }
}

/// Format a number for display
///
/// Whole numbers print without a decimal point. Anything else is printed
/// with up to [`MAX_FRACTION_DIGITS`] fractional digits and trailing zeros
/// trimmed.
///
/// # Example
/// ```rust
/// use tally::display::format_number;
///
/// assert_eq!(format_number(14.0), "14");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
/// ```
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < INTEGER_DISPLAY_LIMIT {
        return format!("{}", value as i64);
    }

    let formatted = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    // Tiny negatives can round to "-0"
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Map an evaluation result to what the user sees
///
/// Evaluation errors and non-finite values both become [`DisplayValue::Error`].
pub fn render(result: &EvalResult<f64>) -> DisplayValue {
    match result {
        Ok(value) if value.is_finite() => DisplayValue::Number(format_number(*value)),
        _ => DisplayValue::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_expr::EvalError;

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(512.0), "512");
        assert_eq!(format_number(999_999_999_999_999.0), "999999999999999");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-2.25), "-2.25");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666667");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_format_tiny_values() {
        assert_eq!(format_number(1e-12), "0");
        assert_eq!(format_number(-1e-12), "0");
    }

    #[test]
    fn test_format_large_values() {
        assert_eq!(format_number(1e15), "1000000000000000");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&Ok(14.0)), DisplayValue::Number("14".into()));
        assert_eq!(render(&Ok(f64::NAN)), DisplayValue::Error);
        assert_eq!(render(&Ok(f64::INFINITY)), DisplayValue::Error);
        assert_eq!(
            render(&Err(EvalError::DivisionByZero { position: 1 })),
            DisplayValue::Error
        );
    }

    #[test]
    fn test_display_value_to_string() {
        assert_eq!(DisplayValue::Number("3.5".into()).to_string(), "3.5");
        assert_eq!(DisplayValue::Error.to_string(), "Error");
        assert!(DisplayValue::Error.is_error());
    }
}
