//! Number text: parsing display segments and formatting results
//!
//! The display only ever holds `[-]digits[.digits]` style numbers, so the
//! parser rejects anything else before handing the text to `f64::from_str`
//! (which would otherwise accept `inf`, `NaN` or exponents).

use crate::core::{check_finite, CalcError, CalcResult};

/// Parses one display segment as an operand
///
/// A digit run too long for `f64` is a non-finite error, not a parse error.
pub fn parse_operand(text: &str) -> CalcResult<f64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let has_digit = digits.chars().any(|c| c.is_ascii_digit());
    let clean = digits.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !has_digit || !clean {
        return Err(CalcError::parse(text));
    }
    let value = text.parse::<f64>().map_err(|_| CalcError::parse(text))?;
    check_finite(value)
}

/// Formats a finite value as canonical display text
///
/// Uses the shortest representation that round-trips (`8`, `0.1`, `-2.5`).
/// Negative zero is shown as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
