//! Core calculator module: errors, operations, number text and the engine
//!
//! Every failure inside the engine collapses to one visible sentinel, but the
//! cause is kept as a typed [`CalcError`] so callers can tell them apart.

pub mod engine;
pub mod number;
mod operations;

pub use engine::{Engine, Snapshot};
pub use operations::{check_finite, BinaryOp, UnaryFn};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text shown in place of the display while the engine is in the error state
pub const ERROR_SENTINEL: &str = "ERROR";

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error causes - exhaustive enum ensures all cases handled
///
/// A malformed equals press (buffer not shaped `a OP b`) has no variant
/// here: it is a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum CalcError {
    /// A buffer segment was not a clean number when one was required
    #[error("Invalid number: {0:?}")]
    Parse(String),
    /// Division with a zero right operand, caught before dividing
    #[error("Division by zero")]
    DivisionByZero,
    /// The computed value was NaN or infinite
    #[error("Non-finite result: {0}")]
    NonFinite(NonFinite),
}

impl CalcError {
    /// Create a parse error for the offending text
    #[must_use]
    pub fn parse(text: impl Into<String>) -> Self {
        Self::Parse(text.into())
    }
}

/// Kind of non-finite value detected after a computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinite {
    /// Not-a-number (e.g. square root of a negative value)
    #[serde(rename = "nan")]
    NaN,
    /// Positive or negative infinity (overflow, reciprocal of zero)
    Infinite,
}

impl std::fmt::Display for NonFinite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NaN => write!(f, "NaN detected"),
            Self::Infinite => write!(f, "Infinite value detected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_parse() {
        let err = CalcError::parse("5 +");
        assert_eq!(format!("{err}"), "Invalid number: \"5 +\"");
    }

    #[test]
    fn test_calc_error_display_division_by_zero() {
        assert_eq!(format!("{}", CalcError::DivisionByZero), "Division by zero");
    }

    #[test]
    fn test_calc_error_display_non_finite() {
        let err = CalcError::NonFinite(NonFinite::NaN);
        assert_eq!(format!("{err}"), "Non-finite result: NaN detected");
        let err = CalcError::NonFinite(NonFinite::Infinite);
        assert!(format!("{err}").contains("Infinite"));
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("Division"));
    }

    #[test]
    fn test_calc_error_serializes_with_kind_tag() {
        let json = serde_json::to_string(&CalcError::DivisionByZero).unwrap();
        assert_eq!(json, r#"{"kind":"division_by_zero"}"#);

        let json = serde_json::to_string(&CalcError::NonFinite(NonFinite::NaN)).unwrap();
        assert_eq!(json, r#"{"kind":"non_finite","detail":"nan"}"#);
    }

    #[test]
    fn test_sentinel_is_not_numeric() {
        assert!(ERROR_SENTINEL.parse::<f64>().is_err());
    }
}
