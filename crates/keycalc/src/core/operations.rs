//! Binary operators and unary functions
//!
//! Closed enums with exhaustive dispatch; the engine never matches on raw
//! operator text except through [`BinaryOp::from_symbol`].

use crate::core::{CalcError, CalcResult, NonFinite};
use serde::{Deserialize, Serialize};

/// The four binary operators of the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl BinaryOp {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the glyph written into the display buffer
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Parses a display glyph or its ASCII alias (`*`, `/`)
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "×" | "*" => Some(Self::Multiply),
            "÷" | "/" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operator to two operands
    ///
    /// Division by zero is rejected before dividing; any other non-finite
    /// outcome is rejected after computing.
    pub fn apply(&self, a: f64, b: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };
        check_finite(result)
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Single-operand functions applied to the whole display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryFn {
    /// 1 / x
    Reciprocal,
    /// x²
    Square,
    /// √x
    SquareRoot,
}

impl UnaryFn {
    /// All functions in keypad order
    pub const ALL: [Self; 3] = [Self::Reciprocal, Self::Square, Self::SquareRoot];

    /// Returns the keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Reciprocal => "1/x",
            Self::Square => "x²",
            Self::SquareRoot => "√",
        }
    }

    /// Applies the function; zero reciprocal and negative roots surface
    /// through the non-finite check.
    pub fn apply(&self, value: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Reciprocal => 1.0 / value,
            Self::Square => value * value,
            Self::SquareRoot => value.sqrt(),
        };
        check_finite(result)
    }
}

impl std::fmt::Display for UnaryFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejects NaN and infinities
pub fn check_finite(result: f64) -> CalcResult<f64> {
    if result.is_nan() {
        Err(CalcError::NonFinite(NonFinite::NaN))
    } else if result.is_infinite() {
        Err(CalcError::NonFinite(NonFinite::Infinite))
    } else {
        Ok(result)
    }
}
