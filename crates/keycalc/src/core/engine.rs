//! Calculator engine: a state machine over one display buffer
//!
//! The buffer is both what the user sees and what gets parsed. Every
//! operation updates the visible string and keeps it re-parseable by the
//! next one; the only grammar is `NUMBER (SPACE OPERATOR SPACE NUMBER)?`.
//!
//! Operations never fail. A failure replaces the buffer with
//! [`ERROR_SENTINEL`] and records the cause until a digit, decimal point,
//! backspace, clear-entry or clear resets the engine.

use crate::core::number::{format_number, parse_operand};
use crate::core::{BinaryOp, CalcError, CalcResult, UnaryFn, ERROR_SENTINEL};
use crate::keypad::{Digit, Key};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

const INITIAL_DISPLAY: &str = "0";

/// Serializable view of the engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display buffer
    pub display: String,
    /// Cause of the current error, if any
    pub error: Option<CalcError>,
    /// Operator awaiting its right operand
    pub pending_operator: Option<BinaryOp>,
    /// Whether the trailing operand already has a decimal point
    pub decimal_used: bool,
}

/// The calculator engine
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    buffer: String,
    operator: Option<BinaryOp>,
    decimal_used: bool,
    error: Option<CalcError>,
    num1: f64,
    num2: f64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: INITIAL_DISPLAY.to_string(),
            operator: None,
            decimal_used: false,
            error: None,
            num1: 0.0,
            num2: 0.0,
        }
    }

    /// Current display string
    #[must_use]
    pub fn display(&self) -> &str {
        &self.buffer
    }

    /// True while the sentinel is shown
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Cause of the current error state
    #[must_use]
    pub const fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Operator awaiting its right operand
    #[must_use]
    pub const fn pending_operator(&self) -> Option<BinaryOp> {
        self.operator
    }

    /// Whether the trailing operand already contains a decimal point
    #[must_use]
    pub const fn decimal_used(&self) -> bool {
        self.decimal_used
    }

    /// Last operands extracted from the buffer, `(num1, num2)`
    ///
    /// After a successful equals or function, `num1` holds the result.
    #[must_use]
    pub const fn operands(&self) -> (f64, f64) {
        (self.num1, self.num2)
    }

    /// Serializable view of the state
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.buffer.clone(),
            error: self.error.clone(),
            pending_operator: self.operator,
            decimal_used: self.decimal_used,
        }
    }

    /// Dispatches one key to its operation
    pub fn press(&mut self, key: Key) -> &str {
        trace!(%key, buffer = %self.buffer, "key pressed");
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Operator(op) => self.input_operator(op),
            Key::Decimal => self.input_decimal_point(),
            Key::Backspace => self.input_backspace(),
            Key::Clear => self.input_clear(),
            Key::ClearEntry => self.input_clear_entry(),
            Key::Equals => self.input_equals(),
            Key::SignToggle => self.input_sign_toggle(),
            Key::Function(f) => self.apply_unary(f),
        }
    }

    /// Appends a digit, replacing a lone trailing `0`
    pub fn input_digit(&mut self, digit: Digit) -> &str {
        self.recover();
        if self.trailing_segment() == "0" {
            self.buffer.pop();
        }
        self.buffer.push(digit.as_char());
        &self.buffer
    }

    /// Commits the display as the left operand and records `op`
    ///
    /// Pressing another operator before any right operand is typed swaps the
    /// pending operator in place. Once a right operand exists the display is
    /// no longer a single number and the press is a parse error.
    pub fn input_operator(&mut self, op: BinaryOp) -> &str {
        if !self.is_error() && self.operator.is_some() && self.trailing_segment().is_empty() {
            if let Some(idx) = self.buffer[..self.buffer.len() - 1].rfind(' ') {
                debug!(from = ?self.operator, to = ?op, "replacing pending operator");
                self.buffer.truncate(idx);
                self.push_operator(op);
                return &self.buffer;
            }
        }

        match parse_operand(&self.buffer) {
            Ok(value) => {
                self.num1 = value;
                self.push_operator(op);
                self.decimal_used = false;
                &self.buffer
            }
            Err(err) => self.fail(err),
        }
    }

    /// Appends a decimal point unless the trailing operand has one
    pub fn input_decimal_point(&mut self) -> &str {
        self.recover();
        if !self.decimal_used {
            self.buffer.push('.');
            self.decimal_used = true;
        }
        &self.buffer
    }

    /// Deletes the last character; on the sentinel acts as a soft clear
    pub fn input_backspace(&mut self) -> &str {
        if self.is_error() {
            self.reset();
        } else if self.buffer.chars().count() > 1 {
            self.buffer.pop();
            self.resync();
        } else {
            self.buffer = INITIAL_DISPLAY.to_string();
            self.resync();
        }
        &self.buffer
    }

    /// Resets every field to its construction value
    pub fn input_clear(&mut self) -> &str {
        self.reset();
        &self.buffer
    }

    /// Resets the operand being typed to `0`, keeping `a OP` if pending
    pub fn input_clear_entry(&mut self) -> &str {
        if self.is_error() {
            self.reset();
            return &self.buffer;
        }

        let keep = if self.operator.is_some() {
            self.buffer.rfind(' ').map(|idx| idx + 1)
        } else {
            None
        };
        match keep {
            Some(len) => {
                self.buffer.truncate(len);
                self.buffer.push('0');
            }
            None => self.buffer = INITIAL_DISPLAY.to_string(),
        }
        self.decimal_used = false;
        &self.buffer
    }

    /// Negates the trailing segment
    pub fn input_sign_toggle(&mut self) -> &str {
        let mut segments: Vec<String> = self.segments().into_iter().map(str::to_string).collect();
        let Some(last) = segments.last_mut() else {
            return &self.buffer;
        };

        match parse_operand(last) {
            Ok(value) => *last = format_number(-value),
            Err(err) => return self.fail(err),
        }
        self.buffer = segments.join(" ");
        self.resync();
        &self.buffer
    }

    /// Evaluates `a OP b`; any other shape is a silent no-op
    pub fn input_equals(&mut self) -> &str {
        let outcome = {
            let segments = self.segments();
            let &[left, symbol, right] = segments.as_slice() else {
                debug!(segments = segments.len(), "equals ignored: not `a OP b`");
                return &self.buffer;
            };
            debug!(left, symbol, right, "evaluating");
            Self::evaluate(left, symbol, right)
        };

        match outcome {
            Ok((num1, num2, result)) => {
                self.num2 = num2;
                debug!(num1, num2, result, "evaluated");
                self.commit_result(result);
                &self.buffer
            }
            Err(err) => self.fail(err),
        }
    }

    /// Applies a unary function to the whole display
    pub fn apply_unary(&mut self, function: UnaryFn) -> &str {
        match parse_operand(&self.buffer).and_then(|value| function.apply(value)) {
            Ok(result) => {
                debug!(%function, result, "function applied");
                self.commit_result(result);
                &self.buffer
            }
            Err(err) => self.fail(err),
        }
    }

    fn evaluate(left: &str, symbol: &str, right: &str) -> CalcResult<(f64, f64, f64)> {
        let num1 = parse_operand(left)?;
        let op = BinaryOp::from_symbol(symbol).ok_or_else(|| CalcError::parse(symbol))?;
        let num2 = parse_operand(right)?;
        let result = op.apply(num1, num2)?;
        Ok((num1, num2, result))
    }

    fn commit_result(&mut self, result: f64) {
        self.buffer = format_number(result);
        self.num1 = result;
        self.operator = None;
        self.resync();
    }

    fn push_operator(&mut self, op: BinaryOp) {
        self.operator = Some(op);
        self.buffer.push(' ');
        self.buffer.push_str(op.symbol());
        self.buffer.push(' ');
    }

    /// Enters the error state; an existing cause is kept
    fn fail(&mut self, err: CalcError) -> &str {
        if self.error.is_none() {
            debug!(cause = %err, buffer = %self.buffer, "entering error state");
            self.error = Some(err);
        }
        self.buffer = ERROR_SENTINEL.to_string();
        &self.buffer
    }

    fn recover(&mut self) {
        if self.is_error() {
            self.reset();
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    /// Text after the last space, or the whole buffer
    fn trailing_segment(&self) -> &str {
        match self.buffer.rfind(' ') {
            Some(idx) => &self.buffer[idx + 1..],
            None => &self.buffer,
        }
    }

    /// Space separated segments with trailing empty ones dropped
    fn segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.buffer.split(' ').collect();
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        segments
    }

    /// Re-derives the decimal flag and pending operator from the buffer
    fn resync(&mut self) {
        self.decimal_used = self.trailing_segment().contains('.');
        let mut parts = self.buffer.splitn(3, ' ');
        self.operator = match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(symbol), Some(_)) => BinaryOp::from_symbol(symbol),
            _ => None,
        };
    }
}
