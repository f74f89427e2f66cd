//! Keys and the keypad layout
//!
//! A [`Key`] is one discrete input event for the engine. Keys can be built
//! directly, parsed from tokens (`"7"`, `"×"`, `"CE"`, `"sqrt"`), or looked up
//! on the [`Keypad`] by label.

use crate::core::{BinaryOp, UnaryFn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Creates a digit, or `None` when `value > 9`
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Character written into the display
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<u8> for Digit {
    type Error = KeyParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(KeyParseError::DigitOutOfRange(value))
    }
}

impl TryFrom<char> for Digit {
    type Error = KeyParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .and_then(|d| Self::new(d as u8))
            .ok_or_else(|| KeyParseError::Unknown(c.to_string()))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

/// Errors produced while turning text into keys
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    /// Token names no key
    #[error("Unknown key: {0:?}")]
    Unknown(String),
    /// Numeric digit outside 0-9
    #[error("Digit out of range: {0}")]
    DigitOutOfRange(u8),
}

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum Key {
    /// Digit entry
    Digit(Digit),
    /// Binary operator
    Operator(BinaryOp),
    /// Decimal point
    Decimal,
    /// Delete the last character
    Backspace,
    /// Full reset
    Clear,
    /// Reset the operand being typed
    ClearEntry,
    /// Evaluate `a OP b`
    Equals,
    /// Negate the trailing operand
    SignToggle,
    /// Apply a unary function to the display
    Function(UnaryFn),
}

impl Key {
    /// Label as printed on the keypad
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_LABELS[d.value() as usize],
            Self::Operator(op) => op.symbol(),
            Self::Decimal => ".",
            Self::Backspace => "←",
            Self::Clear => "C",
            Self::ClearEntry => "CE",
            Self::Equals => "=",
            Self::SignToggle => "+/-",
            Self::Function(f) => f.label(),
        }
    }

    /// Extra token spellings accepted besides the label (lowercase)
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Digit(_)
            | Self::Decimal
            | Self::Equals
            | Self::Operator(BinaryOp::Add | BinaryOp::Subtract) => &[],
            Self::Operator(BinaryOp::Multiply) => &["*", "x"],
            Self::Operator(BinaryOp::Divide) => &["/"],
            Self::Backspace => &["<-", "bs", "backspace"],
            Self::Clear => &["c", "clear"],
            Self::ClearEntry => &["ce"],
            Self::SignToggle => &["±", "neg"],
            Self::Function(UnaryFn::Reciprocal) => &["recip"],
            Self::Function(UnaryFn::Square) => &["sq", "x^2"],
            Self::Function(UnaryFn::SquareRoot) => &["sqrt"],
        }
    }

    /// Parses a single character key (digits, operators, `.`, `=`, `←`, `c`)
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if let Ok(digit) = Digit::try_from(c) {
            return Some(Self::Digit(digit));
        }
        match c {
            '+' => Some(Self::Operator(BinaryOp::Add)),
            '-' => Some(Self::Operator(BinaryOp::Subtract)),
            '*' | 'x' | '×' => Some(Self::Operator(BinaryOp::Multiply)),
            '/' | '÷' => Some(Self::Operator(BinaryOp::Divide)),
            '.' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            '←' => Some(Self::Backspace),
            'c' | 'C' => Some(Self::Clear),
            '±' => Some(Self::SignToggle),
            '√' => Some(Self::Function(UnaryFn::SquareRoot)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Digit> for Key {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl From<BinaryOp> for Key {
    fn from(op: BinaryOp) -> Self {
        Self::Operator(op)
    }
}

impl From<UnaryFn> for Key {
    fn from(f: UnaryFn) -> Self {
        Self::Function(f)
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c).ok_or_else(|| KeyParseError::Unknown(token.to_string()));
        }

        let lowered = token.to_lowercase();
        Keypad::all_keys()
            .into_iter()
            .find(|key| key.label() == token || key.aliases().contains(&lowered.as_str()))
            .ok_or_else(|| KeyParseError::Unknown(token.to_string()))
    }
}

/// Parses a whitespace separated key script
///
/// Each token is first tried as a whole key (`CE`, `sqrt`, `1/x`); otherwise
/// every character must be a key on its own, so `12.5` and `5+3=` expand to
/// one key per character.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyParseError> {
    let mut keys = Vec::new();
    for token in input.split_whitespace() {
        if let Ok(key) = token.parse::<Key>() {
            keys.push(key);
            continue;
        }
        for c in token.chars() {
            let key = Key::from_char(c).ok_or_else(|| KeyParseError::Unknown(token.to_string()))?;
            keys.push(key);
        }
    }
    Ok(keys)
}

/// A single keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// Row in the grid
    pub row: usize,
    /// Column in the grid
    pub col: usize,
    /// The key this button sends
    pub key: Key,
}

impl KeypadButton {
    /// Label printed on the button
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.key.label()
    }
}

/// The keypad layout - a 5x4 grid of buttons plus a function selector
/// ```text
/// [ ← ] [ CE  ] [ C ] [ ÷ ]
/// [ 7 ] [  8  ] [ 9 ] [ × ]
/// [ 4 ] [  5  ] [ 6 ] [ - ]
/// [ 1 ] [  2  ] [ 3 ] [ + ]
/// [ 0 ] [ +/- ] [ . ] [ = ]
///
/// functions: 1/x  x²  √
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    /// Function selector entries
    functions: Vec<Key>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        use BinaryOp::{Add, Divide, Multiply, Subtract};

        let digit = |d: u8| Key::Digit(Digit(d));
        let grid = [
            [Key::Backspace, Key::ClearEntry, Key::Clear, Key::Operator(Divide)],
            [digit(7), digit(8), digit(9), Key::Operator(Multiply)],
            [digit(4), digit(5), digit(6), Key::Operator(Subtract)],
            [digit(1), digit(2), digit(3), Key::Operator(Add)],
            [digit(0), Key::SignToggle, Key::Decimal, Key::Equals],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, keys)| {
                keys.iter()
                    .enumerate()
                    .map(move |(col, &key)| KeypadButton { row, col, key })
            })
            .collect();

        Self {
            buttons,
            functions: UnaryFn::ALL.iter().copied().map(Key::Function).collect(),
            cols: 4,
            rows: 5,
        }
    }

    /// Every distinct key the engine understands
    #[must_use]
    pub fn all_keys() -> Vec<Key> {
        let keypad = Self::new();
        keypad
            .buttons
            .iter()
            .map(|b| b.key)
            .chain(keypad.functions.iter().copied())
            .collect()
    }

    /// Returns the number of grid buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds the key carrying a label, grid first then functions
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<Key> {
        self.buttons
            .iter()
            .map(|b| b.key)
            .chain(self.functions.iter().copied())
            .find(|key| key.label() == label)
    }

    /// Iterates over the grid rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[KeypadButton]> {
        self.buttons.chunks(self.cols)
    }

    /// Returns an iterator over all grid buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Function selector entries
    #[must_use]
    pub fn functions(&self) -> &[Key] {
        &self.functions
    }
}
