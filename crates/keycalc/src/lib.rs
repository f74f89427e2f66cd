//! keycalc - keystroke-driven calculator engine
//!
//! The engine keeps all of its state in one display buffer. Keys mutate the
//! buffer; equals and the unary functions parse it back. What you see is
//! exactly what gets evaluated.
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut session = Session::new();
//! let keys = parse_keys("5 + 3 = × 2 =").unwrap();
//! assert_eq!(session.press_all(keys), "16");
//! assert_eq!(session.tape().len(), 2);
//!
//! // Errors collapse to one sentinel but keep their cause
//! let mut engine = Engine::new();
//! for key in parse_keys("6 ÷ 0 =").unwrap() {
//!     engine.press(key);
//! }
//! assert_eq!(engine.display(), ERROR_SENTINEL);
//! assert_eq!(engine.error(), Some(&CalcError::DivisionByZero));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod keypad;
pub mod session;
pub mod tape;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::number::{format_number, parse_operand};
    pub use crate::core::{
        BinaryOp, CalcError, CalcResult, Engine, NonFinite, Snapshot, UnaryFn, ERROR_SENTINEL,
    };
    pub use crate::keypad::{parse_keys, Digit, Key, KeyParseError, Keypad, KeypadButton};
    pub use crate::session::Session;
    pub use crate::tape::{Tape, TapeEntry};
}
