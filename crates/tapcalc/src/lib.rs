//! Keypad calculator engine.
//!
//! This crate implements the non-presentation core of a button-driven
//! calculator: the expression entry state machine, the four-function infix
//! evaluator behind the `=` key, and the result display formatter. A
//! presentation layer (screen, keypad, styling) is expected to live
//! elsewhere; it sends one button label per tap and renders the two display
//! strings it gets back.
//!
//! # Example
//!
//! ```rust
//! use tapcalc::prelude::*;
//!
//! let mut engine = CalcEngine::new();
//! for label in ["7", "+", "5", "="] {
//!     engine.press(Key::from_label(label).unwrap());
//! }
//! assert_eq!(engine.result(), "12");
//!
//! // Faults collapse to a single display value and leave the
//! // expression editable.
//! let readout = engine.press_label("1").unwrap();
//! assert_eq!(readout.expression, "1");
//! ```

// Allow common test patterns in this crate
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
pub mod engine;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::evaluator::{evaluate, evaluate_str};
    pub use crate::core::format::format_value;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{BinOp, CalcError, CalcResult};
    pub use crate::engine::{CalcEngine, Key, Readout};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let value = evaluate_str("2+3").unwrap();
        assert_eq!(value, 5.0);
    }

    #[test]
    fn test_engine_direct() {
        let mut engine = CalcEngine::new();
        engine.press(Key::Digit(6));
        engine.press(Key::Op(BinOp::Multiply));
        engine.press(Key::Digit(7));
        let readout = engine.press(Key::Equals);
        assert_eq!(readout.result, "42");
    }

    #[test]
    fn test_error_collapse() {
        let mut engine = CalcEngine::new();
        for label in ["1", "/", "0", "="] {
            engine.press_label(label).unwrap();
        }
        assert_eq!(engine.result(), "Error");
        // The rejected expression stays editable.
        assert_eq!(engine.expression(), "1/0");
    }

    #[test]
    fn test_formatter_direct() {
        assert_eq!(format_value(1.5e15).unwrap(), "1.5e15");
        assert_eq!(format_value(3.5).unwrap(), "3.5");
    }

    #[test]
    fn test_history_tracking() {
        let mut engine = CalcEngine::new();
        for label in ["8", "/", "2", "="] {
            engine.press_label(label).unwrap();
        }
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history().last().unwrap().display(), "8/2 = 4");
    }
}
