//! Keypad engine: the expression entry state machine.
//!
//! One engine instance owns the expression buffer, the result display, the
//! pending-operation memory behind repeated `=`, and the evaluation
//! history. The presentation layer feeds one [`Key`] per button press and
//! renders the [`Readout`] it gets back; nothing here draws anything.

use tracing::debug;

use crate::core::evaluator;
use crate::core::format::format_value;
use crate::core::history::History;
use crate::core::{BinOp, CalcError};

/// Result display before any evaluation, and after clearing.
const ZERO: &str = "0";
/// Result display for any collapsed fault.
const ERROR: &str = "Error";

/// One discrete button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Digit key `0`-`9`
    Digit(u8),
    /// Decimal point key
    Decimal,
    /// Binary operator key
    Op(BinOp),
    /// Evaluate key (`=`)
    Equals,
    /// All-clear key (`AC`)
    Clear,
    /// Backspace key (`C`)
    Backspace,
}

impl Key {
    /// Parses a key from its button label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "AC" => Some(Self::Clear),
            "C" => Some(Self::Backspace),
            _ => {
                let mut chars = label.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Self::from_char(ch)
            }
        }
    }

    /// Parses a key from a single keypad character.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        if let Some(digit) = ch.to_digit(10) {
            return Some(Self::Digit(digit as u8));
        }
        match ch {
            '.' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            _ => BinOp::from_char(ch).map(Self::Op),
        }
    }

    /// Returns the button label for this key.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(digit) => digit.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Op(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Backspace => "C".to_string(),
        }
    }
}

/// The two display strings handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    /// Expression display; an empty buffer renders as `"0"`
    pub expression: String,
    /// Result display
    pub result: String,
}

/// Memorized operation reapplied by a bare `=`.
#[derive(Debug, Clone, PartialEq)]
struct PendingOp {
    op: BinOp,
    operand: String,
}

/// The calculator state machine.
///
/// All state is created at session start (empty expression, `"0"` result)
/// and mutated one key at a time; every [`press`](Self::press) runs to
/// completion before the next event is seen.
#[derive(Debug)]
pub struct CalcEngine {
    expression: String,
    result: String,
    pending: Option<PendingOp>,
    history: History,
}

impl Default for CalcEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalcEngine {
    /// Creates an engine with an empty expression and a `"0"` result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expression: String::new(),
            result: ZERO.to_string(),
            pending: None,
            history: History::new(),
        }
    }

    /// Raw expression buffer (may be empty).
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Expression display; an empty buffer renders as `"0"`.
    #[must_use]
    pub fn expression_display(&self) -> &str {
        if self.expression.is_empty() {
            ZERO
        } else {
            &self.expression
        }
    }

    /// Result display.
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Recorded successful evaluations.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current displays as a [`Readout`].
    #[must_use]
    pub fn readout(&self) -> Readout {
        Readout {
            expression: self.expression_display().to_string(),
            result: self.result.clone(),
        }
    }

    /// Applies one button press and returns the updated displays.
    pub fn press(&mut self, key: Key) -> Readout {
        match key {
            Key::Clear => self.on_clear(),
            Key::Backspace => self.on_backspace(),
            Key::Equals => self.on_equals(),
            Key::Decimal => {
                self.pending = None;
                self.on_decimal();
            }
            Key::Op(op) => {
                self.pending = None;
                self.on_operator(op);
            }
            Key::Digit(digit) => {
                self.pending = None;
                self.on_digit(digit);
            }
        }
        self.readout()
    }

    /// Applies a button by its label.
    ///
    /// Unknown labels leave the state untouched and return `None`.
    pub fn press_label(&mut self, label: &str) -> Option<Readout> {
        Key::from_label(label).map(|key| self.press(key))
    }

    fn on_clear(&mut self) {
        self.expression.clear();
        self.result = ZERO.to_string();
        self.pending = None;
    }

    fn on_backspace(&mut self) {
        if self.expression.pop().is_some() && self.expression.is_empty() {
            self.result = ZERO.to_string();
        }
    }

    fn on_equals(&mut self) {
        if self.expression.is_empty() {
            let Some(pending) = self.pending.take() else {
                return;
            };
            // Reapply the memorized operation to the current result.
            self.expression = format!("{}{}{}", self.result, pending.op.symbol(), pending.operand);
        }
        self.evaluate_expression();
    }

    fn on_decimal(&mut self) {
        if self.current_operand().contains('.') {
            return;
        }
        if self.expression.is_empty() || ends_with_operator(&self.expression) {
            // Keep the operand well-formed: ".5" becomes "0.5".
            self.expression.push_str("0.");
        } else {
            self.expression.push('.');
        }
    }

    fn on_operator(&mut self, op: BinOp) {
        if self.expression.is_empty() {
            if self.is_chainable_result() {
                self.expression = format!("{}{}", self.result, op.symbol());
            } else if op == BinOp::Subtract {
                self.expression.push('-');
            }
            return;
        }

        let run = trailing_operator_run(&self.expression);
        if run == 0 {
            self.expression.push(op.symbol());
            return;
        }

        if op == BinOp::Subtract {
            // One sign per operand: "3+" takes a '-', "3+-" takes no more.
            if run == 1 {
                self.expression.push('-');
            }
            return;
        }

        // Collapse the whole trailing run so no "+*" pair survives.
        self.expression.truncate(self.expression.len() - run);
        if self.expression.is_empty() {
            self.on_operator(op);
        } else {
            self.expression.push(op.symbol());
        }
    }

    fn on_digit(&mut self, digit: u8) {
        if let Some(ch) = char::from_digit(u32::from(digit), 10) {
            self.expression.push(ch);
        }
    }

    /// Evaluates the buffer, collapsing every fault to the `"Error"` display.
    ///
    /// On success the buffer is cleared and the pending operation captured,
    /// which is what makes chaining and repeated `=` reachable. A fault
    /// leaves the buffer untouched so the user can keep editing.
    fn evaluate_expression(&mut self) {
        let sanitized = sanitize(&self.expression).to_string();
        let evaluated = if sanitized.is_empty() {
            Err(CalcError::EmptyExpression)
        } else {
            evaluator::evaluate_str(&sanitized)
        };

        match evaluated.and_then(|value| format_value(value).map(|text| (value, text))) {
            Ok((value, text)) => {
                debug!(expression = %self.expression, value, "expression evaluated");
                self.history.record(&self.expression, value);
                self.pending = split_pending(&self.expression);
                self.result = text;
                self.expression.clear();
            }
            Err(fault) => {
                debug!(expression = %self.expression, %fault, "expression rejected");
                self.pending = None;
                self.result = ERROR.to_string();
            }
        }
    }

    /// True when the result can seed a new expression (chaining).
    fn is_chainable_result(&self) -> bool {
        self.result != ZERO && self.result != ERROR
    }

    /// The operand run being typed: everything after the last operator.
    fn current_operand(&self) -> &str {
        match self.expression.rfind(is_operator_char) {
            Some(idx) => &self.expression[idx + 1..],
            None => &self.expression,
        }
    }
}

fn is_operator_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/')
}

fn ends_with_operator(expr: &str) -> bool {
    expr.chars().last().is_some_and(is_operator_char)
}

/// Number of operator characters at the end of the buffer.
fn trailing_operator_run(expr: &str) -> usize {
    expr.chars().rev().take_while(|&ch| is_operator_char(ch)).count()
}

/// Drops trailing whitespace and one dangling `+`, `*`, or `/`.
///
/// A trailing `-` is kept: it may be the sign of an operand that was never
/// typed, and the parser rejects it rather than guessing.
fn sanitize(expr: &str) -> &str {
    let trimmed = expr.trim_end();
    match trimmed.chars().last() {
        Some('+' | '*' | '/') => &trimmed[..trimmed.len() - 1],
        _ => trimmed,
    }
}

/// Finds the last binary operator and the operand text after it.
///
/// Walks the buffer from the end; an operator whose predecessor is itself
/// an operator - or which starts the buffer - is a unary sign, not a
/// binary operator. An operator with nothing after it yields no pair.
fn split_pending(expr: &str) -> Option<PendingOp> {
    let bytes = expr.as_bytes();
    for idx in (1..bytes.len()).rev() {
        let ch = bytes[idx] as char;
        if is_operator_char(ch) && !is_operator_char(bytes[idx - 1] as char) {
            let operand = &expr[idx + 1..];
            if operand.is_empty() {
                return None;
            }
            let op = BinOp::from_char(ch)?;
            return Some(PendingOp {
                op,
                operand: operand.to_string(),
            });
        }
    }
    None
}
