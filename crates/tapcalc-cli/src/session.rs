//! Session layer: applies label lines to one engine and renders readouts.

use console::style;
use tapcalc::prelude::*;

use crate::error::{CliError, CliResult};

/// One interactive calculator session.
#[derive(Debug)]
pub struct Session {
    engine: CalcEngine,
    color: bool,
}

impl Session {
    /// Creates a session; `color` enables styled rendering.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            engine: CalcEngine::new(),
            color,
        }
    }

    /// Applies whitespace-separated button labels.
    ///
    /// Stops at the first unknown label; keys before it are already
    /// applied, keys after it are not.
    pub fn apply_line(&mut self, line: &str) -> CliResult<()> {
        for label in line.split_whitespace() {
            if self.engine.press_label(label).is_none() {
                return Err(CliError::unknown_key(label));
            }
        }
        Ok(())
    }

    /// Renders the current readout as two lines.
    #[must_use]
    pub fn render(&self) -> String {
        let readout = self.engine.readout();
        let result = if self.color && readout.result == "Error" {
            style(readout.result.as_str()).red().bold().to_string()
        } else {
            readout.result
        };
        format!("expr   {}\nresult {result}", readout.expression)
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &CalcEngine {
        &self.engine
    }
}
