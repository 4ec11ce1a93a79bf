//! Bounded history of successful evaluations.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::format::format_value;

/// A single recorded evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression text that was evaluated
    pub expression: String,
    /// The numeric value it produced
    pub value: f64,
}

impl HistoryEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(expression: impl Into<String>, value: f64) -> Self {
        Self {
            expression: expression.into(),
            value,
        }
    }

    /// Renders `expression = result` using the display formatter.
    #[must_use]
    pub fn display(&self) -> String {
        let result = format_value(self.value).unwrap_or_else(|_| "Error".to_string());
        format!("{} = {}", self.expression, result)
    }
}

/// Bounded FIFO of evaluations, oldest first.
///
/// The engine records every successful `=`; the bound keeps a long
/// interactive session from growing without limit.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a history with the default bound
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    /// Creates a history with a custom bound
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Appends an entry, evicting the oldest when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records an evaluation
    pub fn record(&mut self, expression: &str, value: f64) {
        self.push(HistoryEntry::new(expression, value));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no evaluations have been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Iterates newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the entry at `index` (0 = oldest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Serializes the entries to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries.iter().collect::<Vec<_>>())
    }

    /// Restores a history from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        let mut history = Self::new();
        for entry in entries {
            history.push(entry);
        }
        Ok(history)
    }
}
