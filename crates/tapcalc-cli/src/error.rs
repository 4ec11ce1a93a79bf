//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Button label that matches no key
    #[error("unknown key: '{label}'")]
    UnknownKey {
        /// The label that failed to parse
        label: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an unknown-key error
    #[must_use]
    pub fn unknown_key(label: impl Into<String>) -> Self {
        Self::UnknownKey {
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_error() {
        let err = CliError::unknown_key("banana");
        assert!(err.to_string().contains("unknown key"));
        assert!(err.to_string().contains("banana"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
