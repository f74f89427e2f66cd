//! Error types for the CLI

use keycalc::keypad::KeyParseError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
///
/// Calculator failures are not here: the engine shows them as the error
/// sentinel and the shell reports that as ordinary output.
#[derive(Debug, Error)]
pub enum CliError {
    /// A token named no key
    #[error("Invalid key: {0}")]
    InvalidKey(#[from] KeyParseError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
