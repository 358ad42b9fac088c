//! Error types for `stompguard`

use stompguard_protocol::{CommandError, ConstraintError};
use thiserror::Error;

/// Main error type for `stompguard` operations
#[derive(Error, Debug)]
pub enum GuardError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame rejected by a constraint check
    #[error("Frame rejected: {0}")]
    Constraint(#[from] ConstraintError),

    /// Unrecognized frame metadata
    #[error("Protocol error: {0}")]
    Protocol(#[from] CommandError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GuardError>;

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::Serialization(err.to_string())
    }
}
