use thiserror::Error;

use crate::request::ValidationError;

#[derive(Debug, Error)]
pub enum SieveError {
    /// A filter request failed strict validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error executing a compiled statement, passed through from the executor
    #[error("Execution error: {0}")]
    Execution(String),

    /// Error in schema or compile configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rusqlite specific errors
    #[cfg(feature = "rusqlite")]
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

/// Result type for sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;
