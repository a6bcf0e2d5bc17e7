//! Error types for the CLI

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Request file is not a valid filter request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Entity missing from the registry
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// Compile or execution error
    #[error(transparent)]
    Sieve(#[from] sieve_core::SieveError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
