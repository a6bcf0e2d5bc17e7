//! CLI command implementations
//!
//! Each command module implements one sieve subcommand.

pub mod check;
pub mod compile;
pub mod query;

use std::io::Read;
use std::path::Path;

use sieve_core::FilterRequest;

use crate::error::CliError;

/// Reads a JSON filter request from `path`, or stdin when `path` is `-`.
pub fn read_request(path: &Path) -> Result<FilterRequest, CliError> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::IoError(e.to_string()))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| CliError::IoError(format!("{}: {e}", path.display())))?
    };
    serde_json::from_str(&content).map_err(|e| CliError::InvalidRequest(e.to_string()))
}

/// Checks `request` when `strict` is set.
pub fn check_request(request: &FilterRequest, strict: bool) -> Result<(), CliError> {
    if strict {
        request.validate().map_err(sieve_core::SieveError::from)?;
    }
    Ok(())
}
