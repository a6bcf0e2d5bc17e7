//! Query command - runs a request against a SQLite database

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use sieve_types::Dialect;

use crate::commands::{check_request, read_request};
use crate::config::Config;
use crate::error::CliError;

pub struct Args<'a> {
    pub entity: &'a str,
    pub request: &'a Path,
    pub database: &'a Path,
    pub tenant: Option<&'a str>,
    pub strict: bool,
}

/// Prints the page envelope as JSON.
pub fn run(config: &Config, args: Args<'_>) -> Result<(), CliError> {
    let request = read_request(args.request)?;
    check_request(&request, args.strict)?;

    let conn = Connection::open_with_flags(args.database, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| CliError::IoError(format!("{}: {e}", args.database.display())))?;

    let page = config
        .compiler(Some(Dialect::SQLite))
        .compile_for(args.entity, &request, args.tenant)
        .ok_or_else(|| CliError::UnknownEntity(args.entity.to_string()))?
        .execute(&conn)?;

    let text = serde_json::to_string_pretty(&page).map_err(|e| CliError::Other(e.to_string()))?;
    println!("{text}");
    Ok(())
}
