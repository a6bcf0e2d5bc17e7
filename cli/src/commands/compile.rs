//! Compile command - prints the rows and count statements for a request

use std::path::Path;

use clap::ValueEnum;
use sieve_core::Statement;
use sieve_types::Dialect;

use crate::commands::{check_request, read_request};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub struct Args<'a> {
    pub entity: &'a str,
    pub request: &'a Path,
    pub tenant: Option<&'a str>,
    pub dialect: Option<Dialect>,
    pub strict: bool,
    pub format: Format,
}

pub fn run(config: &Config, args: Args<'_>) -> Result<(), CliError> {
    let request = read_request(args.request)?;
    check_request(&request, args.strict)?;

    let query = config
        .compiler(args.dialect)
        .compile_for(args.entity, &request, args.tenant)
        .ok_or_else(|| CliError::UnknownEntity(args.entity.to_string()))?;
    let rows = query.rows_statement();
    let count = query.count_statement();

    match args.format {
        Format::Text => {
            print_statement("Rows", &rows);
            println!();
            print_statement("Count", &count);
        }
        Format::Json => {
            let doc = serde_json::json!({
                "dialect": query.dialect().as_str(),
                "rows": statement_json(&rows),
                "count": statement_json(&count),
            });
            let text = serde_json::to_string_pretty(&doc).map_err(|e| CliError::Other(e.to_string()))?;
            println!("{text}");
        }
    }
    Ok(())
}

fn print_statement(title: &str, statement: &Statement) {
    println!("{}", output::heading(title));
    println!("  {}", statement.sql);
    if statement.params.is_empty() {
        println!("  {}", output::muted("(no parameters)"));
    }
    for param in &statement.params {
        println!("  {} = {}", output::label(&param.name), param.value);
    }
}

fn statement_json(statement: &Statement) -> serde_json::Value {
    let params: Vec<_> = statement
        .params
        .iter()
        .map(|p| serde_json::json!({ "name": p.name.as_str(), "value": p.value }))
        .collect();
    serde_json::json!({ "sql": statement.sql, "params": params })
}
