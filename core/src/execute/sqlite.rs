//! [`QueryExecutor`] for `rusqlite::Connection`.

use std::sync::Arc;

use compact_str::CompactString;
use rusqlite::Connection;
use sieve_types::{Dialect, Value};

use super::{QueryExecutor, Row};
use crate::error::{Result, SieveError};
use crate::sql::Statement;

fn prepare<'c>(conn: &'c Connection, statement: &Statement) -> Result<rusqlite::Statement<'c>> {
    if statement.dialect != Dialect::SQLite {
        return Err(SieveError::Execution(format!(
            "rusqlite cannot execute a {} statement",
            statement.dialect
        )));
    }

    let mut stmt = conn.prepare(&statement.sql)?;
    for param in &statement.params {
        let placeholder = format!(":{}", param.name);
        let Some(index) = stmt.parameter_index(&placeholder)? else {
            return Err(SieveError::Execution(format!("unknown parameter {placeholder}")));
        };
        stmt.raw_bind_parameter(index, &param.value)?;
    }
    Ok(stmt)
}

impl QueryExecutor for Connection {
    fn fetch_rows(&self, statement: &Statement) -> Result<Vec<Row>> {
        let mut stmt = prepare(self, statement)?;
        let columns: Arc<[CompactString]> = stmt.column_names().into_iter().map(CompactString::from).collect();

        let mut rows = stmt.raw_query();
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..columns.len())
                .map(|i| row.get_ref(i).map(Value::from))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            out.push(Row::new(Arc::clone(&columns), values));
        }
        Ok(out)
    }

    fn fetch_count(&self, statement: &Statement) -> Result<u64> {
        let mut stmt = prepare(self, statement)?;
        let mut rows = stmt.raw_query();
        let count: i64 = match rows.next()? {
            Some(row) => row.get(0)?,
            None => 0,
        };
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
