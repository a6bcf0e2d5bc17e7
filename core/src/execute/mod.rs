//! Executor contract.
//!
//! The compiler performs no I/O. Anything that can run a [`Statement`] and
//! return rows and a count can execute a [`CompiledQuery`].
//!
//! [`CompiledQuery`]: crate::CompiledQuery

#[cfg(feature = "rusqlite")]
mod sqlite;

use std::sync::Arc;

use compact_str::CompactString;
use serde::Serialize;
use serde::ser::SerializeMap;
use sieve_types::Value;

use crate::error::Result;
use crate::sql::Statement;

/// Runs rendered statements against a connection.
pub trait QueryExecutor {
    /// Executes a rows statement.
    fn fetch_rows(&self, statement: &Statement) -> Result<Vec<Row>>;

    /// Executes a count statement, returning its single integer result.
    fn fetch_count(&self, statement: &Statement) -> Result<u64>;
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    fn fetch_rows(&self, statement: &Statement) -> Result<Vec<Row>> {
        (**self).fetch_rows(statement)
    }

    fn fetch_count(&self, statement: &Statement) -> Result<u64> {
        (**self).fetch_count(statement)
    }
}

/// One result row. Column names are shared by every row of a result.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[CompactString]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[CompactString]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[CompactString] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values.get(index)
    }
}

impl Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.columns.iter().zip(&self.values) {
            map.serialize_entry(column.as_str(), value)?;
        }
        map.end()
    }
}

/// A page of results with the size of the full matching set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Matching rows before pagination.
    pub total: u64,
    pub total_page: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u64>,
}

impl<T> Page<T> {
    /// `pagination` is `(skip, take)` as produced by the compiler.
    pub fn new(data: Vec<T>, total: u64, pagination: Option<(u64, u64)>) -> Self {
        match pagination {
            Some((skip, take)) => Self {
                data,
                total,
                total_page: total.div_ceil(take),
                page: Some(skip / take + 1),
                per_page: Some(take),
            },
            None => Self {
                data,
                total,
                total_page: u64::from(total > 0),
                page: None,
                per_page: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_math() {
        let page = Page::new(vec![(); 10], 25, Some((10, 10)));
        assert_eq!(page.total_page, 3);
        assert_eq!(page.page, Some(2));

        let page: Page<()> = Page::new(Vec::new(), 0, None);
        assert_eq!(page.total_page, 0);
        let page = Page::new(vec![()], 1, None);
        assert_eq!(page.total_page, 1);
    }

    #[test]
    fn rows_serialize_as_objects() {
        let columns: Arc<[CompactString]> = Arc::from(vec![CompactString::from("id"), CompactString::from("name")]);
        let row = Row::new(columns, vec![Value::Integer(1), Value::from("a")]);
        assert_eq!(row.get("name"), Some(&Value::from("a")));
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({"id": 1, "name": "a"})
        );
    }
}
