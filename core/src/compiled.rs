//! The output of one compile.

use compact_str::CompactString;
use sieve_types::Dialect;

use crate::error::Result;
use crate::execute::{Page, QueryExecutor, Row};
use crate::param::ParamMap;
use crate::predicate::Predicate;
use crate::select::{Distinct, Join, OrderTerm, Select, Source};
use crate::sieve_trace_statement;
use crate::sql::{SQL, Statement, Token};

/// A compiled, executable query description.
///
/// Built fresh for every request and immutable once returned. The rows query
/// is always DISTINCT; the count query counts distinct root keys over the
/// same predicate and ignores ordering and pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub(crate) dialect: Dialect,
    pub(crate) from: Source,
    pub(crate) primary_key: CompactString,
    pub(crate) joins: Vec<Join>,
    pub(crate) predicate: Option<Predicate>,
    /// Output columns beyond the root row: synthetic sort columns, preloads.
    pub(crate) columns: Vec<SQL>,
    pub(crate) order_by: Vec<OrderTerm>,
    /// `(skip, take)`
    pub(crate) pagination: Option<(u64, u64)>,
    pub(crate) params: ParamMap,
}

impl CompiledQuery {
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The combined WHERE predicate, `None` when nothing restricts the rows.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn order_by(&self) -> &[OrderTerm] {
        &self.order_by
    }

    /// Every parameter generated by the compile, by name.
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub fn skip(&self) -> Option<u64> {
        self.pagination.map(|(skip, _)| skip)
    }

    pub fn take(&self) -> Option<u64> {
        self.pagination.map(|(_, take)| take)
    }

    fn base(&self) -> Select {
        let mut select = Select::new(self.from.clone()).filter(self.predicate.clone());
        select.joins = self.joins.clone();
        select
    }

    /// `SELECT DISTINCT root.*, extras ... ORDER BY ... LIMIT ... OFFSET ...`
    pub fn rows_select(&self) -> Select {
        let root = SQL::ident(self.from.alias()).push(Token::DOT).push(Token::STAR);
        let mut select = self.base().distinct(Distinct::All).column(root);
        select.columns.extend(self.columns.iter().cloned());
        select.order_by = self.order_by.clone();
        if let Some((skip, take)) = self.pagination {
            select = select.limit(take).offset(skip);
        }
        select
    }

    /// `SELECT COUNT(DISTINCT root.pk) AS total ...` over the same predicate.
    pub fn count_select(&self) -> Select {
        let key = SQL::qualified(self.from.alias(), &self.primary_key);
        let count = SQL::func("COUNT", SQL::token(Token::DISTINCT).append(key)).alias("total");
        self.base().column(count)
    }

    pub fn rows_statement(&self) -> Statement {
        let statement = self.rows_select().to_sql(self.dialect).render(self.dialect);
        sieve_trace_statement!("rows", statement);
        statement
    }

    pub fn count_statement(&self) -> Statement {
        let statement = self.count_select().to_sql(self.dialect).render(self.dialect);
        sieve_trace_statement!("count", statement);
        statement
    }

    /// Runs the count and rows statements.
    ///
    /// Executor errors are returned unchanged.
    pub fn execute<E>(&self, executor: &E) -> Result<Page<Row>>
    where
        E: QueryExecutor + ?Sized,
    {
        let total = executor.fetch_count(&self.count_statement())?;
        let data = executor.fetch_rows(&self.rows_statement())?;
        Ok(Page::new(data, total, self.pagination))
    }
}

#[cfg(test)]
mod tests {
    use crate::compile::test_support::user;
    use crate::prelude::*;

    #[test]
    fn count_ignores_order_and_pagination() {
        let compiler = Compiler::new(
            SchemaRegistry::new().with(user()),
            CompileOptions::new(Dialect::SQLite).parent_scope(false),
        );
        let request = FilterRequest::new()
            .filter_by("status", ["active"])
            .sort_by("meta.rank", "desc")
            .paginate(3, 20);
        let query = compiler.compile_for("user", &request, Some("4")).unwrap();

        assert_eq!(query.skip(), Some(40));
        assert_eq!(query.take(), Some(20));
        assert_eq!(
            query.rows_statement().sql,
            concat!(
                r#"SELECT DISTINCT "t0".*, json_extract("t0"."meta", '$.rank') AS "sort_0" FROM "users" AS "t0" "#,
                r#"WHERE "t0"."app_id" = :tenant_0_1 AND "t0"."deleted_at" IS NULL AND "t0"."status" IN (:filter_0_2) "#,
                r#"ORDER BY "sort_0" DESC LIMIT 20 OFFSET 40"#
            )
        );
        assert_eq!(
            query.count_statement().sql,
            concat!(
                r#"SELECT COUNT(DISTINCT "t0"."id") AS "total" FROM "users" AS "t0" "#,
                r#"WHERE "t0"."app_id" = :tenant_0_1 AND "t0"."deleted_at" IS NULL AND "t0"."status" IN (:filter_0_2)"#
            )
        );
        assert_eq!(query.params().len(), 2);
    }

    #[test]
    fn mysql_uses_positional_placeholders() {
        let compiler = Compiler::new(
            SchemaRegistry::new().with(user()),
            CompileOptions::new(Dialect::MySQL).parent_scope(true),
        );
        let request = FilterRequest::new().filter_by("status", ["a", "b"]);
        let stmt = compiler.compile_for("user", &request, Some("4")).unwrap().rows_statement();
        assert_eq!(stmt.sql.matches('?').count(), 4);
        let values: Vec<_> = stmt.values().cloned().collect();
        assert_eq!(values, vec![Value::from("4"), Value::from("4"), Value::from("a"), Value::from("b")]);
    }
}
