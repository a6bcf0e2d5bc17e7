//! Representative row per group.
//!
//! A subquery over the same table picks one primary key per distinct
//! `group_by` combination: the row with the MAX (or MIN) `group_sort_by`,
//! NULLs last, primary key as tie-breaker. The root key must be among the
//! winners.
//!
//! PostgreSQL picks winners with `DISTINCT ON`; SQLite and MySQL number the
//! rows of each partition with `ROW_NUMBER()` and keep the first.

use compact_str::format_compact;

use super::{Scope, tenant};
use crate::expr::{in_subquery, path_ref};
use crate::param::ParamBinder;
use crate::path::FieldPath;
use crate::predicate::{CompareOp, Predicate};
use crate::request::FilterRequest;
use crate::select::{Distinct, OrderTerm, Select, Source};
use crate::sieve_trace_skip;
use crate::sql::{SQL, Token};

const AXIS: &str = "group";

pub(super) fn compile(scope: &Scope<'_>, binder: &mut ParamBinder, request: &FilterRequest) -> Option<Predicate> {
    let (Some(sort_field), Some(group_sort)) = (request.group_sort_by.as_deref(), request.group_sort) else {
        return None;
    };
    if request.group_by.is_empty() {
        return None;
    }

    let mut keys = Vec::with_capacity(request.group_by.len());
    for field in &request.group_by {
        let Some(path) = FieldPath::root(field) else {
            sieve_trace_skip!(AXIS, field, "invalid group key; grouping disabled");
            return None;
        };
        keys.push(path);
    }
    let Some(sort_path) = FieldPath::root(sort_field) else {
        sieve_trace_skip!(AXIS, sort_field, "invalid group sort field");
        return None;
    };

    let entity = scope.entity;
    let dialect = scope.dialect();
    let alias = format_compact!("{}_g", scope.alias());
    let primary_key = SQL::qualified(&alias, &entity.primary_key);

    let keys: Vec<SQL> = keys.iter().map(|k| path_ref(dialect, &alias, k)).collect();
    let sort_expr = path_ref(dialect, &alias, &sort_path);
    let winner_order = [
        OrderTerm::asc(sort_expr.clone().push(Token::IS).push(Token::NULL)),
        OrderTerm {
            expr: sort_expr,
            direction: group_sort.direction(),
        },
        OrderTerm::asc(primary_key.clone()),
    ];

    let source = Source::table(entity.schema.as_deref(), &entity.table, &alias);
    let scoped = tenant::scope_predicate(scope, binder, &alias, 2);

    let winners = if dialect.supports_distinct_on() {
        let mut select = Select::new(source)
            .distinct(Distinct::On(keys.clone()))
            .column(primary_key)
            .filter(scoped);
        select.order_by = keys.into_iter().map(OrderTerm::asc).collect();
        select.order_by.extend(winner_order);
        select
    } else {
        let ranked_alias = format_compact!("{}_w", scope.alias());
        let row_number = SQL::raw("ROW_NUMBER")
            .push(Token::LPAREN)
            .push(Token::RPAREN)
            .push(Token::OVER)
            .append(window(keys, &winner_order).parens())
            .alias("rn");
        let ranked = Select::new(source)
            .column(primary_key.alias(entity.primary_key.clone()))
            .column(row_number)
            .filter(scoped);
        Select::new(Source::Derived {
            select: Box::new(ranked),
            alias: ranked_alias.clone(),
        })
        .column(SQL::qualified(&ranked_alias, &entity.primary_key))
        .filter(Some(Predicate::Compare {
            expr: SQL::qualified(&ranked_alias, "rn"),
            op: CompareOp::Eq,
            rhs: SQL::number(1),
        }))
    };

    Some(in_subquery(SQL::qualified(scope.alias(), &entity.primary_key), winners))
}

/// `PARTITION BY keys ORDER BY terms`
fn window(keys: Vec<SQL>, order: &[OrderTerm]) -> SQL {
    SQL::token(Token::PARTITION)
        .push(Token::BY)
        .append(SQL::join(keys, Token::COMMA))
        .push(Token::ORDER)
        .push(Token::BY)
        .append(SQL::join(order.iter().map(OrderTerm::to_sql), Token::COMMA))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::test_support::{options, user};
    use crate::request::GroupSort;
    use sieve_types::Dialect;

    fn compile_sql(dialect: Dialect, request: &FilterRequest) -> Option<String> {
        let entity = user();
        let options = options(dialect);
        let scope = Scope { entity: &entity, options: &options, tenant: "1", parent: None };
        compile(&scope, &mut ParamBinder::new(), request).map(|p| p.to_sql(dialect).render(dialect).sql)
    }

    #[test]
    fn postgres_uses_distinct_on() {
        let request = FilterRequest::new().group_by(["category"], "price", GroupSort::Max);
        assert_eq!(
            compile_sql(Dialect::PostgreSQL, &request).unwrap(),
            concat!(
                r#""t0"."id" IN (SELECT DISTINCT ON ("t0_g"."category") "t0_g"."id" FROM "users" AS "t0_g" "#,
                r#"WHERE "t0_g"."app_id" = $1 AND "t0_g"."deleted_at" IS NULL "#,
                r#"ORDER BY "t0_g"."category" ASC, "t0_g"."price" IS NULL ASC, "t0_g"."price" DESC, "t0_g"."id" ASC)"#
            )
        );
    }

    #[test]
    fn sqlite_uses_row_number() {
        let request = FilterRequest::new().group_by(["category", "brand"], "price", GroupSort::Min);
        assert_eq!(
            compile_sql(Dialect::SQLite, &request).unwrap(),
            concat!(
                r#""t0"."id" IN (SELECT "t0_w"."id" FROM (SELECT "t0_g"."id" AS "id", ROW_NUMBER() OVER "#,
                r#"(PARTITION BY "t0_g"."category", "t0_g"."brand" ORDER BY "t0_g"."price" IS NULL ASC, "t0_g"."price" ASC, "t0_g"."id" ASC) AS "rn" "#,
                r#"FROM "users" AS "t0_g" WHERE "t0_g"."app_id" = :tenant_2_1 AND "t0_g"."deleted_at" IS NULL) AS "t0_w" "#,
                r#"WHERE "t0_w"."rn" = 1)"#
            )
        );
    }

    #[test]
    fn only_distinct_on_dialects_skip_the_window() {
        let request = FilterRequest::new().group_by(["category"], "price", GroupSort::Max);
        let mysql = compile_sql(Dialect::MySQL, &request).unwrap();
        assert!(mysql.starts_with("`t0`.`id` IN (SELECT `t0_w`.`id` FROM (SELECT `t0_g`.`id` AS `id`, ROW_NUMBER() OVER"));
        assert!(!mysql.contains("DISTINCT ON"));

        let postgres = compile_sql(Dialect::PostgreSQL, &request).unwrap();
        assert!(!postgres.contains("ROW_NUMBER"));
    }

    #[test]
    fn incomplete_or_invalid_group_is_inert() {
        let mut request = FilterRequest::new().group_by(["category"], "price", GroupSort::Max);
        request.group_sort = None;
        assert_eq!(compile_sql(Dialect::SQLite, &request), None);

        let request = FilterRequest::new().group_by(["bad key"], "price", GroupSort::Max);
        assert_eq!(compile_sql(Dialect::SQLite, &request), None);
    }
}
