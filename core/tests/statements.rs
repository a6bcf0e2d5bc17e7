//! Rendered statements through the public API, per dialect.

use sieve_core::prelude::*;

fn registry() -> SchemaRegistry {
    SchemaRegistry::new().with(
        EntityMeta::new("product", "products")
            .schema("shop")
            .tenant_column("app_id")
            .soft_delete("deleted_at")
            .relation(
                RelationDescriptor::many_to_many("tags", "tags", "product_tags", "product_id", "tag_id")
                    .columns(["id", "label"]),
            )
            .relation(
                RelationDescriptor::has_many("variants", "variants", "product_id")
                    .soft_delete("deleted_at")
                    .columns(["id", "sku"]),
            ),
    )
}

fn request() -> FilterRequest {
    FilterRequest::new()
        .filter_by("status", ["live", "!hidden"])
        .filter_nested_by("variants.sku", ["A-1"])
        .filter_m2m_by("tags.label", ["sale"])
        .search("red", ["name", "attrs.color"])
        .start("price", 10)
        .sort_by("attrs.rank", "desc")
        .preload("tags")
        .paginate(2, 25)
}

fn compile(dialect: Dialect) -> CompiledQuery {
    Compiler::new(registry(), CompileOptions::new(dialect))
        .compile_for("product", &request(), Some("9"))
        .unwrap()
}

#[test]
fn postgres_numbers_placeholders_in_text_order() {
    let rows = compile(Dialect::PostgreSQL).rows_statement();
    assert!(rows.sql.starts_with(r#"SELECT DISTINCT "t0".*, "t0"."attrs" ->> 'rank' AS "sort_0""#));
    assert!(rows.sql.contains(r#"FROM "shop"."products" AS "t0""#));
    assert!(rows.sql.contains(r#""t0"."app_id" = $1 AND "t0"."deleted_at" IS NULL"#));
    assert!(rows.sql.contains(r#""t0"."status" IN ($2) AND "t0"."status" NOT IN ($3)"#));
    assert!(rows.sql.contains(r#"CAST("t0"."name" AS TEXT) ILIKE $6 OR "t0"."attrs" ->> 'color' ILIKE $7"#));
    assert!(rows.sql.contains(r#""t0"."price" >= $8"#));
    assert!(rows.sql.ends_with(r#"ORDER BY "sort_0" DESC LIMIT 25 OFFSET 25"#));

    let values: Vec<&Value> = rows.values().collect();
    assert_eq!(values.len(), 8);
    assert_eq!(values[0], &Value::from("9"));
    assert_eq!(values[2], &Value::from("hidden"));
    assert_eq!(values[5], &Value::from("%red%"));
    assert_eq!(values[7], &Value::from(10));
}

#[test]
fn mysql_quotes_with_backticks() {
    let query = compile(Dialect::MySQL);
    let rows = query.rows_statement();
    assert!(rows.sql.contains("FROM `shop`.`products` AS `t0`"));
    assert!(rows.sql.contains("JSON_UNQUOTE(JSON_EXTRACT(`t0`.`attrs`, '$.color'))"));
    assert!(rows.sql.contains("LOWER(CAST(`t0`.`name` AS CHAR)) LIKE LOWER(?)"));
    assert!(!rows.sql.contains('$'));
    assert_eq!(rows.params.len(), query.params().len());
}

#[test]
fn sqlite_names_every_placeholder() {
    let query = compile(Dialect::SQLite);
    let rows = query.rows_statement();
    for param in &rows.params {
        assert!(rows.sql.contains(&format!(":{}", param.name)), "{} missing", param.name);
    }
    assert!(rows.sql.contains(r#"json_group_array(json_object('id', "t0_p0"."id", 'label', "t0_p0"."label"))"#));
}

#[test]
fn count_shares_params_with_rows() {
    for dialect in [Dialect::PostgreSQL, Dialect::SQLite, Dialect::MySQL] {
        let query = compile(dialect);
        let rows = query.rows_statement();
        let count = query.count_statement();
        assert_eq!(rows.params, count.params, "{dialect}");
        assert!(!count.sql.contains("LIMIT"), "{dialect}");
    }
}

#[test]
fn compiles_are_independent() {
    let compiler = Compiler::new(registry(), CompileOptions::new(Dialect::SQLite));
    let a = compiler.compile_for("product", &request(), Some("9")).unwrap();
    let b = compiler.compile_for("product", &request(), Some("9")).unwrap();
    assert_eq!(a.rows_statement(), b.rows_statement());
    assert!(compiler.compile_for("order", &request(), None).is_none());
}
