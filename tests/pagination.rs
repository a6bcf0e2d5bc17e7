#![cfg(feature = "rusqlite")]

mod common;

use common::{compiler, ids, run, setup_db};
use sieve::prelude::*;

#[test]
fn pages_slice_the_sorted_set() {
    let conn = setup_db();
    let sorted = || FilterRequest::new().sort_by("age", "desc");

    let first = run(&conn, "user", &sorted().paginate(1, 3));
    assert_eq!(ids(&first), vec![3, 4, 1]);
    assert_eq!((first.total, first.total_page), (4, 2));
    assert_eq!((first.page, first.per_page), (Some(1), Some(3)));

    let second = run(&conn, "user", &sorted().paginate(2, 3));
    assert_eq!(ids(&second), vec![2]);
    assert_eq!(second.total, 4);

    let past_the_end = run(&conn, "user", &sorted().paginate(5, 3));
    assert!(past_the_end.data.is_empty());
    assert_eq!(past_the_end.total, 4);
}

#[test]
fn total_counts_every_matching_row() {
    let conn = setup_db();
    let requests = [
        FilterRequest::new(),
        FilterRequest::new().filter_m2m_by("roles.name", ["admin", "editor"]),
        FilterRequest::new()
            .filter_nested_by("orders.status", ["paid"])
            .filter_nested_by("orders.total", [50])
            .filter_nested_condition(Condition::Or),
        FilterRequest::new().search("a", ["name"]).preload("orders"),
        FilterRequest::new().filter_nested_parent_by("company.name", ["Acme"]),
    ];

    for request in requests {
        let all = run(&conn, "user", &request);
        let paged = run(&conn, "user", &request.clone().paginate(1, 1));
        assert_eq!(all.total, all.data.len() as u64);
        assert_eq!(paged.total, all.total);
        assert!(paged.data.len() <= 1);
    }
}

#[test]
fn invalid_pagination_returns_everything() {
    let conn = setup_db();
    let mut request = FilterRequest::new();
    request.page = Some(0);
    request.per_page = Some(10);

    let page = run(&conn, "user", &request);
    assert_eq!(page.data.len(), 4);
    assert_eq!(page.page, None);
    assert!(request.validate().is_err());
}

#[test]
fn statements_share_the_predicate() {
    let request = FilterRequest::new()
        .filter_by("status", ["active"])
        .sort_by("age", "asc")
        .paginate(2, 10);
    let query = compiler().compile_for("user", &request, None).unwrap();

    let rows = query.rows_statement();
    let count = query.count_statement();
    assert!(rows.sql.ends_with("LIMIT 10 OFFSET 10"));
    assert!(count.sql.starts_with(r#"SELECT COUNT(DISTINCT "t0"."id") AS "total""#));
    assert!(!count.sql.contains("ORDER BY"));
    assert!(!count.sql.contains("LIMIT"));
    assert_eq!(rows.params, count.params);
    assert_eq!((query.skip(), query.take()), (Some(10), Some(10)));
}

#[test]
fn page_serializes_as_an_envelope() {
    let conn = setup_db();
    let request = FilterRequest::new()
        .filter_by("id", [1])
        .paginate(1, 5);
    let page = run(&conn, "user", &request);
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["total"], 1);
    assert_eq!(json["total_page"], 1);
    assert_eq!(json["page"], 1);
    assert_eq!(json["per_page"], 5);
    assert_eq!(json["data"][0]["name"], "Alice");
    assert_eq!(json["data"][0]["deleted_at"], serde_json::Value::Null);
}
