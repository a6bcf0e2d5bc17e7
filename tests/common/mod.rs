#![allow(dead_code)]

use sieve::prelude::*;
use sieve::rusqlite::Connection;

const SCHEMA: &str = r#"
CREATE TABLE companies (
    id INTEGER PRIMARY KEY,
    app_id INTEGER NOT NULL,
    name TEXT NOT NULL
);
CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    app_id INTEGER NOT NULL,
    company_id INTEGER NOT NULL REFERENCES companies(id),
    name TEXT NOT NULL,
    status TEXT NOT NULL,
    age INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    meta TEXT,
    deleted_at TEXT
);
CREATE TABLE orders (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id),
    status TEXT NOT NULL,
    total INTEGER NOT NULL,
    deleted_at TEXT
);
CREATE TABLE roles (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE user_roles (
    user_id INTEGER NOT NULL REFERENCES users(id),
    role_id INTEGER NOT NULL REFERENCES roles(id)
);
CREATE TABLE products (
    id INTEGER PRIMARY KEY,
    app_id INTEGER NOT NULL,
    category TEXT NOT NULL,
    name TEXT NOT NULL,
    price INTEGER,
    deleted_at TEXT
);
"#;

const SEED: &str = r#"
INSERT INTO companies (id, app_id, name) VALUES
    (1, 1, 'Acme'),
    (2, 1, 'Globex'),
    (3, 2, 'Initech');

INSERT INTO users (id, app_id, company_id, name, status, age, created_at, meta, deleted_at) VALUES
    (1, 1, 1, 'Alice', 'active', 30, '2024-01-10', '{"label":"vip"}', NULL),
    (2, 1, 1, 'Bob', 'banned', 25, '2024-02-15', '{"label":"basic"}', NULL),
    (3, 1, 2, 'Carol', 'active', 41, '2024-03-20', NULL, NULL),
    (4, 1, 2, 'Dave', 'pending', 35, '2024-04-05', '{"label":"VIP"}', NULL),
    (5, 1, 1, 'Eve', 'active', 28, '2024-05-01', NULL, '2024-06-01'),
    (6, 2, 3, 'Frank', 'active', 50, '2024-01-01', NULL, NULL),
    (7, 1, 3, 'Grace', 'active', 33, '2024-02-02', NULL, NULL);

INSERT INTO orders (id, user_id, status, total, deleted_at) VALUES
    (1, 1, 'paid', 100, NULL),
    (2, 1, 'refunded', 50, NULL),
    (3, 3, 'paid', 50, NULL),
    (4, 2, 'paid', 50, '2024-03-01');

INSERT INTO roles (id, name) VALUES
    (1, 'admin'),
    (2, 'editor'),
    (3, 'viewer');

INSERT INTO user_roles (user_id, role_id) VALUES
    (1, 1), (1, 2), (2, 2), (3, 3), (4, 1);

INSERT INTO products (id, app_id, category, name, price, deleted_at) VALUES
    (1, 1, 'books', 'A', 10, NULL),
    (2, 1, 'books', 'B', 30, NULL),
    (3, 1, 'books', 'C', NULL, NULL),
    (4, 1, 'games', 'D', 60, NULL),
    (5, 1, 'games', 'E', 60, NULL),
    (6, 1, 'games', 'F', 90, '2024-01-01'),
    (7, 1, 'toys', 'G', NULL, NULL),
    (8, 2, 'books', 'H', 999, NULL);
"#;

/// In-memory database with the fixture tables and rows.
///
/// Tenant `1` sees users 1-4: Eve is soft-deleted, Frank belongs to tenant
/// `2` and Grace's company belongs to tenant `2`.
pub fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    conn.execute_batch(SCHEMA).expect("Failed to create tables");
    conn.execute_batch(SEED).expect("Failed to seed tables");
    conn
}

pub fn registry() -> SchemaRegistry {
    SchemaRegistry::new()
        .with(
            EntityMeta::new("user", "users")
                .tenant_column("app_id")
                .soft_delete("deleted_at")
                .parent("company")
                .relation(
                    RelationDescriptor::belongs_to("company", "companies", "company_id")
                        .tenant_column("app_id")
                        .columns(["id", "name"]),
                )
                .relation(
                    RelationDescriptor::has_many("orders", "orders", "user_id")
                        .soft_delete("deleted_at")
                        .columns(["id", "status", "total"]),
                )
                .relation(
                    RelationDescriptor::many_to_many("roles", "roles", "user_roles", "user_id", "role_id")
                        .columns(["id", "name"]),
                ),
        )
        .with(
            EntityMeta::new("product", "products")
                .tenant_column("app_id")
                .soft_delete("deleted_at"),
        )
}

pub fn compiler() -> Compiler<SchemaRegistry> {
    Compiler::new(registry(), CompileOptions::new(Dialect::SQLite).parent_scope(true))
}

/// Runs `request` against `entity` for tenant `1`.
pub fn run(conn: &Connection, entity: &str, request: &FilterRequest) -> Page<Row> {
    run_as(conn, entity, request, "1")
}

pub fn run_as(conn: &Connection, entity: &str, request: &FilterRequest, tenant: &str) -> Page<Row> {
    compiler()
        .compile_for(entity, request, Some(tenant))
        .expect("entity is registered")
        .execute(conn)
        .expect("query executes")
}

pub fn ids(page: &Page<Row>) -> Vec<i64> {
    page.data
        .iter()
        .map(|row| row.get("id").and_then(Value::as_i64).expect("id column"))
        .collect()
}

/// Ids in ascending order, for requests without a sort.
pub fn sorted_ids(page: &Page<Row>) -> Vec<i64> {
    let mut ids = ids(page);
    ids.sort_unstable();
    ids
}
