//! End-to-end integration tests for the sieve CLI

use assert_cmd::cargo;
use predicates::prelude::*;
use assert_cmd::Command;
use tempfile::TempDir;

const CONFIG: &str = r#"
dialect = "sqlite"

[[entities]]
name = "user"
table = "users"
tenant_column = "app_id"
soft_delete_column = "deleted_at"

[[entities.relations]]
name = "orders"
table = "orders"
foreign_key = "user_id"
kind = "has_many"
columns = ["id", "status"]
"#;

/// Get the sieve CLI binary
fn sieve_cli() -> Command {
    Command::new(cargo::cargo_bin!("sieve"))
}

/// Temp dir with `sieve.toml` and `request.json`.
fn workspace(request: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("sieve.toml"), CONFIG).unwrap();
    std::fs::write(temp.path().join("request.json"), request).unwrap();
    temp
}

mod check {
    use super::*;

    #[test]
    fn lists_entities() {
        let temp = workspace("{}");
        sieve_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("users"))
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn missing_config_fails() {
        let temp = TempDir::new().unwrap();
        sieve_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("config not found"));
    }
}

mod compile {
    use super::*;

    #[test]
    fn prints_rows_and_count() {
        let temp = workspace(r#"{"filter_by": ["status"], "filter": [["active"]]}"#);
        sieve_cli()
            .current_dir(temp.path())
            .args(["compile", "--entity", "user", "--request", "request.json", "--tenant", "7"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""t0"."status" IN (:filter_0_2)"#))
            .stdout(predicate::str::contains(r#"SELECT COUNT(DISTINCT "t0"."id")"#));
    }

    #[test]
    fn json_output_with_dialect_override() {
        let temp = workspace(r#"{"search": "ann", "search_by": ["name"]}"#);
        let output = sieve_cli()
            .current_dir(temp.path())
            .args(["--dialect", "postgres", "compile", "-e", "user", "-r", "request.json", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(doc["dialect"], "postgresql");
        assert!(doc["rows"]["sql"].as_str().unwrap().contains("ILIKE $2"));
        assert_eq!(doc["rows"]["params"][0]["value"], "1");
        assert_eq!(doc["rows"]["params"][1]["value"], "%ann%");
    }

    #[test]
    fn strict_rejects_mismatched_pairs() {
        let temp = workspace(r#"{"filter_by": ["status", "name"], "filter": [["active"]]}"#);
        sieve_cli()
            .current_dir(temp.path())
            .args(["compile", "-e", "user", "-r", "request.json"])
            .assert()
            .success();

        sieve_cli()
            .current_dir(temp.path())
            .args(["compile", "-e", "user", "-r", "request.json", "--strict"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Validation error"));
    }

    #[test]
    fn unknown_entity_fails() {
        let temp = workspace("{}");
        sieve_cli()
            .current_dir(temp.path())
            .args(["compile", "-e", "invoice", "-r", "request.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown entity: invoice"));
    }

    #[test]
    fn reads_request_from_stdin() {
        let temp = workspace("{}");
        sieve_cli()
            .current_dir(temp.path())
            .args(["compile", "-e", "user", "-r", "-"])
            .write_stdin(r#"{"page": 2, "per_page": 5}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains("LIMIT 5 OFFSET 5"));
    }
}

mod query {
    use super::*;

    fn seed(temp: &TempDir) -> std::path::PathBuf {
        let path = temp.path().join("app.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE users (id INTEGER PRIMARY KEY, app_id INTEGER, name TEXT, deleted_at TEXT);
            CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER, status TEXT);
            INSERT INTO users VALUES (1, 1, 'Ann', NULL), (2, 1, 'Ben', NULL), (3, 2, 'Cid', NULL);
            INSERT INTO orders VALUES (1, 1, 'paid'), (2, 2, 'open');
            "#,
        )
        .unwrap();
        path
    }

    #[test]
    fn prints_the_page() {
        let temp = workspace(r#"{"filter_nested_by": ["orders.status"], "filter_nested": [["paid"]], "preload": ["orders"]}"#);
        let db = seed(&temp);

        let output = sieve_cli()
            .current_dir(temp.path())
            .args(["query", "-e", "user", "-r", "request.json", "-d"])
            .arg(&db)
            .output()
            .unwrap();
        assert!(output.status.success());

        let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(page["total"], 1);
        assert_eq!(page["total_page"], 1);
        assert_eq!(page["data"][0]["name"], "Ann");
        assert_eq!(page["data"][0]["orders"], r#"[{"id":1,"status":"paid"}]"#);
    }

    #[test]
    fn tenant_flag_scopes_rows() {
        let temp = workspace("{}");
        let db = seed(&temp);

        sieve_cli()
            .current_dir(temp.path())
            .args(["query", "-e", "user", "-r", "request.json", "-t", "2", "-d"])
            .arg(&db)
            .assert()
            .success()
            .stdout(predicate::str::contains("Cid"))
            .stdout(predicate::str::contains("Ann").not());
    }
}
