//! CLI integration tests for dbdoc.
//!
//! These tests run the binary against schema snapshot files, so no database
//! is needed. They cover help output, generated files and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "tables": [
    {
      "info": {
        "name": "orders",
        "engine": "InnoDB",
        "collation": "utf8mb4_general_ci",
        "comment": "Customer orders"
      },
      "columns": [
        {"name": "id", "field_type": "bigint(20)", "nullable": "NO", "comment": "order id"},
        {"name": "note", "field_type": "text", "nullable": "YES", "comment": "free | form"}
      ]
    },
    {
      "info": {
        "name": "users",
        "engine": "InnoDB",
        "collation": "utf8mb4_general_ci",
        "comment": ""
      },
      "columns": [
        {"name": "id", "field_type": "int(10) unsigned", "nullable": "NO", "comment": ""}
      ]
    }
  ]
}"#;

/// Get a command for the dbdoc binary, isolated from the caller's environment.
///
/// `HOME` and `XDG_CONFIG_HOME` point inside `dir`, so the user's own config
/// files are never picked up.
fn cmd(dir: &Path) -> Command {
    let home = dir.join("home");
    let mut cmd = Command::cargo_bin("dbdoc").unwrap();
    cmd.current_dir(dir)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("DBDOC_CONFIG")
        .env_remove("DBDOC_PASSWORD")
        .env_remove("DBDOC_LOG_FORMAT")
        .env_remove("DBDOC_HOST")
        .env_remove("DBDOC_PORT")
        .env_remove("DBDOC_USER")
        .env_remove("DBDOC_NAME")
        .env_remove("RUST_LOG");
    cmd
}

fn write_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("schema.json");
    fs::write(&path, SNAPSHOT).unwrap();
    path
}

// =============================================================================
// Help and Usage Tests
// =============================================================================

#[test]
fn test_help_lists_flags() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--gitlab"))
        .stdout(predicate::str::contains("--graph"))
        .stdout(predicate::str::contains("--migration"));
}

#[test]
fn test_without_destination_prints_usage() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dbdoc"));
}

// =============================================================================
// Generation Tests
// =============================================================================

#[test]
fn test_markdown_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    cmd(dir.path())
        .args(["docs/db.md", "--no-color", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote docs/db.md"));

    let doc = fs::read_to_string(dir.path().join("docs/db.md")).unwrap();
    assert!(doc.starts_with("## orders\n> Customer orders\n"));
    assert!(doc.contains("free \\| form"));
    assert!(doc.contains("## users\n> no comment provided\n"));
    assert!(doc.ends_with("---"));
}

#[test]
fn test_graph_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    cmd(dir.path())
        .args(["db.dot", "--graph", "--gitlab", "-q", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let doc = fs::read_to_string(dir.path().join("db.dot")).unwrap();
    assert!(doc.starts_with("digraph model_graph {"));
    assert!(doc.contains("mis_models_orders[label = <"));
    assert!(doc.contains("users()"));
    assert!(!doc.contains("<details>"));
}

#[test]
fn test_gitlab_wraps_columns() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    cmd(dir.path())
        .args(["db.md", "--gitlab", "-q", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();

    let doc = fs::read_to_string(dir.path().join("db.md")).unwrap();
    assert_eq!(doc.matches("<details>").count(), 2);
}

#[test]
fn test_migration_comments_fill_gaps() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());
    let migrations = dir.path().join("migrations");
    fs::create_dir_all(&migrations).unwrap();
    fs::write(
        migrations.join("2020_create_users.php"),
        "Schema::create('users', function (Blueprint $table) {\n    $table->comment('Registered users');\n});\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["db.md", "-q", "--migration", "migrations", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();

    let doc = fs::read_to_string(dir.path().join("db.md")).unwrap();
    assert!(doc.contains("## users\n> Registered users\n"));
}

#[test]
fn test_config_file_placeholder() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());
    fs::write(
        dir.path().join("custom.yaml"),
        "render:\n  placeholder: \"(undocumented)\"\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["db.md", "-q", "--config", "custom.yaml", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();

    let doc = fs::read_to_string(dir.path().join("db.md")).unwrap();
    assert!(doc.contains("> (undocumented)"));
}

#[test]
fn test_home_config_is_read_from_isolated_home() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());
    let home = dir.path().join("home");
    fs::create_dir_all(&home).unwrap();
    fs::write(
        home.join(".dbdoc.yaml"),
        "render:\n  placeholder: \"(from test home)\"\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["db.md", "-q", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();

    let doc = fs::read_to_string(dir.path().join("db.md")).unwrap();
    assert!(doc.contains("> (from test home)"));
}

#[test]
fn test_view_row_has_visible_markers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("views.json");
    fs::write(
        &path,
        r#"{"tables": [{"info": {"name": "active_users"},
            "columns": [{"name": "id", "field_type": "int", "nullable": "NO"}]}]}"#,
    )
    .unwrap();

    cmd(dir.path())
        .args(["db.md", "-q", "--snapshot", "views.json"])
        .assert()
        .success();

    let doc = fs::read_to_string(dir.path().join("db.md")).unwrap();
    assert!(doc.contains("`-` `-`"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_existing_destination_needs_force() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());
    fs::write(dir.path().join("db.md"), "old").unwrap();

    cmd(dir.path())
        .args(["db.md", "--no-color", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with("Warning:"))
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(dir.path().join("db.md")).unwrap(), "old");

    cmd(dir.path())
        .args(["db.md", "-f", "-q", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();
    assert!(fs::read_to_string(dir.path().join("db.md"))
        .unwrap()
        .starts_with("## orders"));
}

#[test]
fn test_invalid_migration_path() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    cmd(dir.path())
        .args(["db.md", "--no-color", "--migration", "missing", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .code(4)
        .stdout(predicate::str::contains("Warning: Invalid migration path"));
    assert!(!dir.path().join("db.md").exists());
}

#[test]
fn test_empty_migration_directory() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());
    fs::create_dir_all(dir.path().join("migrations")).unwrap();

    cmd(dir.path())
        .args(["db.md", "--no-color", "--migration", "migrations", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .code(5);
}

#[test]
fn test_corrupt_snapshot() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), "{ nope").unwrap();

    cmd(dir.path())
        .args(["db.md", "--no-color", "--snapshot", "bad.json"])
        .assert()
        .code(7)
        .stdout(predicate::str::starts_with("Warning:"));
}
