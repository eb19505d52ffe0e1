//! CLI integration tests for tbh.
//!
//! These tests verify the command-line interface behavior using assert_cmd.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use crate::integration::fixtures::{item_hours_ago, TempStore};

/// Get a tbh Command pointed at a temporary store, ignoring user config.
fn tbh(temp: &TempStore) -> Command {
    let mut cmd = cargo_bin_cmd!("tbh");
    cmd.current_dir(temp.dir.path())
        .arg("--no-config")
        .arg("--store")
        .arg(temp.path());
    cmd
}

// ==================== Help and Version ====================

#[test]
fn test_help_output() {
    cargo_bin_cmd!("tbh")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("--store"));
}

#[test]
fn test_version_output() {
    cargo_bin_cmd!("tbh")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tbh"))
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

// ==================== List ====================

#[test]
fn test_list_empty_store() {
    let temp = TempStore::new();

    tbh(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet"));

    assert!(!temp.path().exists());
}

#[test]
fn test_default_command_lists() {
    let temp = TempStore::new();
    temp.seed(&[item_hours_ago("movie.mp4", 1)]);

    tbh(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("movie.mp4"))
        .stdout(predicate::str::contains("1h ago"));
}

#[test]
fn test_list_drops_expired() {
    let temp = TempStore::new();
    temp.seed(&[item_hours_ago("fresh.zip", 2), item_hours_ago("stale.zip", 26)]);

    tbh(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("fresh.zip"))
        .stdout(predicate::str::contains("stale.zip").not());

    assert_eq!(temp.stored_items().len(), 1);
}

#[test]
fn test_list_filter() {
    let temp = TempStore::new();
    temp.seed(&[
        item_hours_ago("holiday-photos.zip", 1),
        item_hours_ago("report.pdf", 2),
    ]);

    tbh(&temp)
        .args(["list", "--filter", "rpt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("report.pdf"))
        .stdout(predicate::str::contains("holiday-photos.zip").not());
}

#[test]
fn test_list_filter_no_match() {
    let temp = TempStore::new();
    temp.seed(&[item_hours_ago("report.pdf", 2)]);

    tbh(&temp)
        .args(["list", "-q", "xyz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history items match 'xyz'"));
}

#[test]
fn test_list_filter_uses_config_mode() {
    let temp = TempStore::new();
    temp.seed(&[item_hours_ago("report.pdf", 2)]);
    let config_path = temp.dir.path().join("substring.toml");
    std::fs::write(&config_path, "[filter]\nfuzzy = false\n").unwrap();

    let mut cmd = cargo_bin_cmd!("tbh");
    cmd.current_dir(temp.dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg("--store")
        .arg(temp.path())
        .args(["list", "--filter", "rpt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history items match 'rpt'"));
}

// ==================== Add ====================

#[test]
fn test_add_then_list() {
    let temp = TempStore::new();

    tbh(&temp)
        .args(["add", "a.zip", "--field", "size=12 MB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.zip"))
        .stdout(predicate::str::contains("12 MB"));

    tbh(&temp)
        .args(["add", "b.zip"])
        .assert()
        .success();

    let stored = temp.stored_items();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].file_name(), "b.zip");
    assert_eq!(stored[1].file.field_text("size").unwrap(), "12 MB");
}

#[test]
fn test_add_respects_max() {
    let temp = TempStore::new();

    for name in ["a", "b", "c"] {
        tbh(&temp).args(["add", name]).assert().success();
    }
    tbh(&temp).args(["add", "d", "--max", "2"]).assert().success();

    let stored = temp.stored_items();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].file_name(), "d");
    assert_eq!(stored[1].file_name(), "c");
}

#[test]
fn test_add_zero_max_fails() {
    let temp = TempStore::new();

    tbh(&temp)
        .args(["add", "a.zip", "--max", "0"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_add_invalid_field() {
    let temp = TempStore::new();

    tbh(&temp)
        .args(["add", "a.zip", "--field", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

// ==================== Corrupt Data ====================

#[test]
fn test_corrupt_history_reset_by_default() {
    let temp = TempStore::new();
    temp.seed_raw("{{{");

    tbh(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet"));

    assert_eq!(temp.raw().as_deref(), Some("[]"));
}

#[test]
fn test_corrupt_history_fail_policy() {
    let temp = TempStore::new();
    temp.seed_raw("{{{");
    let config_path = temp.dir.path().join("strict.toml");
    std::fs::write(&config_path, "[history]\non_corrupt = \"fail\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("tbh");
    cmd.current_dir(temp.dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg("--store")
        .arg(temp.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a valid list"));
}

// ==================== Misc ====================

#[test]
fn test_path_output() {
    let temp = TempStore::new();

    tbh(&temp)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("Storage file:"))
        .stdout(predicate::str::contains("storage.json"))
        .stdout(predicate::str::contains("(exists: false)"));
}

#[test]
fn test_example_config_output() {
    let temp = TempStore::new();

    tbh(&temp)
        .arg("example-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[history]"))
        .stdout(predicate::str::contains("max_items = 10"));
}

#[test]
fn test_completions() {
    cargo_bin_cmd!("tbh")
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tbh"));
}
