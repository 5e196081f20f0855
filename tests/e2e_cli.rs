//! CLI end-to-end tests
//!
//! Runs the popcorn binary against a throwaway database.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Get a command for the popcorn binary
#[allow(deprecated)]
fn popcorn_cmd() -> Command {
    let mut cmd = Command::cargo_bin("popcorn").unwrap();
    cmd.env_remove("OMDB_API_KEY").env_remove("RUST_LOG");
    cmd
}

/// Write a config whose database lives in `dir`.
fn write_config(dir: &Path) -> PathBuf {
    let config_path = dir.join("popcorn.toml");
    let db_path = dir.join("movies.sqlite");
    fs::write(
        &config_path,
        format!("[database]\npath = \"{}\"\n", db_path.display()),
    )
    .unwrap();
    config_path
}

fn workspace() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    (dir, config)
}

#[test]
fn test_cli_no_args_shows_help() {
    popcorn_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    popcorn_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_add_and_list_users() {
    let (_dir, config) = workspace();

    popcorn_cmd()
        .arg("--config")
        .arg(&config)
        .args(["add-user", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added user Alice (1)"));

    popcorn_cmd()
        .arg("--config")
        .arg(&config)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn test_cli_logs_go_to_stderr() {
    let (_dir, config) = workspace();

    popcorn_cmd()
        .arg("--config")
        .arg(&config)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("Opening database").not())
        .stdout(predicate::str::contains("INFO").not())
        .stderr(predicate::str::contains("Opening database"));
}

#[test]
fn test_cli_users_empty() {
    let (_dir, config) = workspace();

    popcorn_cmd()
        .arg("--config")
        .arg(&config)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("No users yet"));
}

#[test]
fn test_cli_movies_for_unknown_user_fails() {
    let (_dir, config) = workspace();

    popcorn_cmd()
        .arg("--config")
        .arg(&config)
        .args(["movies", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user 99"));
}

#[test]
fn test_cli_update_rejects_unknown_field() {
    let (_dir, config) = workspace();

    popcorn_cmd()
        .arg("--config")
        .arg(&config)
        .args(["update-movie", "1", "genre=drama"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("genre"));
}

#[test]
fn test_cli_update_requires_assignment() {
    popcorn_cmd()
        .args(["update-movie", "1", "rating"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key=value"));
}

#[test]
fn test_cli_lookup_without_api_key_fails() {
    let (dir, config) = workspace();

    // Run from the temp dir so no developer .env supplies a key.
    popcorn_cmd()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["lookup", "Heat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OMDb lookups are not configured"));
}

#[test]
fn test_cli_missing_config_file_fails() {
    let dir = tempdir().unwrap();

    popcorn_cmd()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("users")
        .assert()
        .failure();
}
