use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn harvester_cmd() -> Command {
    Command::cargo_bin("harvester").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    harvester_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("posts"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_watch_help_shows_cycles_flag() {
    harvester_cmd()
        .arg("watch")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cycles"));
}

#[test]
fn test_posts_help_shows_limit_flag() {
    harvester_cmd()
        .arg("posts")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"));
}

#[test]
fn test_list_with_empty_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    harvester_cmd()
        .arg("list")
        .env("HARVESTER_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("No feeds registered."));
}

#[test]
fn test_posts_with_empty_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    harvester_cmd()
        .arg("posts")
        .env("HARVESTER_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("No posts ingested yet."));
}

#[test]
fn test_add_rejects_invalid_url() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    harvester_cmd()
        .arg("add")
        .arg("not a url")
        .env("HARVESTER_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid feed URL"));
}

#[test]
fn test_remove_unknown_feed_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    harvester_cmd()
        .arg("remove")
        .arg("42")
        .env("HARVESTER_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Feed not found"));
}

#[test]
fn test_run_with_no_feeds_completes() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    harvester_cmd()
        .arg("run")
        .env("HARVESTER_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 attempted"));
}
