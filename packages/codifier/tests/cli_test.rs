//! CLI smoke tests for the lexcodify binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_requires_subcommand() {
    Command::cargo_bin("lexcodify")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_text_rejects_missing_file() {
    Command::cargo_bin("lexcodify")
        .unwrap()
        .args(["text", "no-such-file.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid source"));
}

#[test]
fn test_analyze_requires_api_key() {
    // The completion client is configured before any download starts
    Command::cargo_bin("lexcodify")
        .unwrap()
        .env_remove("OPENAI_API_KEY")
        .args(["analyze", "no-such-file.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("lexcodify")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lexcodify"));
}
