// Integration tests for the readiness CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and stdout/stderr output.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to build a Command for the readiness binary, isolated from user config.
fn readiness(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("readiness").expect("binary should exist");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_version_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    readiness(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("readiness"));
}

#[test]
fn cli_help_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    readiness(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("certification readiness"));
}

#[test]
fn evaluate_requires_answers_path() {
    let home = TempDir::new().expect("temp dir should be created");
    readiness(&home)
        .arg("evaluate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn quiet_and_verbose_are_mutually_exclusive() {
    let home = TempDir::new().expect("temp dir should be created");
    readiness(&home)
        .args(["-q", "-v", "catalog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn catalog_lists_builtin_questions() {
    let home = TempDir::new().expect("temp dir should be created");
    readiness(&home)
        .arg("catalog")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("general: General Information (not scored)"))
        .stdout(predicate::str::contains("ko_4 [single-choice KO]"))
        .stdout(predicate::str::contains("digest: "));
}

#[test]
fn catalog_rejects_invalid_custom_bank() {
    let home = TempDir::new().expect("temp dir should be created");
    let path = home.path().join("bank.toml");
    std::fs::write(
        &path,
        r#"
[[categories]]
id = "ko"
title = "KO"

[[categories.questions]]
id = "ko_1"
prompt = "Manager?"
kind = "single-choice"
options = ["Yes", "No"]
weights = [100]
mandatory = true
"#,
    )
    .expect("catalog should write");

    readiness(&home)
        .arg("catalog")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid catalog"));
}
