//! # tfstrap CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Verifies top-level behavior of the `tfstrap` binary: `--help`,
//! `--version`, and rejection of unknown arguments.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_main_help_flag() {
    tfstrap_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--destroy"))
        .stdout(predicate::str::contains("--tf-path"));
}

#[test]
fn test_main_version_flag() {
    tfstrap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_argument_is_rejected() {
    tfstrap_cmd()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
