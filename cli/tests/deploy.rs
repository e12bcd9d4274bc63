//! # tfstrap Deploy Integration Tests
//!
//! File: cli/tests/deploy.rs
//!
//! ## Overview
//!
//! Runs the `tfstrap` binary end to end against a fake `terraform` shell
//! script placed in the `--tf-path` directory, so no network access or real
//! terraform is needed. Unix only.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_apply_runs_init_then_apply() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let tf = tempdir().unwrap();
    write_fake_terraform(tf.path());

    isolated_cmd(home.path(), work.path())
        .arg("--tf-path")
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Terraform has been successfully initialized!",
        ))
        .stdout(predicate::str::contains("fake apply complete"))
        .stdout(predicate::str::contains("args: apply -input=false -auto-approve"))
        .stderr(predicate::str::contains("Changes applied successfully"));

    assert_eq!(recorded_calls(tf.path()), ["init", "apply"]);
}

#[test]
fn test_destroy_flag_runs_destroy() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let tf = tempdir().unwrap();
    write_fake_terraform(tf.path());

    isolated_cmd(home.path(), work.path())
        .arg("--destroy")
        .env("TFSTRAP_TF_PATH", tf.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fake destroy complete"))
        .stderr(predicate::str::contains("Changes destroyed successfully"));

    assert_eq!(recorded_calls(tf.path()), ["init", "destroy"]);
}

#[test]
fn test_init_failure_stops_before_apply() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let tf = tempdir().unwrap();
    write_fake_terraform(tf.path());

    isolated_cmd(home.path(), work.path())
        .arg("--tf-path")
        .arg(tf.path())
        .env("FAIL_INIT", "1")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to terraform init"))
        .stderr(predicate::str::contains("oops"))
        .stderr(predicate::str::contains("Changes applied successfully").not());

    assert_eq!(recorded_calls(tf.path()), ["init"]);
}

#[test]
fn test_live_stderr_still_fails_with_cause() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let tf = tempdir().unwrap();
    write_fake_terraform(tf.path());

    isolated_cmd(home.path(), work.path())
        .args(["--live-stderr", "--tf-path"])
        .arg(tf.path())
        .env("FAIL_INIT", "1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("oops"))
        .stderr(predicate::str::contains("Failed to terraform init"));
}

#[test]
fn test_missing_workdir_is_rejected() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let tf = tempdir().unwrap();
    write_fake_terraform(tf.path());

    isolated_cmd(home.path(), work.path())
        .arg("--tf-path")
        .arg(tf.path())
        .args(["--workdir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Working directory"));

    assert!(recorded_calls(tf.path()).is_empty());
}

#[test]
fn test_download_failure_is_reported() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let tf = tempdir().unwrap();
    // Nothing listens on the discard port, so the download fails fast.
    std::fs::write(
        work.path().join(".tfstrap.toml"),
        "[terraform]\ndownload_base_url = \"http://127.0.0.1:9\"\n",
    )
    .unwrap();

    isolated_cmd(home.path(), work.path())
        .arg("--tf-path")
        .arg(tf.path().join("bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to install terraform"))
        .stderr(predicate::str::contains("Unable to download zip"));
}
