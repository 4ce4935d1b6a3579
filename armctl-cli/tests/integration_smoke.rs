//! Smoke tests for the armctl command surface.
//!
//! These exercise clap wiring only — nothing here ever reaches `az`.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn top_level_help_lists_actions() {
    let mut cmd = Command::cargo_bin("armctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("create-rg"))
        .stdout(predicate::str::contains("list-storage"))
        .stdout(predicate::str::contains("delete-rg"))
        .stdout(predicate::str::contains("list-resources"));
}

#[test]
fn create_rg_help() {
    let mut cmd = Command::cargo_bin("armctl").unwrap();
    cmd.args(["create-rg", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Resource group name"))
        .stdout(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn delete_rg_help_mentions_no_wait() {
    let mut cmd = Command::cargo_bin("armctl").unwrap();
    cmd.args(["delete-rg", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--no-wait"))
        .stdout(predicate::str::contains("--yes"));
}

#[test]
fn create_storage_requires_resource_group() {
    // Usage error from the parser, before any external invocation.
    let mut cmd = Command::cargo_bin("armctl").unwrap();
    cmd.args(["create-storage", "--name", "appdata001"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--resource-group"));
}

#[test]
fn create_vm_requires_name() {
    let mut cmd = Command::cargo_bin("armctl").unwrap();
    cmd.args(["create-vm", "--resource-group", "app-rg"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn create_vm_help_shows_defaults() {
    let mut cmd = Command::cargo_bin("armctl").unwrap();
    cmd.args(["create-vm", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Ubuntu2204"))
        .stdout(predicate::str::contains("Standard_B1s"));
}

#[test]
fn completions_generate_without_az() {
    let mut cmd = Command::cargo_bin("armctl").unwrap();
    cmd.args(["completions", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("armctl"));
}
