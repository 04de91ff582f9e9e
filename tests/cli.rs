// ABOUTME: Integration tests for the maas-redeploy CLI commands.
// ABOUTME: Validates --help output, init behavior, and argument validation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn maas_redeploy_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("maas-redeploy"))
}

#[test]
fn help_shows_commands() {
    maas_redeploy_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("redeploy"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("maas-redeploy.yml");

    maas_redeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--url", "http://10.0.0.2:5240/MAAS"])
        .assert()
        .success();

    assert!(config_path.exists(), "maas-redeploy.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("http://10.0.0.2:5240/MAAS"));
    assert!(content.contains("MAAS_API_KEY"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("maas-redeploy.yml");

    fs::write(&config_path, "existing: config").unwrap();

    maas_redeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn redeploy_requires_system_ids() {
    maas_redeploy_cmd()
        .arg("redeploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SYSTEM_IDS"));
}

#[test]
fn redeploy_without_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    maas_redeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["redeploy", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn zero_interval_override_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("maas-redeploy.yml"),
        "maas:\n  url: http://127.0.0.1:9/MAAS\n  api_key: ck:tk:ts\n",
    )
    .unwrap();

    maas_redeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["redeploy", "abc", "--interval", "0s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval"));
}

#[test]
fn invalid_system_id_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("maas-redeploy.yml"),
        "maas:\n  url: http://127.0.0.1:9/MAAS\n  api_key: ck:tk:ts\n",
    )
    .unwrap();

    maas_redeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["check", "abc/def"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid system_id"));
}
