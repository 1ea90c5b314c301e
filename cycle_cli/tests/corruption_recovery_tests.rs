//! Corruption and configuration tests for the luna binary.
//!
//! These tests verify the system handles:
//! - Corrupted profile files without overwriting them
//! - Hand-edited profiles with missing fields
//! - Invalid phase constants in the config file

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("luna"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_profile_is_reported_and_kept() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    fs::create_dir_all(dir.join("data")).unwrap();
    let profile_path = dir.join("data/period_data.json");
    fs::write(&profile_path, "{ invalid json }}}}").expect("Failed to write corrupted profile");

    cli(dir)
        .args(["--today", "2024-01-10", "record", "--start", "2024-01-09"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));

    // Nothing was overwritten
    let content = fs::read_to_string(&profile_path).unwrap();
    assert_eq!(content, "{ invalid json }}}}");
}

#[test]
fn test_profile_without_end_dates() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(
        dir.join("data/period_data.json"),
        r#"{"cycles": [{"start": "2024-01-29"}, {"start": "2024-01-01", "end": null}], "avg_cycle": 28}"#,
    )
    .unwrap();

    // Baseline is the latest start even though the file lists it first
    cli(dir)
        .args(["query", "--date", "2024-01-30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Menstrual phase [red] (day 2)"));

    cli(dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-29  →  -"));
}

#[test]
fn test_custom_phase_rules_from_config() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    let config_path = dir.join("luna.toml");
    fs::write(&config_path, "[phases]\nperiod_length = 7\n").unwrap();

    cli(dir)
        .args(["--today", "2024-01-01", "record", "--start", "2024-01-01"])
        .assert()
        .success();

    cli(dir)
        .arg("--config")
        .arg(&config_path)
        .args(["query", "--date", "2024-01-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Menstrual phase"));
}

#[test]
fn test_inverted_ovulation_window_rejected() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    let config_path = dir.join("luna.toml");
    fs::write(
        &config_path,
        "[phases]\novulation_window_start_offset = 10\novulation_window_end_offset = 14\n",
    )
    .unwrap();

    cli(dir)
        .arg("--config")
        .arg(&config_path)
        .arg("today")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_default_config_location_is_used() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    fs::create_dir_all(dir.join("config/luna")).unwrap();
    fs::write(
        dir.join("config/luna/config.toml"),
        "[phases]\nperiod_length = 0\n",
    )
    .unwrap();

    cli(dir)
        .arg("today")
        .assert()
        .failure()
        .stderr(predicate::str::contains("period_length"));
}
