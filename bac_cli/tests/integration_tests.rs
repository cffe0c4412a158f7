//! Integration tests for the bac binary.
//!
//! These tests verify end-to-end behavior including:
//! - Text and JSON estimate output
//! - Decay curve printing and CSV export
//! - Config file creation and overrides

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test directory holding an isolated config path
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI with its config pointed inside `dir`
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bac"));
    cmd.arg("--config").arg(dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_cli_help() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Blood alcohol concentration estimator",
        ));
}

#[test]
fn test_estimate_two_soju() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["estimate", "--gender", "male", "--weight", "70", "--hours", "0"])
        .args(["--drink", "soju=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Soju: 2 × (360 mL, 20%) → 113.60 g"))
        .stdout(predicate::str::contains("Total alcohol: 113.60 g"))
        .stdout(predicate::str::contains("BAC: 0.239%"))
        .stdout(predicate::str::contains(
            "Verdict: Up to 3 years imprisonment, 10,000,000 KRW fine, 24-month licence suspension",
        ));
}

#[test]
fn test_estimate_lists_penalty_brackets() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["estimate", "--weight", "70", "--hours", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAC < 0.03%: You may drive."))
        .stdout(predicate::str::contains("0.03% ≤ BAC < 0.08%"))
        .stdout(predicate::str::contains("0.08% ≤ BAC < 0.15%"))
        .stdout(predicate::str::contains("BAC ≥ 0.15%"))
        .stdout(predicate::str::contains("Verdict: You may drive."));
}

#[test]
fn test_estimate_after_many_hours_may_drive() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["estimate", "--weight", "70", "--hours", "20"])
        .args(["--drink", "soju=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAC: 0.000%"))
        .stdout(predicate::str::contains("Verdict: You may drive."));
}

#[test]
fn test_estimate_json() {
    let dir = setup_test_dir();
    let output = cli(&dir)
        .args(["estimate", "--gender", "female", "--weight", "55", "--hours", "1"])
        .args(["--drink", "beer=2", "--drink", "wine=1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).expect("stdout is JSON");
    let total = report["result"]["total_alcohol_grams"].as_f64().unwrap();
    assert!((total - (2.0 * 17.75 + 14.2)).abs() < 1e-9);
    assert_eq!(report["result"]["distribution_ratio"], 0.55);
    assert_eq!(report["result"]["breakdown"].as_array().unwrap().len(), 5);
    assert_eq!(report["input"]["gender"], "female");
    assert_eq!(report["input"]["counts"][1], serde_json::json!(["beer", 2]));
    assert!(report.get("curve").is_none());

    // 49.7 g / (55 kg × 1000 × 0.55) × 100 - 0.015 = 0.1493%
    let current = report["result"]["current_bac_percent"].as_f64().unwrap();
    assert!((current - 0.14930).abs() < 1e-4);
    assert_eq!(report["result"]["penalty_tier"], "tier_2");
}

#[test]
fn test_estimate_json_with_curve() {
    let dir = setup_test_dir();
    let output = cli(&dir)
        .args(["estimate", "--weight", "70", "--hours", "0"])
        .args(["--drink", "soju=2", "--json", "--curve"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).expect("stdout is JSON");
    let points = report["curve"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 100);
    assert_eq!(points[0]["hours"], 0.0);

    let time_to_safe = report["curve"]["time_to_safe_hours"].as_f64().unwrap();
    let window = report["curve"]["window_hours"].as_f64().unwrap();
    assert!((window - (time_to_safe + 1.0)).abs() < 1e-9);
    assert!((report["hours_until_safe"].as_f64().unwrap() - time_to_safe).abs() < 1e-9);
}

#[test]
fn test_estimate_writes_curve_csv() {
    let dir = setup_test_dir();
    let csv_path = dir.path().join("curve.csv");

    cli(&dir)
        .args(["estimate", "--weight", "70", "--hours", "2"])
        .args(["--drink", "whiskey=4"])
        .arg("--curve-csv")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Decay curve: 100 points"))
        .stdout(predicate::str::contains("Curve written to"));

    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(content.starts_with("hours,bac_percent\n"));
    assert_eq!(content.lines().count(), 101);
}

#[test]
fn test_curve_command_prints_table() {
    let dir = setup_test_dir();
    let output = cli(&dir)
        .args(["curve", "--weight", "70", "--drink", "soju=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Below 0.03% after"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    // Header lines plus one row per sample
    assert_eq!(stdout.lines().count(), 102);
}

#[test]
fn test_curve_command_already_safe() {
    let dir = setup_test_dir();
    cli(&dir)
        .args(["curve", "--weight", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already below 0.03%"))
        .stdout(predicate::str::contains("1.00"));
}

#[test]
fn test_catalog_lists_all_drinks() {
    let dir = setup_test_dir();
    let output = cli(&dir)
        .arg("catalog")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    for id in ["soju", "beer", "wine", "makgeolli", "whiskey"] {
        assert!(stdout.contains(id), "missing '{}' in:\n{}", id, stdout);
    }
    assert!(stdout.contains("56.80 g per serving"));
}

#[test]
fn test_no_command_shows_catalog() {
    let dir = setup_test_dir();
    cli(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Drink Catalog"))
        .stdout(predicate::str::contains("bac estimate --help"));
}

#[test]
fn test_init_config() {
    let dir = setup_test_dir();
    let config_path = dir.path().join("config.toml");

    cli(&dir)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let content = fs::read_to_string(&config_path).expect("Failed to read config");
    assert!(content.contains("elimination_rate"));
    assert!(content.contains("samples = 100"));

    cli(&dir)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    cli(&dir)
        .args(["init-config", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
}

#[test]
fn test_config_overrides_curve_samples() {
    let dir = setup_test_dir();
    fs::write(
        dir.path().join("config.toml"),
        "[curve]\nsamples = 10\npadding_hours = 2.0\n",
    )
    .unwrap();
    let csv_path = dir.path().join("curve.csv");

    cli(&dir)
        .args(["curve", "--weight", "70", "--drink", "beer=1"])
        .arg("--csv")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 10 points"));

    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert_eq!(content.lines().count(), 11);
}

#[test]
fn test_config_overrides_elimination_rate() {
    let dir = setup_test_dir();
    fs::write(
        dir.path().join("config.toml"),
        "[model]\nelimination_rate = 0.1\n",
    )
    .unwrap();

    // 0.2387% - 0.1 × 2 h = 0.0387% with the faster rate
    cli(&dir)
        .args(["estimate", "--weight", "70", "--hours", "2", "--drink", "soju=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAC: 0.039%"));
}
