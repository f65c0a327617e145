//! End-to-end tests driving the `sb` binary.
//!
//! Each test runs against a throwaway HOME so no user config leaks in.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn sb_binary() -> String {
    env!("CARGO_BIN_EXE_sb").to_string()
}

const CONFIG: &str = r#"{
    "year": 2025,
    "mappings": {
        "AB": {"projectNr": "PRJ", "packageNr": 7, "comment": "default task"},
        "CD": {"projectNr": "ADM", "packageNr": 2, "comment": "admin"}
    }
}"#;

const LOG: &str = "\
WE/19.03.
08:00-09:00 AB
09:00-10:00 CD

TU/18.03.
09:00-10:15 AB:task one
10:15-12:00 AB

MO/17.03.
08:00-08:30 CD
08:30-12:00 CD
";

/// Writes config and log into `temp` and returns the config path.
fn setup(temp: &Path, log: &str) -> std::path::PathBuf {
    let config = temp.join("config.json");
    std::fs::write(&config, CONFIG).unwrap();
    std::fs::write(temp.join("time.txt"), log).unwrap();
    config
}

fn run_sb(temp: &Path, args: &[&str]) -> Output {
    run_sb_with_env(temp, args, &[])
}

fn run_sb_with_env(temp: &Path, args: &[&str], vars: &[(&str, &str)]) -> Output {
    Command::new(sb_binary())
        .env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG")
        .envs(vars.iter().copied())
        .args(args)
        .output()
        .expect("failed to run sb")
}

fn parse_json(temp: &TempDir, extra: &[&str]) -> Value {
    let config = setup(temp.path(), LOG);
    let log = temp.path().join("time.txt");
    let mut args = vec![
        "--config",
        config.to_str().unwrap(),
        "--file",
        log.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    args.push("parse");

    let output = run_sb(temp.path(), &args);
    assert!(
        output.status.success(),
        "sb parse should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_parse_returns_days_in_source_order() {
    let temp = TempDir::new().unwrap();
    let json = parse_json(&temp, &[]);

    let dates: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|day| day["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2025-03-19", "2025-03-18", "2025-03-17"]);
}

#[test]
fn test_parse_aggregates_same_task() {
    let temp = TempDir::new().unwrap();
    let json = parse_json(&temp, &[]);

    let monday = &json[2];
    assert_eq!(monday["weekday"], 1);
    assert_eq!(monday["entries"].as_array().unwrap().len(), 1);
    assert_eq!(monday["entries"][0]["package"], "ADM-2");
    assert_eq!(monday["entries"][0]["duration"], 4.0);
    assert_eq!(monday["total"], 4.0);
}

#[test]
fn test_latest_flag_returns_last_block() {
    let temp = TempDir::new().unwrap();
    let json = parse_json(&temp, &["--latest"]);

    let days = json.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2025-03-17");
}

#[test]
fn test_log_path_from_legacy_home_config() {
    let temp = TempDir::new().unwrap();
    setup(temp.path(), LOG);
    let legacy = CONFIG.replacen('{', r#"{"path": "~/time.txt","#, 1);
    std::fs::write(temp.path().join(".silverbullet.json"), legacy).unwrap();

    let output = run_sb(temp.path(), &["check"]);
    assert!(
        output.status.success(),
        "sb check should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 days, 9.00h total"), "unexpected output: {stdout}");
}

#[test]
fn test_env_var_overrides_legacy_camel_case_key() {
    let temp = TempDir::new().unwrap();
    setup(temp.path(), LOG);
    let legacy = CONFIG.replacen(
        '{',
        r#"{"path": "~/time.txt", "modes": {"latestOnly": true},"#,
        1,
    );
    std::fs::write(temp.path().join(".silverbullet.json"), legacy).unwrap();

    let output = run_sb_with_env(
        temp.path(),
        &["check"],
        &[("SB_MODES__LATEST_ONLY", "false")],
    );
    assert!(
        output.status.success(),
        "sb check should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 days, 9.00h total"), "unexpected output: {stdout}");
}

#[test]
fn test_unmapped_shorthand_fails_with_raw_text() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), "MO/17.03.\n08:00-09:00 ZZ:typo\n");
    let log = temp.path().join("time.txt");

    let output = run_sb(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "--file",
            log.to_str().unwrap(),
            "check",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("08:00-09:00 ZZ:typo"), "unexpected stderr: {stderr}");
}

#[test]
fn test_missing_log_file_fails() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), LOG);
    let missing = temp.path().join("missing.txt");

    let output = run_sb(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "--file",
            missing.to_str().unwrap(),
            "check",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no time tracking file found at"), "unexpected stderr: {stderr}");
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.json");
    std::fs::write(&config, "{ broken").unwrap();

    let output = run_sb(temp.path(), &["--config", config.to_str().unwrap(), "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config file"), "unexpected stderr: {stderr}");
}
