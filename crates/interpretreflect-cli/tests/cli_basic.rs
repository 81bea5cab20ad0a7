//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against an isolated home
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against the given home directory.
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "interpretreflect-cli", "--quiet", "--"])
        .args(args)
        .env("HOME", home)
        .env("REFLECT_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_path() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_log_emotion() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &[
            "log",
            "emotion",
            "--emotion",
            "anxious",
            "--intensity",
            "4",
        ],
    );
    assert_eq!(code, 0, "log emotion failed: {stderr}");
    assert!(stdout.contains("anxious"));
}

#[test]
fn test_patterns_analyze_empty_history() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(home.path(), &["patterns", "analyze"]);
    assert_eq!(code, 0, "patterns analyze failed: {stderr}");
    assert!(stdout.contains("no new nudges"));
}

#[test]
fn test_nudges_list_empty() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["nudges", "list"]);
    assert_eq!(code, 0, "nudges list failed");
    assert!(stdout.contains("no active nudges"));
}

#[test]
fn test_complexity_score_and_routing() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &[
            "complexity",
            "score",
            "--task",
            "task-1",
            "--domain",
            "medical",
            "--stakes",
            "critical",
            "--time-pressure",
            "emergency",
            "--emotional-intensity",
            "extreme",
            "--duration",
            "90",
            "--technical",
        ],
    );
    assert_eq!(code, 0, "complexity score failed: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let total = parsed["total_complexity_score"].as_f64().unwrap();
    assert!((total - 0.875).abs() < 1e-9);

    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["routing", "recommend", "--task", "task-1"],
    );
    assert_eq!(code, 0, "routing recommend failed: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["risk_level"].as_str().unwrap(), "overload");
    assert_eq!(parsed["recommended"].as_bool().unwrap(), false);
}

#[test]
fn test_routing_missing_complexity_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["routing", "recommend", "--task", "no-such-task"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("no-such-task"));
}

#[test]
fn test_capacity_show_defaults() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["capacity", "show"]);
    assert_eq!(code, 0, "capacity show failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["available_capacity"].as_f64().unwrap(), 0.8);
    assert_eq!(parsed["optimal_break_duration"].as_u64().unwrap(), 15);
}
