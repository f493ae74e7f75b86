//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify outputs. Every test points the
//! CLI at its own preferences file so nothing touches the real config.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(config: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_tripwise"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn config_in(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("preferences.toml")
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const CANDIDATES: &str = r#"[
    {"id": "h-lux", "name": "Plaza", "price": 650.0, "rating": 4.8, "convenience": 0.9, "uniqueness": 0.7, "category": "hotel"},
    {"id": "h-mid", "name": "Midtown Inn", "price": 240.0, "rating": 4.2, "convenience": 0.8, "uniqueness": 0.3, "category": "hotel"},
    {"id": "h-cheap", "name": "Hostel", "price": 70.0, "rating": 3.6, "convenience": 0.4, "uniqueness": 0.2, "category": "hotel"},
    {"id": "f-1", "price": 320.0, "rating": 4.0, "category": "flight"}
]"#;

const ITEMS: &str = r#"[
    {
        "id": "flight",
        "kind": "flight",
        "name": "Arrive JFK",
        "location": {"name": "JFK", "coordinates": {"latitude": 40.6413, "longitude": -73.7781}, "kind": "airport"},
        "fixed_start_time": "2025-03-15T09:00:00Z",
        "duration_override_minutes": 60
    },
    {
        "id": "park",
        "kind": "activity",
        "name": "Central Park",
        "location": {"name": "Central Park", "coordinates": {"latitude": 40.7829, "longitude": -73.9654}, "kind": "activity"},
        "categories": ["outdoor"]
    }
]"#;

#[test]
fn test_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&config_in(&dir), &["estimate", "museum"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("90-180 min"), "unexpected output: {stdout}");
}

#[test]
fn test_estimate_unknown_category_is_generic() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&config_in(&dir), &["estimate", "karaoke", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["category"], "generic");
    assert_eq!(parsed["booked_minutes"], 60);
}

#[test]
fn test_travel_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        &config_in(&dir),
        &["travel", "--from", "40.7580,-73.9855", "--to", "40.7829,-73.9654", "--json"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["method"], "taxi");
    assert_eq!(parsed["uncertain"], false);
}

#[test]
fn test_travel_rejects_bad_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(&config_in(&dir), &["travel", "--from", "91,0", "--to", "0,0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_schedule_json() {
    let dir = tempfile::tempdir().unwrap();
    let items = write_file(&dir, "items.json", ITEMS);
    let (code, stdout, stderr) = run_cli(
        &config_in(&dir),
        &[
            "schedule",
            items.to_str().unwrap(),
            "--day-start",
            "2025-03-15T08:00:00Z",
            "--json",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = plan["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["computed"]["start_time"], "2025-03-15T09:00:00Z");
}

#[test]
fn test_schedule_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        &config_in(&dir),
        &["schedule", "/nonexistent/items.json", "--day-start", "2025-03-15T08:00:00Z"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_select_cost_package_picks_cheapest_hotel() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = write_file(&dir, "candidates.json", CANDIDATES);
    let (code, stdout, stderr) = run_cli(
        &config_in(&dir),
        &[
            "select",
            candidates.to_str().unwrap(),
            "--category",
            "hotel",
            "--package",
            "cost",
            "--level",
            "3",
            "--json",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    let outcome: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(outcome["state"], "auto_selected");
    assert_eq!(outcome["auto_selected"][0]["candidate"]["id"], "h-cheap");
    assert_eq!(outcome["timeout"]["timeout_ms"], 30000);
}

#[test]
fn test_select_rejects_invalid_level() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = write_file(&dir, "candidates.json", CANDIDATES);
    let (code, _, _) = run_cli(
        &config_in(&dir),
        &["select", candidates.to_str().unwrap(), "--category", "hotel", "--level", "5"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = write_file(&dir, "candidates.json", CANDIDATES);
    let (code, stdout, _) = run_cli(&config_in(&dir), &["analyze", candidates.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("confidence 0.70"), "unexpected output: {stdout}");
}

#[test]
fn test_trip_days() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&config_in(&dir), &["trip", "2025-03-15", "2025-03-17"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("arrival"));
    assert!(stdout.contains("departure"));
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_config_set_get_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let (code, stdout, _) = run_cli(&config, &["config", "get", "automation_level"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1");

    let (code, _, _) = run_cli(&config, &["config", "set", "automation_level", "4"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&config, &["config", "get", "automation_level"]);
    assert_eq!(stdout.trim(), "4");
    assert!(config.exists());

    let (code, _, _) = run_cli(&config, &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&config, &["config", "get", "automation_level"]);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(&config_in(&dir), &["config", "set", "theme", "dark"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown preference key"));
}
