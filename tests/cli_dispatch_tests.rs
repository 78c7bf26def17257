use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_warodds")
}

fn unique_temp_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("warodds-{name}-{stamp}.{ext}"))
}

const GROUND_REQUEST: &str = r#"{
  "iterations": 200,
  "seed": 11,
  "nation_attacker": { "soldiers": 5000, "tanks": 500 },
  "nation_defender": {
    "soldiers": 1000,
    "tanks": 50,
    "highest_city_infra": 1500,
    "highest_city_population": 100000
  },
  "context": { "war_type": "ordinary" },
  "action": {
    "type": "ground",
    "attacking_soldiers": 5000,
    "attacking_tanks": 500,
    "arm_soldiers_with_munitions": true
  }
}"#;

#[test]
fn simulate_command_dispatches_and_emits_json() {
    let path = unique_temp_path("ground", "json");
    fs::write(&path, GROUND_REQUEST).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["simulate", path.to_string_lossy().as_ref()])
        .env("WARODDS_CONFIG", unique_temp_path("absent-config", "yaml"))
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("simulate should emit json");
    assert_eq!(payload["meta"]["iterations"], 200);
    assert_eq!(payload["meta"]["seed"], 11);
    assert!(payload["outcomes"]["probabilities"]["IT"].is_number());
    assert!(payload["metrics"]["money_looted"]["p50"].is_number());
    assert!(payload["assumptions"].as_array().is_some_and(|a| !a.is_empty()));

    let _ = fs::remove_file(path);
}

#[test]
fn simulate_command_accepts_yaml_and_writes_samples() {
    let request = unique_temp_path("naval", "yaml");
    let samples = unique_temp_path("samples", "csv");
    fs::write(
        &request,
        "iterations: 150\nseed: 2\n\
         nation_attacker:\n  ships: 40\n\
         nation_defender:\n  ships: 10\n\
         action:\n  type: naval\n  attacking_ships: 40\n",
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args([
            "simulate",
            request.to_string_lossy().as_ref(),
            "--parallel",
            "--workers",
            "2",
            "--samples-csv",
            samples.to_string_lossy().as_ref(),
        ])
        .env("WARODDS_CONFIG", unique_temp_path("absent-config", "yaml"))
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let csv = fs::read_to_string(&samples).expect("samples should be written");
    assert_eq!(csv.lines().count(), 151);

    let _ = fs::remove_file(request);
    let _ = fs::remove_file(samples);
}

#[test]
fn validate_command_rejects_over_committed_action() {
    let path = unique_temp_path("overcommit", "json");
    let body = GROUND_REQUEST.replace("\"attacking_tanks\": 500", "\"attacking_tanks\": 501");
    fs::write(&path, body).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_accepts_well_formed_request() {
    let path = unique_temp_path("valid", "json");
    fs::write(&path, GROUND_REQUEST).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("request valid"));

    let _ = fs::remove_file(path);
}

#[test]
fn unknown_command_prints_usage() {
    let output = Command::new(bin())
        .arg("serve")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: warodds"));
}

#[test]
fn simulate_without_request_path_is_a_usage_error() {
    let output = Command::new(bin())
        .arg("simulate")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
}
