use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cohere(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cohere").unwrap();
    cmd.env("HOME", home.path()).env_remove("COHERE_LOG");
    cmd
}

#[test]
fn test_simulate_one_minute_completes() {
    let home = TempDir::new().unwrap();
    cohere(&home)
        .args(["simulate", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Complete! Well done."))
        .stdout(predicate::str::contains("01:06"));
}

#[test]
fn test_simulate_json() {
    let home = TempDir::new().unwrap();
    let output = cohere(&home)
        .args(["simulate", "--seconds", "12", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["limit_minutes"].is_null());
    assert_eq!(value["events"][0]["event"], "phase");
    assert_eq!(value["events"][0]["phase"], "inhale");
    assert_eq!(value["events"][1]["at_ms"], 5500);
    assert_eq!(value["summary"]["elapsed_seconds"], 12);
}

#[test]
fn test_simulate_ignores_non_digits() {
    let home = TempDir::new().unwrap();
    let output = cohere(&home)
        .args(["sim", "-l", "1m", "-o", "json"])
        .output()
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["limit_minutes"], 1);
    assert_eq!(value["summary"]["state"], "complete");
}

#[test]
fn test_config_path_under_home() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join(".cohere").join("config.yaml");
    cohere(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_config_init_and_show() {
    let home = TempDir::new().unwrap();
    cohere(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join(".cohere").join("config.yaml").exists());

    cohere(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frame_rate: 30"));
}

#[test]
fn test_invalid_config_reports_error() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join(".cohere")).unwrap();
    std::fs::write(
        home.path().join(".cohere").join("config.yaml"),
        "session: [broken",
    )
    .unwrap();

    cohere(&home)
        .args(["simulate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    cohere(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_cohere"));
}

#[test]
fn test_start_sound_flags_conflict() {
    let home = TempDir::new().unwrap();
    cohere(&home)
        .args(["start", "--sound", "--no-sound"])
        .assert()
        .failure();
}
