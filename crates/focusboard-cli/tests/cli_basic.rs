//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_focusboard"))
        .args(args)
        .env("FOCUSBOARD_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command, expect success and return stdout.
fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed {:?}: {}", args, stderr);
    stdout
}

/// Parse the JSON that follows a "... created: <id>" line.
fn created(stdout: &str) -> serde_json::Value {
    let json = stdout.split_once('\n').map(|(_, rest)| rest).unwrap_or_default();
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

#[test]
fn test_task_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(
        dir.path(),
        &["task", "add", "Write report", "--priority", "high", "--due", "2030-01-01"],
    );
    assert!(out.starts_with("Task created:"));
    let task = created(&out);
    let id = task["id"].as_str().unwrap();
    assert_eq!(task["priority"], "high");

    let toggled: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["task", "toggle", id])).unwrap();
    assert_eq!(toggled["completed"], true);
    assert!(toggled.get("completedAt").is_some());

    let pending: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["task", "list", "--pending"])).unwrap();
    assert_eq!(pending.as_array().unwrap().len(), 0);

    let all: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["task", "list"])).unwrap();
    assert_eq!(all[0]["dueStatus"], "completed");

    let out = run_cli_success(dir.path(), &["task", "delete", id]);
    assert!(out.contains("Task deleted"));
}

#[test]
fn test_blank_title_adds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["task", "add", "   "]);
    assert!(out.contains("Nothing added"));
    let all: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["task", "list"])).unwrap();
    assert!(all.as_array().unwrap().is_empty());
}

#[test]
fn test_habit_toggle_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let habit = created(&run_cli_success(dir.path(), &["habit", "add", "Read"]));
    let id = habit["id"].as_str().unwrap();
    assert_eq!(habit["streak"], 0);
    assert_eq!(habit["color"], "#3B82F6");

    let on: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["habit", "toggle", id])).unwrap();
    assert_eq!(on["streak"], 1);
    assert_eq!(on["completedDates"].as_array().unwrap().len(), 1);

    let week: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["habit", "week", id])).unwrap();
    let week = week.as_array().unwrap();
    assert_eq!(week.len(), 7);
    assert_eq!(week[6]["isCurrentDay"], true);
    assert_eq!(week[6]["completed"], true);

    let off: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["habit", "toggle", id])).unwrap();
    assert_eq!(off["streak"], 0);
    assert!(off["completedDates"].as_array().unwrap().is_empty());
}

#[test]
fn test_unknown_id_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["habit", "toggle", "nope"]);
    assert!(out.contains("Habit not found"));
}

#[test]
fn test_note_tags_are_cleaned() {
    let dir = tempfile::tempdir().unwrap();
    let note = created(&run_cli_success(
        dir.path(),
        &["note", "add", "buy milk", "--tags", "shopping, errand, "],
    ));
    assert_eq!(note["tags"], serde_json::json!(["shopping", "errand"]));
}

#[test]
fn test_stats_on_empty_board() {
    let dir = tempfile::tempdir().unwrap();
    let stats: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["stats"])).unwrap();
    assert_eq!(stats["totalTasks"], 0);
    assert_eq!(stats["taskProgress"], 0.0);
    assert_eq!(stats["habitProgress"], 0.0);
}

#[test]
fn test_timer_start_pause_reset() {
    let dir = tempfile::tempdir().unwrap();
    let status: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["timer", "status"])).unwrap();
    assert_eq!(status["isActive"], false);
    assert_eq!(status["timeLeft"], 1500);

    let out = run_cli_success(dir.path(), &["timer", "start"]);
    assert!(out.contains("timer_started"));
    let out = run_cli_success(dir.path(), &["timer", "start"]);
    assert!(!out.contains("timer_started"));

    let out = run_cli_success(dir.path(), &["timer", "pause"]);
    assert!(out.contains("timer_paused"));
    let status: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["timer", "status"])).unwrap();
    assert_eq!(status["isActive"], false);

    let out = run_cli_success(dir.path(), &["timer", "reset"]);
    assert!(out.contains("timer_reset"));
}

#[test]
fn test_timer_run_keeps_ticking_after_exit() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["timer", "run", "--seconds", "3"]);
    assert!(out.contains("24:59"));

    let status: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["timer", "status"])).unwrap();
    assert_eq!(status["isActive"], true);
    assert!(status["timeLeft"].as_u64().unwrap() <= 1498);
}

#[test]
fn test_unreadable_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "timer = [").unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["stats"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("config unreadable"), "stderr: {stderr}");
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["totalTasks"], 0);
}

#[test]
fn test_theme_toggle() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_cli_success(dir.path(), &["theme", "show"]).trim(), "light");
    assert_eq!(run_cli_success(dir.path(), &["theme", "toggle"]).trim(), "dark");
    assert_eq!(run_cli_success(dir.path(), &["theme", "show"]).trim(), "dark");
    let (_, _, code) = run_cli(dir.path(), &["theme", "set", "sepia"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "timer.focus_duration_secs"]).trim(),
        "1500"
    );
    run_cli_success(dir.path(), &["config", "set", "timer.focus_duration_secs", "600"]);
    let status: serde_json::Value =
        serde_json::from_str(&run_cli_success(dir.path(), &["timer", "status"])).unwrap();
    assert_eq!(status["timeLeft"], 600);

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "ui.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}
