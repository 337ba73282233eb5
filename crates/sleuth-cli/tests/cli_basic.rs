//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated HOME and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against a private home directory and return output.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_sleuth"))
        .args(args)
        .env("HOME", home)
        .env_remove("SLEUTH_ENV")
        .env_remove("SLEUTH_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_timer_format() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["timer", "format", "125"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2:05");
}

#[test]
fn test_timer_run_counts_down_to_time_up() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["timer", "run", "--seconds", "3", "--tick-millis", "10"],
    );
    assert_eq!(code, 0, "timer run failed");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, ["0:03", "0:02", "0:01", "time up"]);
}

#[test]
fn test_timer_run_json_ends_with_time_up() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["timer", "run", "--seconds", "2", "--tick-millis", "10", "--json"],
    );
    assert_eq!(code, 0);
    let last = stdout.lines().last().expect("no output");
    let event = parse_json(last);
    assert_eq!(event["type"], "TimeUp");
    assert_eq!(event["cause"], "countdown");
}

#[test]
fn test_timer_run_rejects_zero_seconds() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["timer", "run", "--seconds", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("at least one second"));
}

#[test]
fn test_trust_show_tiers() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["trust", "show", "85"]);
    assert_eq!(code, 0);
    let report = parse_json(&stdout);
    assert_eq!(report["tier"], "strong");
    assert_eq!(report["caveat"], false);

    let (_, stdout, _) = run_cli(home.path(), &["trust", "show", "10", "--shady"]);
    assert_eq!(parse_json(&stdout)["tier"], "alert");

    let (_, stdout, _) = run_cli(home.path(), &["trust", "show", "-5"]);
    let report = parse_json(&stdout);
    assert_eq!(report["trust"], 0);
    assert_eq!(report["hidden_aspect_opacity"], 1.0);
}

#[test]
fn test_trust_render_appends_caveat() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "trust",
            "render",
            "--trust",
            "25",
            "--question",
            "Who rang the bell?",
            "--response",
            "The gardener.",
        ],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Weak trust"));
    assert!(stdout.contains("A: The gardener. (Partner's confidence is low."));
}

#[test]
fn test_trust_render_hides_diagnostics_outside_dev() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "trust", "render", "--trust", "90", "--question", "Q", "--response", "A",
            "--shady", "--note", "planted", "--json",
        ],
    );
    assert_eq!(code, 0);
    let shown = parse_json(&stdout);
    assert_eq!(shown["tier"], "alert");
    assert!(shown.get("diagnostic_note").is_none());
}

#[test]
fn test_play_applies_time_up_penalty() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["play", "--seconds", "2", "--trust", "45", "--tick-millis", "10"],
    );
    assert_eq!(code, 0);
    let report = parse_json(&stdout);
    assert_eq!(report["outcome"]["trust_before"], 45);
    assert_eq!(report["outcome"]["trust_after"], 35);
    assert_eq!(report["progress"]["time_ups"], 1);
}

#[test]
fn test_play_wrong_answers_can_end_episode() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["play", "--seconds", "20", "--wrong-answers", "1"],
    );
    assert_eq!(code, 0);
    let report = parse_json(&stdout);
    assert_eq!(report["outcome"]["cause"], "adjustment");
    assert_eq!(report["progress"]["penalties_applied"], 1);
}

#[test]
fn test_play_finishes_when_penalties_flood_the_clock() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        home.path(),
        &[
            "play", "--seconds", "300", "--wrong-answers", "100", "--tick-millis", "10",
        ],
    );
    assert_eq!(code, 0, "play failed: {stderr}");
    let report = parse_json(&stdout);
    assert_eq!(report["outcome"]["cause"], "adjustment");
    assert_eq!(report["progress"]["penalties_applied"], 100);
    assert_eq!(report["progress"]["time_ups"], 1);
}

#[test]
fn test_config_set_get_roundtrip() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "timer.tick_millis"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1000");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "episode.time_limit_secs", "90"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "episode.time_limit_secs"]);
    assert_eq!(stdout.trim(), "90");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));
}
