//! Integration tests for the wallsync CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, run_wallsync, run_wallsync_in};

/// 1_800_000_000 is a multiple of 30, so this is 15s into the lobby cycle.
const AT_15S: &str = "1800000015000";

// ============================================================================
// state
// ============================================================================

#[test]
fn state_reports_synced_item() {
    let (stdout, _stderr, exit_code) = run_wallsync(&["state", &fixture("lobby.json"), "--at", AT_15S]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("wall:   lobby"));
    assert!(stdout.contains("item:   #1 B (video)"));
    assert!(stdout.contains("offset: 5000ms of 20000ms"));
}

#[test]
fn state_json_has_index_and_offset() {
    let (stdout, _stderr, exit_code) =
        run_wallsync(&["state", &fixture("lobby.json"), "--at", AT_15S, "--json"]);
    assert_eq!(exit_code, 0);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["wall"], "lobby");
    assert_eq!(value["current_index"], 1);
    assert_eq!(value["offset_ms"], 5000);
    assert_eq!(value["cycle_anchor_ms"], 1_800_000_015_000i64);
    assert_eq!(value["item"]["id"], "B");
}

#[test]
fn state_same_second_gives_same_answer() {
    let (early, _, _) =
        run_wallsync(&["state", &fixture("lobby.json"), "--at", "1800000015001", "--json"]);
    let (late, _, _) =
        run_wallsync(&["state", &fixture("lobby.json"), "--at", "1800000015999", "--json"]);

    let early: serde_json::Value = serde_json::from_str(&early).unwrap();
    let late: serde_json::Value = serde_json::from_str(&late).unwrap();
    assert_eq!(early["current_index"], late["current_index"]);
    assert_eq!(early["offset_ms"], late["offset_ms"]);
}

#[test]
fn state_accepts_rfc3339_and_toml() {
    // drive-thru cycle is 30s: menu [0,10) combo [10,15) dessert [15,30)
    let (stdout, _stderr, exit_code) = run_wallsync(&[
        "state",
        &fixture("drive_thru.toml"),
        "--at",
        "1970-01-01T00:00:12Z",
    ]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("#1 combo (image)"));
    assert!(stdout.contains("offset: 2000ms"));
}

#[test]
fn state_on_empty_playlist_reports_no_content() {
    let (stdout, _stderr, exit_code) = run_wallsync(&["state", &fixture("empty.json"), "--at", AT_15S]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No content"));
}

#[test]
fn state_skips_expired_and_inactive_promotions() {
    let (stdout, _stderr, exit_code) =
        run_wallsync(&["state", &fixture("promos.json"), "--at", AT_15S, "--json"]);
    assert_eq!(exit_code, 0);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["item"]["id"], "lunch");
}

#[test]
fn state_missing_playlist_fails() {
    let (_stdout, stderr, exit_code) = run_wallsync(&["state", "/nonexistent/wall.json"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Failed to load playlist"));
}

#[test]
fn state_rejects_bad_time() {
    Command::cargo_bin("wallsync")
        .unwrap()
        .args(["state", &fixture("lobby.json"), "--at", "teatime"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFC 3339"));
}

// ============================================================================
// schedule
// ============================================================================

#[test]
fn schedule_lists_upcoming_starts() {
    let (stdout, _stderr, exit_code) = run_wallsync(&[
        "schedule",
        &fixture("lobby.json"),
        "--at",
        AT_15S,
        "-n",
        "3",
        "--json",
    ]);
    assert_eq!(exit_code, 0);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let starts: Vec<(i64, &str)> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|t| (t["starts_at_ms"].as_i64().unwrap(), t["item_id"].as_str().unwrap()))
        .collect();
    assert_eq!(
        starts,
        vec![
            (1_800_000_030_000, "A"),
            (1_800_000_040_000, "B"),
            (1_800_000_060_000, "A"),
        ]
    );
}

#[test]
fn schedule_text_output_has_one_line_per_transition() {
    let (stdout, _stderr, exit_code) =
        run_wallsync(&["schedule", &fixture("lobby.json"), "--at", "0", "-n", "4"]);
    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout, @r"
    1970-01-01T00:00:10.000Z  #1 B
    1970-01-01T00:00:30.000Z  #0 A
    1970-01-01T00:00:40.000Z  #1 B
    1970-01-01T00:01:00.000Z  #0 A
    ");
}

// ============================================================================
// run / config / completions
// ============================================================================

#[test]
fn run_help_shows_usage() {
    Command::cargo_bin("wallsync")
        .unwrap()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run one display"))
        .stdout(predicate::str::contains("--wall"));
}

#[test]
fn run_without_source_fails_with_hint() {
    let (_stdout, stderr, exit_code) = run_wallsync(&["run"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("source.location"));
}

#[test]
fn config_show_prints_defaults() {
    let (stdout, _stderr, exit_code) = run_wallsync(&["config", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[display]"));
    assert!(stdout.contains("tick_interval_ms = 1000"));
    assert!(stdout.contains("poll_interval_secs = 30"));
}

#[test]
fn config_init_writes_file_once() {
    let home = TempDir::new().unwrap();

    let (stdout, _stderr, exit_code) = run_wallsync_in(home.path(), &["config", "init"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Wrote default config"));
    assert!(home.path().join("config.toml").exists());

    let (stdout, _stderr, _exit_code) = run_wallsync_in(home.path(), &["config", "init"]);
    assert!(stdout.contains("already exists"));
}

#[test]
fn config_show_reads_existing_file() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "[display]\nclock_offset_ms = 1000\n",
    )
    .unwrap();

    let (stdout, _stderr, exit_code) = run_wallsync_in(home.path(), &["config", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("clock_offset_ms = 1000"));
}

#[test]
fn completions_generate_for_bash() {
    let (stdout, _stderr, exit_code) = run_wallsync(&["completions", "bash"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("wallsync"));
}
