//! Integration tests for the routine binary.
//!
//! These tests verify end-to-end behavior including:
//! - Onboarding and plan storage
//! - Day and week views
//! - Session logging and progression
//! - History, deletion and export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("routine"))
}

fn onboard(data_dir: &Path, frequency: &str, equipment: &str) {
    cli()
        .arg("onboard")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--frequency")
        .arg(frequency)
        .arg("--equipment")
        .arg(equipment)
        .assert()
        .success();
}

// 2026-10-19 is a Monday
const MONDAY: &str = "2026-10-19";
const TUESDAY: &str = "2026-10-20";

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personalized weekly training plans",
        ));
}

#[test]
fn test_today_before_onboarding_asks_for_setup() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome! (Set up Plan)"));
}

#[test]
fn test_onboard_writes_plan_document() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    onboard(data_dir, "4", "home");

    let plan_path = data_dir.join("users/default/plan.json");
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&plan_path).expect("Failed to read plan"))
            .expect("plan is JSON");

    let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["0", "1", "3", "4"]);
    assert_eq!(doc["3"]["name"], "Legs");
    assert_eq!(doc["3"]["exercises"][0]["name"], "Dumbbell Goblet Squat");
    assert!(doc["3"]["exercises"][0].get("media_ref").is_none());

    assert!(data_dir.join("users/default/profile.json").exists());
}

#[test]
fn test_onboard_rejects_unsupported_frequency() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("onboard")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--frequency")
        .arg("5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported training frequency"));

    assert!(!temp_dir.path().join("users/default/plan.json").exists());
}

#[test]
fn test_today_shows_planned_workout() {
    let temp_dir = setup_test_dir();
    onboard(temp_dir.path(), "3", "bodyweight");

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Push"))
        .stdout(predicate::str::contains("Push-Ups: 3 × 8-12"));

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(TUESDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest Day"));
}

#[test]
fn test_malformed_date_is_rejected() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg("2026-02-30")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn test_week_view() {
    let temp_dir = setup_test_dir();
    onboard(temp_dir.path(), "3", "gym");

    cli()
        .arg("week")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sun"))
        .stdout(predicate::str::contains("[P]"))
        .stdout(predicate::str::contains("→ Mon 10-19  Push"));
}

#[test]
fn test_complete_levels_up_on_second_session() {
    let temp_dir = setup_test_dir();
    onboard(temp_dir.path(), "3", "gym");

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Session logged! +50 XP"))
        .stdout(predicate::str::contains("Level up").not());

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(TUESDAY)
        .arg("--exercise")
        .arg("Jump Rope")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level up! You reached level 2"))
        .stdout(predicate::str::contains("Level 2 · 100 XP"));

    let progress = fs::read_to_string(temp_dir.path().join("users/default/progress.json"))
        .expect("Failed to read progress");
    let progress: serde_json::Value = serde_json::from_str(&progress).unwrap();
    assert_eq!(progress["experience"], 100);
    assert_eq!(progress["level"], 2);
}

#[test]
fn test_complete_rest_day_without_exercises_fails() {
    let temp_dir = setup_test_dir();
    onboard(temp_dir.path(), "3", "gym");

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(TUESDAY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing is planned"));
}

#[test]
fn test_stats_reports_streak() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--exercise")
        .arg("Plank")
        .assert()
        .success();

    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak:         1 day(s)"))
        .stdout(predicate::str::contains("Total workouts: 1"));
}

#[test]
fn test_history_and_delete() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for date in [MONDAY, TUESDAY] {
        cli()
            .arg("complete")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--date")
            .arg(date)
            .arg("--exercise")
            .arg("Plank")
            .arg("--exercise")
            .arg("Dips")
            .assert()
            .success();
    }

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Oct 20 2026  2 exercises"))
        .stdout(predicate::str::contains("Oct 19 2026  2 exercises"));

    cli()
        .arg("delete")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 session(s)"));

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Oct 19 2026").not());

    // Deleting history never takes experience away
    let progress = fs::read_to_string(data_dir.join("users/default/progress.json")).unwrap();
    assert!(progress.contains("\"experience\":100"));
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let out = data_dir.join("export/sessions.csv");

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg(MONDAY)
        .arg("--exercise")
        .arg("Bench Press")
        .assert()
        .success();

    cli()
        .arg("export")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 sessions"));

    let csv = fs::read_to_string(&out).expect("Failed to read CSV");
    assert!(csv.starts_with("id,date,exercise_count,exercises"));
    assert!(csv.contains("2026-10-19,1,Bench Press"));
}

#[test]
fn test_users_are_separate() {
    let temp_dir = setup_test_dir();
    onboard(temp_dir.path(), "3", "gym");

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--user")
        .arg("sam")
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set up Plan"));
}

#[test]
fn test_invalid_user_id_rejected() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--user")
        .arg("../escape")
        .assert()
        .failure();
}

#[test]
fn test_substitutes() {
    cli()
        .arg("substitutes")
        .arg("Bench Press")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dumbbell Press"))
        .stdout(predicate::str::contains("Push-Ups"));
}

#[test]
fn test_config_file_changes_xp() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[progression]\nxp_per_session = 120\n").unwrap();

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg("--date")
        .arg(MONDAY)
        .arg("--exercise")
        .arg("Plank")
        .assert()
        .success()
        .stdout(predicate::str::contains("+120 XP"))
        .stdout(predicate::str::contains("Level up! You reached level 2"));
}

#[test]
fn test_stats_as_of_date() {
    let temp_dir = setup_test_dir();

    for date in ["2026-10-17", "2026-10-18"] {
        cli()
            .arg("complete")
            .arg("--data-dir")
            .arg(temp_dir.path())
            .arg("--date")
            .arg(date)
            .arg("--exercise")
            .arg("Plank")
            .assert()
            .success();
    }

    // Nothing logged on Monday yet; the streak still runs through Sunday
    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak:         2 day(s)"))
        .stdout(predicate::str::contains("Weight:         not logged"));

    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(TUESDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak:         0 day(s)"));
}

#[test]
fn test_weight_logging() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for (date, kg) in [(MONDAY, "82"), ("2026-10-12", "83.5"), (MONDAY, "81.4")] {
        cli()
            .arg("weight")
            .arg("--data-dir")
            .arg(data_dir)
            .arg("--date")
            .arg(date)
            .arg("--kg")
            .arg(kg)
            .assert()
            .success()
            .stdout(predicate::str::contains("Weight logged"));
    }

    let weights: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(data_dir.join("users/default/weights.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(weights.as_array().unwrap().len(), 2);
    assert_eq!(weights[0]["date"], "2026-10-12");

    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg(MONDAY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight:         81.4 kg"))
        .stdout(predicate::str::contains("10-12  83.5 kg"));
}

#[test]
fn test_weight_must_be_positive() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("weight")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--kg=0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("weight must be a positive number"));
}

#[test]
fn test_blank_exercise_rejected() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(MONDAY)
        .arg("--exercise")
        .arg("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be blank"));

    assert!(!temp_dir.path().join("users/default/sessions.jsonl").exists());
}
