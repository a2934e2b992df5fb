/// CLI integration tests for nutritrack.
///
/// Each test spawns the compiled binary and points `NUTRITRACK_HOME` at a
/// fresh `TempDir` so runs never touch the developer's real data.
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────────────

fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("nutritrack");
    c.env("NUTRITRACK_HOME", dir.path());
    c.env_remove("NUTRITRACK_LOG");
    c.env_remove("RUST_LOG");
    c
}

/// `init --name Tester` and return the generated user id.
fn init_user(dir: &TempDir) -> String {
    let assert = cmd_in(dir)
        .args(["init", "--name", "Tester"])
        .assert()
        .success();
    let json = parse_json(&assert);
    json["data"]["user"]["id"].as_str().unwrap().to_string()
}

fn parse_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stdout.clone();
    serde_json::from_slice(&bytes).expect("stdout is not valid JSON")
}

fn parse_stderr_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stderr.clone();
    serde_json::from_slice(&bytes).expect("stderr is not valid JSON")
}

// ── init / user ──────────────────────────────────────────────────────────────

#[test]
fn test_init_creates_config_and_default_user() {
    let dir = TempDir::new().unwrap();
    let id = init_user(&dir);
    assert!(dir.path().join("config.toml").exists());

    let config = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(config.contains(&id));

    let assert = cmd_in(&dir).args(["user", "show"]).assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["user"]["name"], "Tester");
}

#[test]
fn test_init_human_output() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["--human", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config initialized"));
}

#[test]
fn test_missing_user_is_validation_error() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir).args(["init"]).assert().success();

    let assert = cmd_in(&dir).args(["status"]).assert().failure();
    let err = parse_stderr_json(&assert);
    assert_eq!(err["status"], "error");
    assert_eq!(err["command"], "status");
    assert_eq!(err["error"]["code"], "validation_error");
    assert_eq!(err["error"]["http_status"], 400);
}

#[test]
fn test_unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);
    let assert = cmd_in(&dir)
        .args(["--user", "ghost", "water", "250"])
        .assert()
        .failure();
    let err = parse_stderr_json(&assert);
    assert_eq!(err["error"]["code"], "not_found");
    assert_eq!(err["error"]["http_status"], 404);
}

#[test]
fn test_user_create_with_explicit_id() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir).args(["init"]).assert().success();
    let assert = cmd_in(&dir)
        .args([
            "user",
            "create",
            "Bo",
            "--id",
            "bo",
            "--calorie-goal",
            "1900",
            "--onboarded",
            "true",
        ])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["user"]["id"], "bo");
    assert_eq!(json["data"]["user"]["calorie_goal"], 1900.0);
    assert_eq!(json["data"]["user"]["onboarded"], true);
}

// ── logging ──────────────────────────────────────────────────────────────────

#[test]
fn test_meal_then_trends() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);

    let assert = cmd_in(&dir)
        .args([
            "--date",
            "2026-02-10",
            "meal",
            "breakfast",
            "2x egg:78/6/0.6/5, toast:120, coffee:5",
        ])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["command"], "meal");
    assert_eq!(json["data"]["total_calories"], 281.0);
    assert_eq!(json["data"]["trend"]["date"], "2026-02-10");
    assert_eq!(
        json["data"]["trend"]["most_eaten_foods"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
    assert_eq!(json["data"]["streak"]["streaks"], 1);

    let assert = cmd_in(&dir)
        .args(["--date", "2026-02-10", "trends", "--period", "week"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["trends"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["averages"]["calories"], 281.0);
    assert_eq!(json["data"]["window"]["from"], "2026-02-08");
}

#[test]
fn test_trends_empty_window() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);
    let assert = cmd_in(&dir).args(["trends"]).assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["trends"], serde_json::json!([]));
    assert_eq!(json["data"]["most_eaten_foods"], serde_json::json!([]));
    assert_eq!(json["data"]["averages"]["water"], 0.0);
}

#[test]
fn test_invalid_period_is_rejected() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);
    let assert = cmd_in(&dir)
        .args(["trends", "--period", "decade"])
        .assert()
        .failure();
    let err = parse_stderr_json(&assert);
    assert_eq!(err["error"]["code"], "validation_error");
}

#[test]
fn test_water_write_through_and_read() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);

    cmd_in(&dir)
        .args(["--date", "2026-02-10", "water", "300"])
        .assert()
        .success();
    let assert = cmd_in(&dir)
        .args(["--date", "2026-02-10", "water", "200"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["water"]["water_ml"], 500.0);
    assert!(dir.path().join("water_cache.json").exists());

    let assert = cmd_in(&dir)
        .args(["--date", "2026-02-10", "water"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["water"]["water_ml"], 500.0);
    assert_eq!(json["data"]["water"]["reconciled"], false);
}

#[test]
fn test_trend_update_partial() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);

    cmd_in(&dir)
        .args([
            "--date",
            "2026-02-10",
            "trend",
            "update",
            "--calories",
            "1200",
            "--water",
            "800",
        ])
        .assert()
        .success();
    let assert = cmd_in(&dir)
        .args([
            "--date",
            "2026-02-10",
            "trend",
            "update",
            "--foods",
            "apple:95",
        ])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["trend"]["calorie_intake"], 1200.0);
    assert_eq!(json["data"]["trend"]["water_intake"], 800.0);
    assert_eq!(json["data"]["trend"]["food_entries"][0]["meal_type"], "snack");

    cmd_in(&dir)
        .args(["--date", "2026-02-10", "trend", "delete"])
        .assert()
        .success();
    let assert = cmd_in(&dir)
        .args(["--date", "2026-02-10", "trend", "delete"])
        .assert()
        .failure();
    assert_eq!(parse_stderr_json(&assert)["error"]["http_status"], 404);
}

// ── streaks ──────────────────────────────────────────────────────────────────

#[test]
fn test_streak_record_consecutive_days() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);

    cmd_in(&dir)
        .args(["--date", "2026-02-10", "streak", "record"])
        .assert()
        .success();
    let assert = cmd_in(&dir)
        .args(["--date", "2026-02-11", "streak", "record"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["streaks"], 2);
    assert_eq!(json["data"]["last_streak"], "2026-02-11");

    let assert = cmd_in(&dir)
        .args(["--date", "2026-02-20", "streak", "show"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["streaks"], 2);
    assert_eq!(json["data"]["current"], 0);
}

// ── challenges ───────────────────────────────────────────────────────────────

#[test]
fn test_challenge_lifecycle() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);

    let assert = cmd_in(&dir)
        .args([
            "challenge",
            "create",
            "--title",
            "Two walks",
            "--type",
            "one_time",
            "--category",
            "exercise",
            "--target",
            "2",
        ])
        .assert()
        .success();
    let json = parse_json(&assert);
    let id = json["data"]["challenge"]["id"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["challenge"]["completed"], false);

    cmd_in(&dir)
        .args(["challenge", "progress", &id])
        .assert()
        .success();
    let assert = cmd_in(&dir)
        .args(["challenge", "progress", &id])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["challenge"]["completed"], true);
    let stamped = json["data"]["challenge"]["completed_date"].clone();
    assert!(stamped.is_string());

    let assert = cmd_in(&dir)
        .args(["challenge", "progress", &id, "--set", "5"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["challenge"]["current_value"], 5.0);
    assert_eq!(json["data"]["challenge"]["completed_date"], stamped);

    let assert = cmd_in(&dir)
        .args(["challenge", "list", "--active"])
        .assert()
        .success();
    assert_eq!(
        parse_json(&assert)["data"]["challenges"]
            .as_array()
            .unwrap()
            .len(),
        0
    );

    cmd_in(&dir)
        .args(["challenge", "delete", &id])
        .assert()
        .success();
    let assert = cmd_in(&dir)
        .args(["challenge", "show", &id])
        .assert()
        .failure();
    assert_eq!(parse_stderr_json(&assert)["error"]["code"], "not_found");
}

#[test]
fn test_challenge_new_is_stable_while_active() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);

    let first = parse_json(&cmd_in(&dir).args(["challenge", "new"]).assert().success());
    assert_eq!(first["data"]["created"], true);
    let second = parse_json(&cmd_in(&dir).args(["challenge", "new"]).assert().success());
    assert_eq!(second["data"]["created"], false);
    assert_eq!(
        first["data"]["challenge"]["id"],
        second["data"]["challenge"]["id"]
    );
}

#[test]
fn test_challenge_templates_listed() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["challenge", "templates"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert!(!json["data"]["templates"].as_array().unwrap().is_empty());
}

// ── status / config ──────────────────────────────────────────────────────────

#[test]
fn test_status_human() {
    let dir = TempDir::new().unwrap();
    init_user(&dir);
    cmd_in(&dir)
        .args(["water", "500"])
        .assert()
        .success();
    cmd_in(&dir)
        .args(["--human", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Water: 500 / 2000 ml"));
}

#[test]
fn test_config_set_and_show() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir).args(["init"]).assert().success();
    cmd_in(&dir)
        .args(["config", "set", "display.week_start", "monday"])
        .assert()
        .success();
    let json = parse_json(&cmd_in(&dir).args(["config", "show"]).assert().success());
    assert_eq!(json["data"]["config"]["display"]["week_starts_on"], "monday");

    cmd_in(&dir)
        .args(["config", "set", "nope", "1"])
        .assert()
        .failure();
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nutritrack"));
}
