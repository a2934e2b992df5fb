mod common;

use chrono::Duration;
use nutritrack::core::streak::{advance_streak, record_activity};
use nutritrack::models::user::StreakState;

#[test]
fn test_consecutive_day_increments_by_one() {
    let today = common::date(2026, 3, 10);
    let state = StreakState {
        streaks: 4,
        last_streak: Some(today - Duration::days(1)),
    };
    let next = advance_streak(state, today);
    assert_eq!(next.streaks, 5);
    assert_eq!(next.last_streak, Some(today));
}

#[test]
fn test_absent_last_streak_starts_at_one() {
    let today = common::date(2026, 3, 10);
    let next = advance_streak(StreakState::default(), today);
    assert_eq!(next.streaks, 1);
    assert_eq!(next.last_streak, Some(today));

    let stale_count = StreakState {
        streaks: 9,
        last_streak: None,
    };
    assert_eq!(advance_streak(stale_count, today).streaks, 1);
}

#[test]
fn test_gap_resets_to_one() {
    let today = common::date(2026, 3, 10);
    let state = StreakState {
        streaks: 12,
        last_streak: Some(today - Duration::days(2)),
    };
    let next = advance_streak(state, today);
    assert_eq!(next.streaks, 1);
    assert_eq!(next.last_streak, Some(today));
}

#[test]
fn test_same_day_is_idempotent_but_restamps() {
    let today = common::date(2026, 3, 10);
    let first = advance_streak(
        StreakState {
            streaks: 3,
            last_streak: Some(today - Duration::days(1)),
        },
        today,
    );
    let second = advance_streak(first, today);
    assert_eq!(first.streaks, 4);
    assert_eq!(second.streaks, 4);
    assert_eq!(first.last_streak, Some(today));
    assert_eq!(second.last_streak, Some(today));
}

#[test]
fn test_two_consecutive_days_from_scratch() {
    let day1 = common::date(2026, 3, 10);
    let day2 = common::date(2026, 3, 11);
    let s1 = advance_streak(StreakState::default(), day1);
    let s2 = advance_streak(s1, day2);
    assert_eq!(s1.streaks, 1);
    assert_eq!(s2.streaks, 2);
}

#[test]
fn test_month_boundary_counts_as_consecutive() {
    let state = StreakState {
        streaks: 2,
        last_streak: Some(common::date(2026, 2, 28)),
    };
    assert_eq!(advance_streak(state, common::date(2026, 3, 1)).streaks, 3);
}

#[test]
fn test_record_activity_persists_state() {
    let (_dir, db) = common::setup_with_user();
    let day1 = common::date(2026, 3, 10);

    record_activity(&db, "alice", day1).unwrap();
    let state = record_activity(&db, "alice", day1 + Duration::days(1)).unwrap();
    assert_eq!(state.streaks, 2);

    let user = db.get_user("alice").unwrap().unwrap();
    assert_eq!(user.streaks, 2);
    assert_eq!(user.last_streak, Some(day1 + Duration::days(1)));
}

#[test]
fn test_record_activity_unknown_user_is_not_found() {
    let (_dir, db) = common::setup_db();
    let err = record_activity(&db, "ghost", common::date(2026, 3, 10)).unwrap_err();
    assert_eq!(err.http_status(), 404);
}
