use chrono::{Duration, NaiveDate};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::user::StreakState;

/// Advance a daily logging streak to `today`.
///
/// Logging the day after the last stamp extends the streak, logging again on
/// the same day leaves the count alone, and anything else starts over at 1.
/// The stamp always moves to `today`.
pub fn advance_streak(state: StreakState, today: NaiveDate) -> StreakState {
    let yesterday = today - Duration::days(1);
    let streaks = match state.last_streak {
        Some(last) if last == yesterday => state.streaks.saturating_add(1),
        Some(last) if last == today => state.streaks,
        _ => 1,
    };
    StreakState {
        streaks,
        last_streak: Some(today),
    }
}

/// Streak as the dashboard should show it: a stamp older than yesterday is a broken streak.
pub fn current_streak(state: StreakState, today: NaiveDate) -> u32 {
    match state.last_streak {
        Some(last) if last >= today - Duration::days(1) => state.streaks,
        _ => 0,
    }
}

/// Record today's qualifying activity for a user and persist the new streak.
pub fn record_activity(db: &Database, user_id: &str, today: NaiveDate) -> Result<StreakState> {
    let user = db
        .get_user(user_id)?
        .ok_or_else(|| AppError::NotFound(format!("user not found: {}", user_id)))?;
    let before = user.streak_state();
    let after = advance_streak(before, today);
    db.save_streak(user_id, &after)?;
    if after.streaks != before.streaks {
        tracing::info!(user = user_id, from = before.streaks, to = after.streaks, "streak advanced");
    }
    Ok(after)
}
