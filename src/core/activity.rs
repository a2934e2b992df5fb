use chrono::{NaiveDate, Weekday};

use crate::core::trend;
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::trend::{DailyTrend, TrendUpdate};

fn require_positive(what: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::Validation(format!(
            "{} amount must be positive: {}",
            what, amount
        )));
    }
    Ok(())
}

/// Add `ml` of water to the day's intake.
pub fn log_water(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
    ml: f64,
    week_start: Weekday,
) -> Result<DailyTrend> {
    require_positive("water", ml)?;
    let previous = db.get_trend(user_id, date)?.map(|t| t.water_intake).unwrap_or(0.0);
    let update = TrendUpdate {
        water_intake: Some(previous + ml),
        ..Default::default()
    };
    trend::log_daily(db, user_id, date, &update, week_start)
}

/// Add burned calories to the day's exercise total.
pub fn log_exercise(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
    kcal: f64,
    week_start: Weekday,
) -> Result<DailyTrend> {
    require_positive("exercise", kcal)?;
    let previous = db
        .get_trend(user_id, date)?
        .map(|t| t.exercise_calories)
        .unwrap_or(0.0);
    let update = TrendUpdate {
        exercise_calories: Some(previous + kcal),
        ..Default::default()
    };
    trend::log_daily(db, user_id, date, &update, week_start)
}
