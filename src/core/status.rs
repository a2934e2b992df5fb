use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{profile, streak};
use crate::db::Database;
use crate::error::Result;
use crate::models::challenge::Challenge;
use crate::models::trend::{FoodCount, NutrientAverage};

#[derive(Serialize)]
pub struct StatusData {
    pub date: NaiveDate,
    pub user_id: String,
    pub name: String,
    pub calories: CalorieStatus,
    pub water: WaterStatus,
    pub streak: u32,
    pub most_eaten_foods: Vec<FoodCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_average: Option<NutrientAverage>,
    pub active_challenges: Vec<Challenge>,
}

#[derive(Serialize)]
pub struct CalorieStatus {
    pub intake: f64,
    pub exercise: f64,
    pub goal: f64,
    /// Goal minus intake plus exercise; negative when over budget.
    pub remaining: f64,
}

#[derive(Serialize)]
pub struct WaterStatus {
    pub intake_ml: f64,
    pub goal_ml: f64,
    pub progress_pct: Option<f64>,
}

/// Compute the dashboard overview for a user's day.
pub fn compute(db: &Database, user_id: &str, today: NaiveDate) -> Result<StatusData> {
    let user = profile::get_user(db, user_id)?;
    let record = db.get_trend(user_id, today)?;

    let (intake, exercise, water) = record
        .as_ref()
        .map(|r| (r.calorie_intake, r.exercise_calories, r.water_intake))
        .unwrap_or((0.0, 0.0, 0.0));
    let progress_pct = if user.water_goal_ml > 0.0 {
        Some((water / user.water_goal_ml * 1000.0).round() / 10.0)
    } else {
        None
    };

    Ok(StatusData {
        date: today,
        user_id: user.id.clone(),
        name: user.name.clone(),
        calories: CalorieStatus {
            intake,
            exercise,
            goal: user.calorie_goal,
            remaining: user.calorie_goal - intake + exercise,
        },
        water: WaterStatus {
            intake_ml: water,
            goal_ml: user.water_goal_ml,
            progress_pct,
        },
        streak: streak::current_streak(user.streak_state(), today),
        most_eaten_foods: record
            .as_ref()
            .map(|r| r.most_eaten_foods.clone())
            .unwrap_or_default(),
        weekly_average: record.as_ref().and_then(|r| r.weekly_average),
        active_challenges: db.list_challenges(user_id, true)?,
    })
}
