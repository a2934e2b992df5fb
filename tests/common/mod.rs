#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use nutritrack::core::profile;
use nutritrack::db::Database;
use nutritrack::models::config::Goals;
use nutritrack::models::trend::{FoodEntry, MealType};
use nutritrack::models::user::ProfilePatch;
use tempfile::TempDir;

pub const SUNDAY: Weekday = Weekday::Sun;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

/// Temporary database with one user, id `alice`.
pub fn setup_with_user() -> (TempDir, Database) {
    let (dir, db) = setup_db();
    profile::create_user(
        &db,
        Some("alice"),
        "Alice",
        &Goals::default(),
        &ProfilePatch::default(),
    )
    .unwrap();
    (dir, db)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A food entry stamped at noon UTC on `day`.
pub fn food(name: &str, calories: f64, protein: f64, carbs: f64, fat: f64, day: NaiveDate) -> FoodEntry {
    let dt = day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    FoodEntry {
        name: name.to_string(),
        calories,
        protein,
        carbs,
        fat,
        meal_type: MealType::Lunch,
        timestamp: Utc.from_utc_datetime(&dt),
    }
}
