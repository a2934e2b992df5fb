use chrono::{DateTime, NaiveDate, Utc, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{streak, trend};
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::trend::{DailyTrend, FoodEntry, MealType, NutrientAverage, TrendUpdate};
use crate::models::user::StreakState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealItem {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl MealItem {
    /// Food entry for this item with nutrients scaled by quantity.
    pub fn to_entry(&self, meal_type: MealType, timestamp: DateTime<Utc>) -> FoodEntry {
        FoodEntry {
            name: self.name.clone(),
            calories: self.calories * self.quantity,
            protein: self.protein * self.quantity,
            carbs: self.carbs * self.quantity,
            fat: self.fat * self.quantity,
            meal_type,
            timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealLog {
    pub meal_type: MealType,
    pub entries: Vec<FoodEntry>,
    pub totals: NutrientAverage,
    pub trend: DailyTrend,
    pub streak: StreakState,
}

/// Parse meal items from a JSON array or the compact
/// `[<qty>x ]<name>:<kcal>[/<protein>/<carbs>/<fat>]` comma-separated form.
pub fn parse_items(input: &str) -> Result<Vec<MealItem>> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input)
            .map_err(|e| AppError::Validation(format!("invalid items JSON: {}", e)));
    }

    let re = Regex::new(
        r"^(?:(\d+(?:\.\d+)?)\s*x\s+)?(.+?)\s*:\s*(\d+(?:\.\d+)?)(?:/(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?))?$",
    )
    .map_err(|e| AppError::Validation(e.to_string()))?;

    let mut items = Vec::new();
    for raw in input.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let caps = re.captures(raw).ok_or_else(|| {
            AppError::Validation(format!(
                "invalid item: '{}' (expected [QTYx ]NAME:KCAL[/P/C/F])",
                raw
            ))
        })?;
        let num = |i: usize| -> f64 {
            caps.get(i)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0.0)
        };
        items.push(MealItem {
            name: caps[2].to_string(),
            calories: num(3),
            protein: num(4),
            carbs: num(5),
            fat: num(6),
            quantity: caps
                .get(1)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(1.0),
        });
    }
    Ok(items)
}

fn validate(items: &[MealItem]) -> Result<()> {
    if items.is_empty() {
        return Err(AppError::missing("items"));
    }
    for item in items {
        if item.name.trim().is_empty() {
            return Err(AppError::missing("item name"));
        }
        AppError::require_finite(&format!("quantity of '{}'", item.name), item.quantity)?;
        AppError::require_finite(&format!("calories of '{}'", item.name), item.calories)?;
        AppError::require_finite(&format!("protein of '{}'", item.name), item.protein)?;
        AppError::require_finite(&format!("carbs of '{}'", item.name), item.carbs)?;
        AppError::require_finite(&format!("fat of '{}'", item.name), item.fat)?;
        if item.quantity <= 0.0 {
            return Err(AppError::Validation(format!(
                "quantity must be positive for '{}'",
                item.name
            )));
        }
        if item.calories < 0.0 || item.protein < 0.0 || item.carbs < 0.0 || item.fat < 0.0 {
            return Err(AppError::Validation(format!(
                "nutrient values must not be negative for '{}'",
                item.name
            )));
        }
    }
    Ok(())
}

/// Log a meal: one food entry per item (nutrients scaled by quantity), the
/// day's calorie intake raised by the meal total, and the streak advanced.
pub fn log_meal(
    db: &Database,
    user_id: &str,
    meal_type: MealType,
    items: &[MealItem],
    date: NaiveDate,
    timestamp: DateTime<Utc>,
    week_start: Weekday,
) -> Result<MealLog> {
    validate(items)?;

    let entries: Vec<FoodEntry> = items
        .iter()
        .map(|item| item.to_entry(meal_type, timestamp))
        .collect();
    let totals = entries.iter().fold(NutrientAverage::default(), |acc, e| NutrientAverage {
        calories: acc.calories + e.calories,
        protein: acc.protein + e.protein,
        carbs: acc.carbs + e.carbs,
        fat: acc.fat + e.fat,
    });
    entries.iter().try_for_each(trend::ensure_finite_entry)?;
    AppError::require_finite("meal calories", totals.calories)?;
    AppError::require_finite("meal protein", totals.protein)?;
    AppError::require_finite("meal carbs", totals.carbs)?;
    AppError::require_finite("meal fat", totals.fat)?;

    let tx = db.transaction()?;
    let previous = db
        .get_trend(user_id, date)?
        .map(|t| t.calorie_intake)
        .unwrap_or(0.0);
    let update = TrendUpdate {
        calorie_intake: Some(previous + totals.calories),
        food_entries: entries.clone(),
        ..Default::default()
    };
    let trend = trend::write_daily(db, user_id, date, &update, week_start)?;
    let streak = streak::record_activity(db, user_id, date)?;
    tx.commit()?;

    tracing::info!(
        user = user_id,
        meal = %meal_type,
        items = entries.len(),
        calories = totals.calories,
        "meal logged"
    );
    Ok(MealLog {
        meal_type,
        entries,
        totals,
        trend,
        streak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_items_parse_with_quantity_and_macros() {
        let items = parse_items("2x boiled egg:78/6/0.6/5, toast:120").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "boiled egg");
        assert_eq!(items[0].quantity, 2.0);
        assert_eq!(items[0].calories, 78.0);
        assert_eq!(items[0].carbs, 0.6);
        assert_eq!(items[1].name, "toast");
        assert_eq!(items[1].quantity, 1.0);
        assert_eq!(items[1].protein, 0.0);
    }

    #[test]
    fn json_items_default_quantity() {
        let items = parse_items(r#"[{"name":"apple","calories":95}]"#).unwrap();
        assert_eq!(items[0].quantity, 1.0);
        assert_eq!(items[0].fat, 0.0);
    }

    #[test]
    fn malformed_item_is_a_validation_error() {
        let err = parse_items("apple").unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn empty_meal_is_rejected() {
        assert!(validate(&[]).is_err());
    }
}
