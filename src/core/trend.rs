use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::str::FromStr;

use crate::core::dates::DateWindow;
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::trend::{DailyTrend, FoodCount, FoodEntry, NutrientAverage, TOP_FOODS, TrendUpdate};

/// Days covered by the default trend window, counted back from today.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendPeriod {
    Week,
    Month,
    #[default]
    Last30Days,
}

impl FromStr for TrendPeriod {
    type Err = AppError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "last30" | "default" => Ok(Self::Last30Days),
            _ => Err(AppError::Validation(format!(
                "invalid period: {} (expected week/month/last30)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Last30Days => write!(f, "last30"),
        }
    }
}

impl TrendPeriod {
    pub fn window(self, today: NaiveDate, week_start: Weekday) -> DateWindow {
        match self {
            Self::Week => DateWindow::week_of(today, week_start),
            Self::Month => DateWindow::month_of(today),
            Self::Last30Days => DateWindow::trailing(today, DEFAULT_WINDOW_DAYS),
        }
    }
}

/// Rank food names by how often they occur, most frequent first.
///
/// Ties keep the order in which names were first seen. Only the top
/// [`TOP_FOODS`] survive.
pub fn most_eaten<'a>(entries: impl IntoIterator<Item = &'a FoodEntry>) -> Vec<FoodCount> {
    let mut counts: Vec<FoodCount> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|c| c.name == entry.name) {
            Some(c) => c.count += 1,
            None => counts.push(FoodCount {
                name: entry.name.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_FOODS);
    counts
}

/// Merge an incoming update into a day's record, creating it when absent.
///
/// Scalars are overwritten only when the update carries them; food entries
/// are appended as given. The record's own most-eaten list is rebuilt from its
/// entries. Window averages are left untouched; see [`log_daily`].
pub fn apply_daily_update(
    existing: Option<DailyTrend>,
    user_id: &str,
    date: NaiveDate,
    update: &TrendUpdate,
) -> DailyTrend {
    let mut record = existing.unwrap_or_else(|| DailyTrend::new(user_id.to_string(), date));
    if let Some(v) = update.calorie_intake {
        record.calorie_intake = v;
    }
    if let Some(v) = update.water_intake {
        record.water_intake = v;
    }
    if let Some(v) = update.exercise_calories {
        record.exercise_calories = v;
    }
    record.food_entries.extend(update.food_entries.iter().cloned());
    record.most_eaten_foods = most_eaten(&record.food_entries);
    record
}

/// Average nutrients across the records of a window.
///
/// Calories come from each record's stored intake, while protein, carbs and
/// fat are summed from each record's food entries. Returns `None` for an empty
/// window.
pub fn window_average(records: &[DailyTrend]) -> Option<NutrientAverage> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let mut sum = NutrientAverage::default();
    for r in records {
        let (protein, carbs, fat) = r.food_totals();
        sum.calories += r.calorie_intake;
        sum.protein += protein;
        sum.carbs += carbs;
        sum.fat += fat;
    }
    Some(NutrientAverage {
        calories: sum.calories / n,
        protein: sum.protein / n,
        carbs: sum.carbs / n,
        fat: sum.fat / n,
    })
}

/// Reject a food entry carrying a NaN or infinite nutrient value.
pub fn ensure_finite_entry(entry: &FoodEntry) -> Result<()> {
    AppError::require_finite(&format!("calories of '{}'", entry.name), entry.calories)?;
    AppError::require_finite(&format!("protein of '{}'", entry.name), entry.protein)?;
    AppError::require_finite(&format!("carbs of '{}'", entry.name), entry.carbs)?;
    AppError::require_finite(&format!("fat of '{}'", entry.name), entry.fat)?;
    Ok(())
}

fn ensure_finite_average(what: &str, avg: Option<NutrientAverage>) -> Result<()> {
    if let Some(a) = avg {
        AppError::require_finite(&format!("{} calories", what), a.calories)?;
        AppError::require_finite(&format!("{} protein", what), a.protein)?;
        AppError::require_finite(&format!("{} carbs", what), a.carbs)?;
        AppError::require_finite(&format!("{} fat", what), a.fat)?;
    }
    Ok(())
}

fn ensure_finite_record(record: &DailyTrend) -> Result<()> {
    AppError::require_finite("calorie intake", record.calorie_intake)?;
    AppError::require_finite("water intake", record.water_intake)?;
    AppError::require_finite("exercise calories", record.exercise_calories)?;
    record.food_entries.iter().try_for_each(ensure_finite_entry)
}

/// Apply an update to a user's record for `date`, persist it, and refresh the
/// record's weekly and monthly averages.
///
/// The write and the average refresh commit together or not at all.
pub fn log_daily(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
    update: &TrendUpdate,
    week_start: Weekday,
) -> Result<DailyTrend> {
    let tx = db.transaction()?;
    let record = write_daily(db, user_id, date, update, week_start)?;
    tx.commit()?;
    Ok(record)
}

/// Body of [`log_daily`] for callers that already hold a transaction.
pub(crate) fn write_daily(
    db: &Database,
    user_id: &str,
    date: NaiveDate,
    update: &TrendUpdate,
    week_start: Weekday,
) -> Result<DailyTrend> {
    if !db.user_exists(user_id)? {
        return Err(AppError::NotFound(format!("user not found: {}", user_id)));
    }

    let existing = db.get_trend(user_id, date)?;
    let created = existing.is_none();
    let mut record = apply_daily_update(existing, user_id, date, update);
    ensure_finite_record(&record)?;
    db.upsert_trend(&record)?;

    let week = DateWindow::week_of(date, week_start);
    record.weekly_average = window_average(&db.trends_in_range(user_id, week.from, week.to)?);
    let month = DateWindow::month_of(date);
    record.monthly_average = window_average(&db.trends_in_range(user_id, month.from, month.to)?);
    ensure_finite_average("weekly average", record.weekly_average)?;
    ensure_finite_average("monthly average", record.monthly_average)?;
    db.upsert_trend(&record)?;

    tracing::debug!(
        user = user_id,
        %date,
        created,
        foods = record.food_entries.len(),
        "daily trend updated"
    );
    Ok(record)
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct TrendAverages {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub water: f64,
}

#[derive(Debug, Serialize)]
pub struct TrendsReport {
    pub period: String,
    pub window: DateWindow,
    pub trends: Vec<DailyTrend>,
    pub averages: TrendAverages,
    pub most_eaten_foods: Vec<FoodCount>,
}

/// Averages across a set of day records, dividing by the number of days.
///
/// Macronutrients are read from each record's stored weekly average, with a
/// missing block counting as zero.
pub fn summarize(records: &[DailyTrend]) -> TrendAverages {
    if records.is_empty() {
        return TrendAverages::default();
    }
    let n = records.len() as f64;
    let mut sum = TrendAverages::default();
    for r in records {
        let weekly = r.weekly_average.unwrap_or_default();
        sum.calories += r.calorie_intake;
        sum.water += r.water_intake;
        sum.protein += weekly.protein;
        sum.carbs += weekly.carbs;
        sum.fat += weekly.fat;
    }
    TrendAverages {
        calories: sum.calories / n,
        protein: sum.protein / n,
        carbs: sum.carbs / n,
        fat: sum.fat / n,
        water: sum.water / n,
    }
}

/// Read a user's trend records for a period together with cross-day
/// averages and the most eaten foods across the whole window.
pub fn get_trends(
    db: &Database,
    user_id: &str,
    period: TrendPeriod,
    today: NaiveDate,
    week_start: Weekday,
) -> Result<TrendsReport> {
    let window = period.window(today, week_start);
    let trends = db.trends_in_range(user_id, window.from, window.to)?;
    let averages = summarize(&trends);
    let most_eaten_foods = most_eaten(trends.iter().flat_map(|t| t.food_entries.iter()));

    Ok(TrendsReport {
        period: period.to_string(),
        window,
        trends,
        averages,
        most_eaten_foods,
    })
}
