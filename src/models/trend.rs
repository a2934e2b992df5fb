use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;

/// Number of foods kept in a most-eaten ranking.
pub const TOP_FOODS: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakfast => write!(f, "breakfast"),
            Self::Lunch => write!(f, "lunch"),
            Self::Dinner => write!(f, "dinner"),
            Self::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for MealType {
    type Err = AppError;
    fn from_str(s: &str) -> Result<Self, AppError> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            _ => Err(AppError::Validation(format!(
                "invalid meal type: {} (expected breakfast/lunch/dinner/snack)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    pub meal_type: MealType,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NutrientAverage {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// One user's nutrition, water and exercise aggregate for a calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTrend {
    pub user_id: String,
    pub date: NaiveDate,
    pub calorie_intake: f64,
    pub water_intake: f64,
    pub exercise_calories: f64,
    pub food_entries: Vec<FoodEntry>,
    pub most_eaten_foods: Vec<FoodCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_average: Option<NutrientAverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_average: Option<NutrientAverage>,
}

impl DailyTrend {
    pub fn new(user_id: String, date: NaiveDate) -> Self {
        Self {
            user_id,
            date,
            calorie_intake: 0.0,
            water_intake: 0.0,
            exercise_calories: 0.0,
            food_entries: Vec::new(),
            most_eaten_foods: Vec::new(),
            weekly_average: None,
            monthly_average: None,
        }
    }

    /// Protein, carbs and fat summed over this day's food entries.
    pub fn food_totals(&self) -> (f64, f64, f64) {
        self.food_entries.iter().fold((0.0, 0.0, 0.0), |acc, f| {
            (acc.0 + f.protein, acc.1 + f.carbs, acc.2 + f.fat)
        })
    }
}

/// Partial update for a day's record. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendUpdate {
    #[serde(default)]
    pub calorie_intake: Option<f64>,
    #[serde(default)]
    pub water_intake: Option<f64>,
    #[serde(default)]
    pub exercise_calories: Option<f64>,
    #[serde(default)]
    pub food_entries: Vec<FoodEntry>,
}

impl TrendUpdate {
    pub fn is_empty(&self) -> bool {
        self.calorie_intake.is_none()
            && self.water_intake.is_none()
            && self.exercise_calories.is_none()
            && self.food_entries.is_empty()
    }
}
