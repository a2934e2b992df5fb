use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakState {
    pub streaks: u32,
    pub last_streak: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub calorie_goal: f64,
    pub water_goal_ml: f64,
    pub streaks: u32,
    pub last_streak: Option<NaiveDate>,
    pub age: Option<u16>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub fitness_goal: Option<String>,
    pub onboarded: bool,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(name: String, calorie_goal: f64, water_goal_ml: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            calorie_goal,
            water_goal_ml,
            streaks: 0,
            last_streak: None,
            age: None,
            gender: None,
            height_cm: None,
            weight_kg: None,
            activity_level: None,
            fitness_goal: None,
            onboarded: false,
            created_at: Utc::now(),
        }
    }

    pub fn streak_state(&self) -> StreakState {
        StreakState {
            streaks: self.streaks,
            last_streak: self.last_streak,
        }
    }

    /// Apply the overwrite-if-present fields of a patch.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(ref name) = patch.name {
            self.name = name.clone();
        }
        if let Some(v) = patch.calorie_goal {
            self.calorie_goal = v;
        }
        if let Some(v) = patch.water_goal_ml {
            self.water_goal_ml = v;
        }
        if let Some(v) = patch.age {
            self.age = Some(v);
        }
        if let Some(ref v) = patch.gender {
            self.gender = Some(v.clone());
        }
        if let Some(v) = patch.height_cm {
            self.height_cm = Some(v);
        }
        if let Some(v) = patch.weight_kg {
            self.weight_kg = Some(v);
        }
        if let Some(ref v) = patch.activity_level {
            self.activity_level = Some(v.clone());
        }
        if let Some(ref v) = patch.fitness_goal {
            self.fitness_goal = Some(v.clone());
        }
        if let Some(v) = patch.onboarded {
            self.onboarded = v;
        }
    }
}

/// Profile fields a caller may change. Streak fields are owned by the streak tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub calorie_goal: Option<f64>,
    pub water_goal_ml: Option<f64>,
    pub age: Option<u16>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub fitness_goal: Option<String>,
    pub onboarded: Option<bool>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.calorie_goal.is_none()
            && self.water_goal_ml.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height_cm.is_none()
            && self.weight_kg.is_none()
            && self.activity_level.is_none()
            && self.fitness_goal.is_none()
            && self.onboarded.is_none()
    }
}
