use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    Streak,
    OneTime,
}

impl std::fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Streak => write!(f, "streak"),
            Self::OneTime => write!(f, "one_time"),
        }
    }
}

impl FromStr for ChallengeKind {
    type Err = AppError;
    fn from_str(s: &str) -> Result<Self, AppError> {
        match s {
            "streak" => Ok(Self::Streak),
            "one_time" | "one-time" => Ok(Self::OneTime),
            _ => Err(AppError::Validation(format!(
                "invalid challenge type: {} (expected streak/one_time)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeCategory {
    Nutrition,
    Exercise,
    Water,
    Sleep,
}

impl std::fmt::Display for ChallengeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nutrition => write!(f, "nutrition"),
            Self::Exercise => write!(f, "exercise"),
            Self::Water => write!(f, "water"),
            Self::Sleep => write!(f, "sleep"),
        }
    }
}

impl FromStr for ChallengeCategory {
    type Err = AppError;
    fn from_str(s: &str) -> Result<Self, AppError> {
        match s {
            "nutrition" => Ok(Self::Nutrition),
            "exercise" => Ok(Self::Exercise),
            "water" => Ok(Self::Water),
            "sleep" => Ok(Self::Sleep),
            _ => Err(AppError::Validation(format!(
                "invalid challenge category: {} (expected nutrition/exercise/water/sleep)",
                s
            ))),
        }
    }
}

/// Static blueprint a new challenge is instantiated from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChallengeTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: ChallengeKind,
    pub category: ChallengeCategory,
    pub target_value: f64,
    pub reward: u32,
    pub icon: &'static str,
}

pub const TEMPLATES: &[ChallengeTemplate] = &[
    ChallengeTemplate {
        title: "Hydration Hero",
        description: "Hit your water goal 7 days in a row",
        kind: ChallengeKind::Streak,
        category: ChallengeCategory::Water,
        target_value: 7.0,
        reward: 100,
        icon: "droplet",
    },
    ChallengeTemplate {
        title: "Veggie Week",
        description: "Eat a serving of vegetables every day for a week",
        kind: ChallengeKind::Streak,
        category: ChallengeCategory::Nutrition,
        target_value: 7.0,
        reward: 120,
        icon: "carrot",
    },
    ChallengeTemplate {
        title: "Early Riser",
        description: "Sleep at least 7 hours for 5 nights straight",
        kind: ChallengeKind::Streak,
        category: ChallengeCategory::Sleep,
        target_value: 5.0,
        reward: 80,
        icon: "moon",
    },
    ChallengeTemplate {
        title: "Move It",
        description: "Work out 3 days in a row",
        kind: ChallengeKind::Streak,
        category: ChallengeCategory::Exercise,
        target_value: 3.0,
        reward: 60,
        icon: "dumbbell",
    },
    ChallengeTemplate {
        title: "Burn 500",
        description: "Burn 500 calories in a single workout",
        kind: ChallengeKind::OneTime,
        category: ChallengeCategory::Exercise,
        target_value: 500.0,
        reward: 50,
        icon: "flame",
    },
    ChallengeTemplate {
        title: "Protein Power",
        description: "Log 10 high-protein meals",
        kind: ChallengeKind::OneTime,
        category: ChallengeCategory::Nutrition,
        target_value: 10.0,
        reward: 70,
        icon: "egg",
    },
    ChallengeTemplate {
        title: "Three Litres",
        description: "Drink 3 litres of water in one day",
        kind: ChallengeKind::OneTime,
        category: ChallengeCategory::Water,
        target_value: 3000.0,
        reward: 40,
        icon: "bottle",
    },
    ChallengeTemplate {
        title: "Lights Out",
        description: "Go to bed before 11pm 3 times",
        kind: ChallengeKind::OneTime,
        category: ChallengeCategory::Sleep,
        target_value: 3.0,
        reward: 30,
        icon: "bed",
    },
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Challenge {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    pub category: ChallengeCategory,
    pub target_value: f64,
    pub current_value: f64,
    pub completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    pub start_date: NaiveDate,
    pub reward: u32,
    pub icon: String,
}

impl Challenge {
    pub fn new(
        user_id: String,
        title: String,
        kind: ChallengeKind,
        category: ChallengeCategory,
        target_value: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            title,
            description: String::new(),
            kind,
            category,
            target_value,
            current_value: 0.0,
            completed: false,
            completed_date: None,
            start_date,
            reward: 0,
            icon: String::new(),
        }
    }

    pub fn from_template(user_id: String, t: &ChallengeTemplate, start_date: NaiveDate) -> Self {
        let mut c = Self::new(
            user_id,
            t.title.to_string(),
            t.kind,
            t.category,
            t.target_value,
            start_date,
        );
        c.description = t.description.to_string();
        c.reward = t.reward;
        c.icon = t.icon.to_string();
        c
    }

    pub fn is_met(&self) -> bool {
        self.current_value >= self.target_value
    }

    pub fn apply(&mut self, patch: &ChallengePatch) {
        if let Some(ref v) = patch.title {
            self.title = v.clone();
        }
        if let Some(ref v) = patch.description {
            self.description = v.clone();
        }
        if let Some(v) = patch.target_value {
            self.target_value = v;
        }
        if let Some(v) = patch.reward {
            self.reward = v;
        }
        if let Some(ref v) = patch.icon {
            self.icon = v.clone();
        }
    }
}

/// Challenge fields open to editing. Progress and completion are not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<f64>,
    pub reward: Option<u32>,
    pub icon: Option<String>,
}

impl ChallengePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.target_value.is_none()
            && self.reward.is_none()
            && self.icon.is_none()
    }
}
