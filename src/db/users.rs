use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{OptionalExtension, params};

use crate::error::Result;
use crate::models::user::{StreakState, UserProfile};

use super::Database;

const USER_COLUMNS: &str = "id, name, calorie_goal, water_goal_ml, streaks, last_streak, age, gender,
     height_cm, weight_kg, activity_level, fitness_goal, onboarded, created_at";

struct UserRow {
    id: String,
    name: String,
    calorie_goal: f64,
    water_goal_ml: f64,
    streaks: u32,
    last_streak: Option<String>,
    age: Option<u16>,
    gender: Option<String>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    activity_level: Option<String>,
    fitness_goal: Option<String>,
    onboarded: bool,
    created_at: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        calorie_goal: row.get(2)?,
        water_goal_ml: row.get(3)?,
        streaks: row.get(4)?,
        last_streak: row.get(5)?,
        age: row.get(6)?,
        gender: row.get(7)?,
        height_cm: row.get(8)?,
        weight_kg: row.get(9)?,
        activity_level: row.get(10)?,
        fitness_goal: row.get(11)?,
        onboarded: row.get(12)?,
        created_at: row.get(13)?,
    })
}

fn row_to_user(r: UserRow) -> Result<UserProfile> {
    let last_streak = match r.last_streak {
        Some(ref s) => Some(s.parse::<NaiveDate>()?),
        None => None,
    };
    let created_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc);
    Ok(UserProfile {
        id: r.id,
        name: r.name,
        calorie_goal: r.calorie_goal,
        water_goal_ml: r.water_goal_ml,
        streaks: r.streaks,
        last_streak,
        age: r.age,
        gender: r.gender,
        height_cm: r.height_cm,
        weight_kg: r.weight_kg,
        activity_level: r.activity_level,
        fitness_goal: r.fitness_goal,
        onboarded: r.onboarded,
        created_at,
    })
}

impl Database {
    pub fn insert_user(&self, u: &UserProfile) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO users ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                USER_COLUMNS
            ),
            params![
                u.id,
                u.name,
                u.calorie_goal,
                u.water_goal_ml,
                u.streaks,
                u.last_streak.map(|d| d.to_string()),
                u.age,
                u.gender,
                u.height_cm,
                u.weight_kg,
                u.activity_level,
                u.fitness_goal,
                u.onboarded,
                u.created_at.to_rfc3339(),
            ],
        )?;
        tracing::debug!(user = %u.id, "user inserted");
        Ok(())
    }

    pub fn get_user(&self, id: &str) -> Result<Option<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS))?;
        let row = stmt.query_row(params![id], read_row).optional()?;
        row.map(row_to_user).transpose()
    }

    pub fn list_users(&self) -> Result<Vec<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM users ORDER BY created_at", USER_COLUMNS))?;
        let rows = stmt.query_map([], read_row)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row_to_user(row?)?);
        }
        Ok(users)
    }

    pub fn user_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Write the editable profile fields. Streak columns are left alone.
    pub fn update_user(&self, u: &UserProfile) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE users SET name = ?2, calorie_goal = ?3, water_goal_ml = ?4, age = ?5,
                gender = ?6, height_cm = ?7, weight_kg = ?8, activity_level = ?9,
                fitness_goal = ?10, onboarded = ?11
             WHERE id = ?1",
            params![
                u.id,
                u.name,
                u.calorie_goal,
                u.water_goal_ml,
                u.age,
                u.gender,
                u.height_cm,
                u.weight_kg,
                u.activity_level,
                u.fitness_goal,
                u.onboarded,
            ],
        )?;
        Ok(count > 0)
    }

    pub fn save_streak(&self, user_id: &str, state: &StreakState) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE users SET streaks = ?2, last_streak = ?3 WHERE id = ?1",
            params![user_id, state.streaks, state.last_streak.map(|d| d.to_string())],
        )?;
        Ok(count > 0)
    }

    pub fn delete_user(&self, id: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }
}
