use rusqlite::Connection;

use crate::error::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id             TEXT PRIMARY KEY,
            name           TEXT NOT NULL,
            calorie_goal   REAL NOT NULL,
            water_goal_ml  REAL NOT NULL,
            streaks        INTEGER NOT NULL DEFAULT 0,
            last_streak    TEXT,
            age            INTEGER,
            gender         TEXT,
            height_cm      REAL,
            weight_kg      REAL,
            activity_level TEXT,
            fitness_goal   TEXT,
            onboarded      INTEGER NOT NULL DEFAULT 0,
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS daily_trends (
            user_id           TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date              TEXT NOT NULL,
            calorie_intake    REAL NOT NULL DEFAULT 0,
            water_intake      REAL NOT NULL DEFAULT 0,
            exercise_calories REAL NOT NULL DEFAULT 0,
            food_entries      TEXT NOT NULL DEFAULT '[]',
            most_eaten_foods  TEXT NOT NULL DEFAULT '[]',
            weekly_average    TEXT,
            monthly_average   TEXT,
            PRIMARY KEY (user_id, date)
        );

        CREATE TABLE IF NOT EXISTS challenges (
            id             TEXT PRIMARY KEY,
            user_id        TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title          TEXT NOT NULL,
            description    TEXT NOT NULL DEFAULT '',
            kind           TEXT NOT NULL,
            category       TEXT NOT NULL,
            target_value   REAL NOT NULL,
            current_value  REAL NOT NULL DEFAULT 0,
            completed      INTEGER NOT NULL DEFAULT 0,
            completed_date TEXT,
            start_date     TEXT NOT NULL,
            reward         INTEGER NOT NULL DEFAULT 0,
            icon           TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_challenges_user ON challenges(user_id, completed);",
    )?;
    Ok(())
}
