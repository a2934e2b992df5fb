use chrono::NaiveDate;
use rusqlite::params;

use crate::error::Result;
use crate::models::trend::{DailyTrend, NutrientAverage};

use super::Database;

struct TrendRow {
    user_id: String,
    date: String,
    calorie_intake: f64,
    water_intake: f64,
    exercise_calories: f64,
    food_entries: String,
    most_eaten_foods: String,
    weekly_average: Option<String>,
    monthly_average: Option<String>,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TrendRow> {
    Ok(TrendRow {
        user_id: row.get(0)?,
        date: row.get(1)?,
        calorie_intake: row.get(2)?,
        water_intake: row.get(3)?,
        exercise_calories: row.get(4)?,
        food_entries: row.get(5)?,
        most_eaten_foods: row.get(6)?,
        weekly_average: row.get(7)?,
        monthly_average: row.get(8)?,
    })
}

fn parse_average(raw: Option<String>) -> Result<Option<NutrientAverage>> {
    match raw {
        Some(ref s) => Ok(Some(serde_json::from_str(s)?)),
        None => Ok(None),
    }
}

fn row_to_trend(r: TrendRow) -> Result<DailyTrend> {
    Ok(DailyTrend {
        user_id: r.user_id,
        date: r.date.parse()?,
        calorie_intake: r.calorie_intake,
        water_intake: r.water_intake,
        exercise_calories: r.exercise_calories,
        food_entries: serde_json::from_str(&r.food_entries)?,
        most_eaten_foods: serde_json::from_str(&r.most_eaten_foods)?,
        weekly_average: parse_average(r.weekly_average)?,
        monthly_average: parse_average(r.monthly_average)?,
    })
}

impl Database {
    pub fn get_trend(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyTrend>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, date, calorie_intake, water_intake, exercise_calories,
                    food_entries, most_eaten_foods, weekly_average, monthly_average
             FROM daily_trends WHERE user_id = ?1 AND date = ?2",
        )?;
        let mut rows = stmt.query_map(params![user_id, date.to_string()], read_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_trend(row?)?)),
            None => Ok(None),
        }
    }

    /// Records for a user with `from <= date <= to`, oldest first.
    pub fn trends_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyTrend>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, date, calorie_intake, water_intake, exercise_calories,
                    food_entries, most_eaten_foods, weekly_average, monthly_average
             FROM daily_trends
             WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date",
        )?;
        let rows = stmt.query_map(
            params![user_id, from.to_string(), to.to_string()],
            read_row,
        )?;

        let mut trends = Vec::new();
        for row in rows {
            trends.push(row_to_trend(row?)?);
        }
        tracing::debug!(user = user_id, %from, %to, count = trends.len(), "trend range loaded");
        Ok(trends)
    }

    /// Insert or replace the whole record for `(user_id, date)`.
    pub fn upsert_trend(&self, t: &DailyTrend) -> Result<()> {
        let weekly = t.weekly_average.map(|a| serde_json::to_string(&a)).transpose()?;
        let monthly = t.monthly_average.map(|a| serde_json::to_string(&a)).transpose()?;
        self.conn.execute(
            "INSERT INTO daily_trends (user_id, date, calorie_intake, water_intake,
                 exercise_calories, food_entries, most_eaten_foods, weekly_average, monthly_average)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(user_id, date) DO UPDATE SET
                 calorie_intake = excluded.calorie_intake,
                 water_intake = excluded.water_intake,
                 exercise_calories = excluded.exercise_calories,
                 food_entries = excluded.food_entries,
                 most_eaten_foods = excluded.most_eaten_foods,
                 weekly_average = excluded.weekly_average,
                 monthly_average = excluded.monthly_average",
            params![
                t.user_id,
                t.date.to_string(),
                t.calorie_intake,
                t.water_intake,
                t.exercise_calories,
                serde_json::to_string(&t.food_entries)?,
                serde_json::to_string(&t.most_eaten_foods)?,
                weekly,
                monthly,
            ],
        )?;
        tracing::debug!(user = %t.user_id, date = %t.date, "trend saved");
        Ok(())
    }

    pub fn delete_trend(&self, user_id: &str, date: NaiveDate) -> Result<bool> {
        let count = self.conn.execute(
            "DELETE FROM daily_trends WHERE user_id = ?1 AND date = ?2",
            params![user_id, date.to_string()],
        )?;
        Ok(count > 0)
    }
}
