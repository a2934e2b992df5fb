use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::error::Result;
use crate::models::challenge::Challenge;

use super::Database;

struct ChallengeRow {
    id: String,
    user_id: String,
    title: String,
    description: String,
    kind: String,
    category: String,
    target_value: f64,
    current_value: f64,
    completed: bool,
    completed_date: Option<String>,
    start_date: String,
    reward: u32,
    icon: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChallengeRow> {
    Ok(ChallengeRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        kind: row.get(4)?,
        category: row.get(5)?,
        target_value: row.get(6)?,
        current_value: row.get(7)?,
        completed: row.get(8)?,
        completed_date: row.get(9)?,
        start_date: row.get(10)?,
        reward: row.get(11)?,
        icon: row.get(12)?,
    })
}

fn row_to_challenge(r: ChallengeRow) -> Result<Challenge> {
    let completed_date = match r.completed_date {
        Some(ref s) => Some(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)),
        None => None,
    };
    Ok(Challenge {
        id: r.id,
        user_id: r.user_id,
        title: r.title,
        description: r.description,
        kind: r.kind.parse()?,
        category: r.category.parse()?,
        target_value: r.target_value,
        current_value: r.current_value,
        completed: r.completed,
        completed_date,
        start_date: r.start_date.parse()?,
        reward: r.reward,
        icon: r.icon,
    })
}

const SELECT_CHALLENGE: &str = "SELECT id, user_id, title, description, kind, category,
        target_value, current_value, completed, completed_date, start_date, reward, icon
     FROM challenges";

impl Database {
    pub fn insert_challenge(&self, c: &Challenge) -> Result<()> {
        self.conn.execute(
            "INSERT INTO challenges (id, user_id, title, description, kind, category,
                 target_value, current_value, completed, completed_date, start_date, reward, icon)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                c.id,
                c.user_id,
                c.title,
                c.description,
                c.kind.to_string(),
                c.category.to_string(),
                c.target_value,
                c.current_value,
                c.completed,
                c.completed_date.map(|d| d.to_rfc3339()),
                c.start_date.to_string(),
                c.reward,
                c.icon,
            ],
        )?;
        tracing::debug!(challenge = %c.id, user = %c.user_id, "challenge inserted");
        Ok(())
    }

    pub fn get_challenge(&self, id: &str) -> Result<Option<Challenge>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1", SELECT_CHALLENGE))?;
        let mut rows = stmt.query_map(params![id], read_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_challenge(row?)?)),
            None => Ok(None),
        }
    }

    pub fn list_challenges(&self, user_id: &str, active_only: bool) -> Result<Vec<Challenge>> {
        let sql = if active_only {
            format!(
                "{} WHERE user_id = ?1 AND completed = 0 ORDER BY start_date, rowid",
                SELECT_CHALLENGE
            )
        } else {
            format!(
                "{} WHERE user_id = ?1 ORDER BY start_date, rowid",
                SELECT_CHALLENGE
            )
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id], read_row)?;

        let mut challenges = Vec::new();
        for row in rows {
            challenges.push(row_to_challenge(row?)?);
        }
        Ok(challenges)
    }

    /// Persist every mutable column of an existing challenge.
    pub fn update_challenge(&self, c: &Challenge) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE challenges SET title = ?2, description = ?3, target_value = ?4,
                 current_value = ?5, completed = ?6, completed_date = ?7, reward = ?8, icon = ?9
             WHERE id = ?1",
            params![
                c.id,
                c.title,
                c.description,
                c.target_value,
                c.current_value,
                c.completed,
                c.completed_date.map(|d| d.to_rfc3339()),
                c.reward,
                c.icon,
            ],
        )?;
        Ok(count > 0)
    }

    pub fn delete_challenge(&self, id: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM challenges WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }
}
