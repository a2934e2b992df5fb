//! Local per-user, per-day water counter kept next to the database.
//!
//! The store record is authoritative. Writes go to the store first and the
//! cache is then set to the stored value; reads compare the two and overwrite
//! the cache when they disagree.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::activity;
use crate::db::Database;
use crate::error::Result;

#[derive(Debug)]
pub struct WaterCache {
    path: PathBuf,
    entries: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaterReading {
    pub date: NaiveDate,
    pub water_ml: f64,
    pub cached_ml: Option<f64>,
    pub reconciled: bool,
}

fn key(user_id: &str, date: NaiveDate) -> String {
    format!("{}:{}", user_id, date)
}

impl WaterCache {
    /// Load the cache file. A missing or unreadable file yields an empty cache.
    pub fn open(path: &Path) -> Self {
        let entries = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "discarding corrupt water cache");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    pub fn get(&self, user_id: &str, date: NaiveDate) -> Option<f64> {
        self.entries.get(&key(user_id, date)).copied()
    }

    pub fn set(&mut self, user_id: &str, date: NaiveDate, ml: f64) {
        self.entries.insert(key(user_id, date), ml);
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;

        #[cfg(unix)]
        {
            use std::fs::OpenOptions;
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(contents.as_bytes())?;
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&self.path, contents)?;
        }
        Ok(())
    }
}

/// Add water through the store, then mirror the stored total into the cache.
pub fn add_water(
    db: &Database,
    cache: &mut WaterCache,
    user_id: &str,
    date: NaiveDate,
    ml: f64,
    week_start: Weekday,
) -> Result<WaterReading> {
    let cached_ml = cache.get(user_id, date);
    let record = activity::log_water(db, user_id, date, ml, week_start)?;
    cache.set(user_id, date, record.water_intake);
    cache.save()?;
    Ok(WaterReading {
        date,
        water_ml: record.water_intake,
        cached_ml,
        reconciled: true,
    })
}

/// Read the day's water total, repairing the cache if it drifted from the store.
pub fn read_water(
    db: &Database,
    cache: &mut WaterCache,
    user_id: &str,
    date: NaiveDate,
) -> Result<WaterReading> {
    let stored = db
        .get_trend(user_id, date)?
        .map(|t| t.water_intake)
        .unwrap_or(0.0);
    let cached_ml = cache.get(user_id, date);
    let in_sync = cached_ml.is_some_and(|c| (c - stored).abs() < f64::EPSILON);
    if !in_sync {
        if let Some(c) = cached_ml {
            tracing::warn!(user = user_id, %date, cached = c, stored, "water cache diverged from store");
        }
        cache.set(user_id, date, stored);
        cache.save()?;
    }
    Ok(WaterReading {
        date,
        water_ml: stored,
        cached_ml,
        reconciled: !in_sync,
    })
}
