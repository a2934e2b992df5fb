pub mod challenge;
pub mod config;
pub mod init;
pub mod log;
pub mod status;
pub mod streak;
pub mod trend;
pub mod user;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use nutritrack::error::AppError;
use nutritrack::models::config::Config;
use nutritrack::output;

/// User the command acts on: `--user`, else the configured default.
pub fn require_user(config: &Config, explicit: Option<&str>) -> Result<String> {
    config
        .resolve_user(explicit)
        .ok_or_else(|| AppError::missing("user").into())
}

pub fn today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// Entry timestamp: now, or noon UTC on an overridden date.
pub fn timestamp(date: Option<NaiveDate>) -> DateTime<Utc> {
    date.and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(Utc::now)
}

pub fn print_success(command: &str, data: Value) -> Result<()> {
    let out = output::success(command, data);
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
