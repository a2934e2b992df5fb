use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use nutritrack::core::meal;
use nutritrack::core::trend::{self, TrendPeriod};
use nutritrack::db::Database;
use nutritrack::error::AppError;
use nutritrack::models::config::Config;
use nutritrack::models::trend::{MealType, TrendUpdate};
use nutritrack::output::human;

use crate::cli::TrendAction;

pub fn run_query(
    period: &str,
    user: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let user_id = super::require_user(&config, user)?;
    let period: TrendPeriod = period.parse()?;
    let db = Database::open(&Config::db_path())?;

    let report = trend::get_trends(
        &db,
        &user_id,
        period,
        super::today(date),
        config.display.week_starts_on.weekday(),
    )?;

    if human_flag {
        println!("{}", human::format_trends_report(&report));
    } else {
        super::print_success("trends", serde_json::to_value(&report)?)?;
    }
    Ok(())
}

pub fn run(
    action: TrendAction,
    user: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let user_id = super::require_user(&config, user)?;
    let db = Database::open(&Config::db_path())?;
    let day = super::today(date);

    match action {
        TrendAction::Update {
            calories,
            water,
            exercise,
            foods,
            meal_type,
        } => {
            let meal_type: MealType = meal_type.parse()?;
            let ts = super::timestamp(date);
            let food_entries = match foods {
                Some(raw) => meal::parse_items(&raw)?
                    .iter()
                    .map(|item| item.to_entry(meal_type, ts))
                    .collect(),
                None => Vec::new(),
            };
            let update = TrendUpdate {
                calorie_intake: calories,
                water_intake: water,
                exercise_calories: exercise,
                food_entries,
            };
            if update.is_empty() {
                return Err(AppError::Validation("nothing to update".into()).into());
            }
            let record = trend::log_daily(
                &db,
                &user_id,
                day,
                &update,
                config.display.week_starts_on.weekday(),
            )?;
            if human_flag {
                println!("{}", human::format_trend(&record));
            } else {
                super::print_success("trend", json!({ "trend": record }))?;
            }
        }
        TrendAction::Delete => {
            if !db.delete_trend(&user_id, day)? {
                return Err(
                    AppError::NotFound(format!("no trend record for {} on {}", user_id, day))
                        .into(),
                );
            }
            if human_flag {
                println!("Deleted record for {}", day);
            } else {
                super::print_success("trend", json!({ "deleted": day }))?;
            }
        }
    }
    Ok(())
}
