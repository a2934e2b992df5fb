use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use nutritrack::core::water_cache::{self, WaterCache};
use nutritrack::core::{activity, meal};
use nutritrack::db::Database;
use nutritrack::models::config::Config;
use nutritrack::models::trend::MealType;
use nutritrack::output::human;

pub fn run_meal(
    meal_type: &str,
    items: &str,
    user: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let user_id = super::require_user(&config, user)?;
    let meal_type: MealType = meal_type.parse()?;
    let items = meal::parse_items(items)?;
    let db = Database::open(&Config::db_path())?;

    let logged = meal::log_meal(
        &db,
        &user_id,
        meal_type,
        &items,
        super::today(date),
        super::timestamp(date),
        config.display.week_starts_on.weekday(),
    )?;

    if human_flag {
        for e in &logged.entries {
            println!("Logged: {} ({:.0} kcal)", e.name, e.calories);
        }
        println!(
            "{} total: {:.0} kcal | P {:.1}g C {:.1}g F {:.1}g",
            logged.meal_type,
            logged.totals.calories,
            logged.totals.protein,
            logged.totals.carbs,
            logged.totals.fat
        );
        println!("{}", human::format_trend(&logged.trend));
        println!("Streak: {} day(s)", logged.streak.streaks);
    } else {
        super::print_success(
            "meal",
            json!({
                "meal_type": logged.meal_type,
                "entries": logged.entries,
                "total_calories": logged.totals.calories,
                "totals": logged.totals,
                "trend": logged.trend,
                "streak": logged.streak,
            }),
        )?;
    }
    Ok(())
}

pub fn run_water(
    amount: Option<f64>,
    user: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let user_id = super::require_user(&config, user)?;
    let db = Database::open(&Config::db_path())?;
    let mut cache = WaterCache::open(&Config::water_cache_path());
    let day = super::today(date);

    let reading = match amount {
        Some(ml) => water_cache::add_water(
            &db,
            &mut cache,
            &user_id,
            day,
            ml,
            config.display.week_starts_on.weekday(),
        )?,
        None => water_cache::read_water(&db, &mut cache, &user_id, day)?,
    };

    if human_flag {
        match amount {
            Some(ml) => println!("Logged: {:.0} ml water ({:.0} ml today)", ml, reading.water_ml),
            None => println!("Water {}: {:.0} ml", reading.date, reading.water_ml),
        }
    } else {
        super::print_success("water", json!({ "water": reading }))?;
    }
    Ok(())
}

pub fn run_exercise(
    kcal: f64,
    user: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let user_id = super::require_user(&config, user)?;
    let db = Database::open(&Config::db_path())?;

    let trend = activity::log_exercise(
        &db,
        &user_id,
        super::today(date),
        kcal,
        config.display.week_starts_on.weekday(),
    )?;

    if human_flag {
        println!("Logged: {:.0} kcal burned", kcal);
        println!("{}", human::format_trend(&trend));
    } else {
        super::print_success("exercise", json!({ "trend": trend }))?;
    }
    Ok(())
}
