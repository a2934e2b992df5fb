use anyhow::Result;
use serde_json::json;

use nutritrack::models::config::{Config, WeekStart};

pub fn run_show(human: bool) -> Result<()> {
    let config = Config::load()?;
    if human {
        let toml_str = toml::to_string_pretty(&config)?;
        println!("{}", toml_str);
    } else {
        super::print_success("config", json!({ "config": config }))?;
    }
    Ok(())
}

pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "default_user" => config.default_user = Some(value.to_string()),
        "log_level" => config.log_level = Some(value.to_string()),
        "goals.calories" => config.goals.calorie_goal = value.parse()?,
        "goals.water" => config.goals.water_goal_ml = value.parse()?,
        "display.week_start" => {
            config.display.week_starts_on = match value {
                "sunday" => WeekStart::Sunday,
                "monday" => WeekStart::Monday,
                _ => anyhow::bail!("display.week_start must be 'sunday' or 'monday'"),
            }
        }
        _ => anyhow::bail!("unknown config key: {}", key),
    }

    config.save()?;
    super::print_success("config", json!({ "key": key, "value": value }))
}
