use anyhow::Result;
use chrono::NaiveDate;

use nutritrack::db::Database;
use nutritrack::models::config::Config;
use nutritrack::output::human;

pub fn run(user: Option<&str>, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let user_id = super::require_user(&config, user)?;
    let db = Database::open(&Config::db_path())?;
    let status = nutritrack::core::status::compute(&db, &user_id, super::today(date))?;

    if human_flag {
        println!("{}", human::format_status(&status));
    } else {
        super::print_success("status", serde_json::to_value(&status)?)?;
    }
    Ok(())
}
