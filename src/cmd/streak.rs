use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use nutritrack::core::{profile, streak};
use nutritrack::db::Database;
use nutritrack::models::config::Config;

use crate::cli::StreakAction;

pub fn run(
    action: StreakAction,
    user: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let user_id = super::require_user(&config, user)?;
    let db = Database::open(&Config::db_path())?;
    let today = super::today(date);

    let (state, current) = match action {
        StreakAction::Show => {
            let state = profile::get_user(&db, &user_id)?.streak_state();
            (state, streak::current_streak(state, today))
        }
        StreakAction::Record => {
            let state = streak::record_activity(&db, &user_id, today)?;
            (state, state.streaks)
        }
    };

    if human_flag {
        match state.last_streak {
            Some(last) => println!("Streak: {} day(s) (last logged {})", current, last),
            None => println!("Streak: 0 days (nothing logged yet)"),
        }
    } else {
        super::print_success(
            "streak",
            json!({
                "uid": user_id,
                "streaks": state.streaks,
                "last_streak": state.last_streak,
                "current": current,
            }),
        )?;
    }
    Ok(())
}
