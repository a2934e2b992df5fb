use anyhow::Result;
use serde_json::json;

use nutritrack::core::profile;
use nutritrack::db::Database;
use nutritrack::models::config::Config;
use nutritrack::output::human;

use crate::cli::{ProfileArgs, UserAction};

pub fn run(action: UserAction, user: Option<&str>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;

    match action {
        UserAction::Create { name, id, profile: args } => {
            let id = id.or_else(|| user.map(str::to_string));
            let onboarding = args.into_patch(None);
            let u = profile::create_user(&db, id.as_deref(), &name, &config.goals, &onboarding)?;
            if human_flag {
                println!("Created: {}", human::format_user(&u));
            } else {
                super::print_success("user", json!({ "user": u }))?;
            }
        }
        UserAction::Show => {
            let user_id = super::require_user(&config, user)?;
            let u = profile::get_user(&db, &user_id)?;
            if human_flag {
                println!("{}", human::format_user(&u));
            } else {
                super::print_success("user", json!({ "user": u }))?;
            }
        }
        UserAction::List => {
            let users = db.list_users()?;
            if human_flag {
                if users.is_empty() {
                    println!("No users.");
                }
                for u in &users {
                    let marker = if config.default_user.as_deref() == Some(u.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!("{} {} ({})", marker, u.name, u.id);
                }
            } else {
                super::print_success("user", json!({ "users": users }))?;
            }
        }
        UserAction::Update { name, profile: args } => {
            let user_id = super::require_user(&config, user)?;
            let patch = ProfileArgs::into_patch(args, name);
            let u = profile::update_user(&db, &user_id, &patch)?;
            if human_flag {
                println!("Updated: {}", human::format_user(&u));
            } else {
                super::print_success("user", json!({ "user": u }))?;
            }
        }
        UserAction::Delete => {
            let user_id = super::require_user(&config, user)?;
            profile::delete_user(&db, &user_id)?;
            if human_flag {
                println!("User deleted: {}", user_id);
            } else {
                super::print_success("user", json!({ "deleted": user_id }))?;
            }
        }
    }
    Ok(())
}
