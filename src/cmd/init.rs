use anyhow::Result;
use serde_json::json;

use nutritrack::core::profile;
use nutritrack::db::Database;
use nutritrack::models::config::Config;
use nutritrack::models::user::ProfilePatch;

pub fn run(name: Option<&str>, human: bool) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    let db = Database::open(&Config::db_path())?;

    let user = match name {
        Some(n) => {
            let u = profile::create_user(&db, None, n, &config.goals, &ProfilePatch::default())?;
            config.default_user = Some(u.id.clone());
            Some(u)
        }
        None => None,
    };
    config.save()?;

    if human {
        println!("Config initialized at {:?}", Config::path());
        if let Some(ref u) = user {
            println!("Default user: {} ({})", u.name, u.id);
        }
    } else {
        super::print_success(
            "init",
            json!({
                "config_path": Config::path(),
                "db_path": Config::db_path(),
                "user": user,
            }),
        )?;
    }
    Ok(())
}
