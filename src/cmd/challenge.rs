use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde_json::json;

use nutritrack::core::challenge::{self, Progress};
use nutritrack::db::Database;
use nutritrack::models::challenge::{
    Challenge, ChallengeCategory, ChallengeKind, ChallengePatch, TEMPLATES,
};
use nutritrack::models::config::Config;
use nutritrack::output::human;

use crate::cli::ChallengeAction;

fn print_one(c: &Challenge, human_flag: bool) -> Result<()> {
    if human_flag {
        println!("{}", human::format_challenge(c));
        if !c.description.is_empty() {
            println!("  {}", c.description);
        }
        Ok(())
    } else {
        super::print_success("challenge", json!({ "challenge": c }))
    }
}

pub fn run(
    action: ChallengeAction,
    user: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    if let ChallengeAction::Templates = action {
        if human_flag {
            for (i, t) in TEMPLATES.iter().enumerate() {
                println!(
                    "{:>2}. {} ({}/{}, target {}, {} pts) — {}",
                    i, t.title, t.kind, t.category, t.target_value, t.reward, t.description
                );
            }
            return Ok(());
        }
        return super::print_success("challenge", json!({ "templates": TEMPLATES }));
    }

    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let today = super::today(date);

    match action {
        ChallengeAction::New => {
            let user_id = super::require_user(&config, user)?;
            let (c, created) =
                challenge::ensure_active_challenge(&db, &user_id, &mut rand::thread_rng(), today)?;
            if human_flag {
                let verb = if created { "New challenge" } else { "Active challenge" };
                println!("{}: {}", verb, human::format_challenge(&c));
            } else {
                super::print_success("challenge", json!({ "challenge": c, "created": created }))?;
            }
        }
        ChallengeAction::Create {
            template,
            title,
            kind,
            category,
            target,
            description,
            reward,
            icon,
        } => {
            let user_id = super::require_user(&config, user)?;
            let mut c = match template {
                Some(i) => Challenge::from_template(user_id, challenge::template(i)?, today),
                None => {
                    let title = title.unwrap_or_default();
                    let kind: ChallengeKind = kind.as_deref().unwrap_or_default().parse()?;
                    let category: ChallengeCategory = category.as_deref().unwrap_or_default().parse()?;
                    Challenge::new(user_id, title, kind, category, target.unwrap_or(0.0), today)
                }
            };
            c.apply(&ChallengePatch {
                description,
                reward,
                icon,
                ..Default::default()
            });
            let c = challenge::create_challenge(&db, c)?;
            print_one(&c, human_flag)?;
        }
        ChallengeAction::List { active } => {
            let user_id = super::require_user(&config, user)?;
            let challenges = challenge::list_challenges(&db, &user_id, active)?;
            if human_flag {
                if challenges.is_empty() {
                    println!("No challenges.");
                }
                for c in &challenges {
                    println!("{}", human::format_challenge(c));
                }
            } else {
                super::print_success("challenge", json!({ "challenges": challenges }))?;
            }
        }
        ChallengeAction::Show { id } => {
            let c = challenge::get_challenge(&db, &id)?;
            print_one(&c, human_flag)?;
        }
        ChallengeAction::Update {
            id,
            title,
            description,
            target,
            reward,
            icon,
        } => {
            let patch = ChallengePatch {
                title,
                description,
                target_value: target,
                reward,
                icon,
            };
            let c = challenge::update_challenge(&db, &id, &patch, Utc::now())?;
            print_one(&c, human_flag)?;
        }
        ChallengeAction::Progress { id, by, set } => {
            let progress = match set {
                Some(v) => Progress::SetAbsolute(v),
                None => Progress::Increment(by.unwrap_or(1.0)),
            };
            let c = challenge::update_progress(&db, &id, progress, Utc::now())?;
            print_one(&c, human_flag)?;
        }
        ChallengeAction::Delete { id } => {
            challenge::delete_challenge(&db, &id)?;
            if human_flag {
                println!("Challenge deleted: {}", id);
            } else {
                super::print_success("challenge", json!({ "deleted": id }))?;
            }
        }
        ChallengeAction::Templates => {}
    }
    Ok(())
}
