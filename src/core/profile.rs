use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::config::Goals;
use crate::models::user::{ProfilePatch, UserProfile};

/// Create a profile seeded with the configured goals, then apply any onboarding fields.
pub fn create_user(
    db: &Database,
    id: Option<&str>,
    name: &str,
    goals: &Goals,
    onboarding: &ProfilePatch,
) -> Result<UserProfile> {
    if name.trim().is_empty() {
        return Err(AppError::missing("name"));
    }
    let mut user = UserProfile::new(name.trim().to_string(), goals.calorie_goal, goals.water_goal_ml);
    if let Some(id) = id {
        if id.trim().is_empty() {
            return Err(AppError::missing("user id"));
        }
        if db.user_exists(id)? {
            return Err(AppError::Validation(format!("user already exists: {}", id)));
        }
        user.id = id.to_string();
    }
    user.apply(onboarding);
    db.insert_user(&user)?;
    Ok(user)
}

pub fn get_user(db: &Database, user_id: &str) -> Result<UserProfile> {
    if user_id.trim().is_empty() {
        return Err(AppError::missing("user"));
    }
    db.get_user(user_id)?
        .ok_or_else(|| AppError::NotFound(format!("user not found: {}", user_id)))
}

pub fn update_user(db: &Database, user_id: &str, patch: &ProfilePatch) -> Result<UserProfile> {
    if patch.is_empty() {
        return Err(AppError::Validation("nothing to update".into()));
    }
    let mut user = get_user(db, user_id)?;
    user.apply(patch);
    db.update_user(&user)?;
    Ok(user)
}

/// Delete a profile together with its trend records and challenges.
pub fn delete_user(db: &Database, user_id: &str) -> Result<()> {
    if !db.delete_user(user_id)? {
        return Err(AppError::NotFound(format!("user not found: {}", user_id)));
    }
    tracing::info!(user = user_id, "user deleted");
    Ok(())
}
