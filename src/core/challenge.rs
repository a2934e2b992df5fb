use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::challenge::{Challenge, ChallengePatch, ChallengeTemplate, TEMPLATES};

/// Overwrite a challenge's progress with an absolute value.
///
/// The first time progress reaches the target the challenge is marked
/// completed and stamped with `now`. Later calls still move the value (it may
/// exceed the target) but never restamp the completion date.
pub fn set_absolute(mut challenge: Challenge, value: f64, now: DateTime<Utc>) -> Challenge {
    challenge.current_value = value;
    if !challenge.completed && challenge.is_met() {
        challenge.completed = true;
        challenge.completed_date = Some(now);
    }
    challenge
}

/// Record a new absolute progress value. Same as [`set_absolute`].
pub fn record_progress(challenge: Challenge, value: f64, now: DateTime<Utc>) -> Challenge {
    set_absolute(challenge, value, now)
}

/// Add `by` to a challenge's progress, with the same completion rule as [`set_absolute`].
pub fn increment(challenge: Challenge, by: f64, now: DateTime<Utc>) -> Challenge {
    let value = challenge.current_value + by;
    set_absolute(challenge, value, now)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Increment(f64),
    SetAbsolute(f64),
}

/// Load a challenge, apply progress, and persist it.
pub fn update_progress(
    db: &Database,
    challenge_id: &str,
    progress: Progress,
    now: DateTime<Utc>,
) -> Result<Challenge> {
    match progress {
        Progress::Increment(v) | Progress::SetAbsolute(v) => {
            AppError::require_finite("progress value", v)?;
        }
    }
    let challenge = get_challenge(db, challenge_id)?;
    let was_completed = challenge.completed;
    let updated = match progress {
        Progress::Increment(by) => increment(challenge, by, now),
        Progress::SetAbsolute(v) => set_absolute(challenge, v, now),
    };
    AppError::require_finite("progress value", updated.current_value)?;
    db.update_challenge(&updated)?;
    if updated.completed && !was_completed {
        tracing::info!(challenge = %updated.id, title = %updated.title, "challenge completed");
    }
    Ok(updated)
}

pub fn get_challenge(db: &Database, challenge_id: &str) -> Result<Challenge> {
    if challenge_id.trim().is_empty() {
        return Err(AppError::missing("challenge id"));
    }
    db.get_challenge(challenge_id)?
        .ok_or_else(|| AppError::NotFound(format!("challenge not found: {}", challenge_id)))
}

fn require_user(db: &Database, user_id: &str) -> Result<()> {
    if !db.user_exists(user_id)? {
        return Err(AppError::NotFound(format!("user not found: {}", user_id)));
    }
    Ok(())
}

fn require_target(target: f64) -> Result<()> {
    if !target.is_finite() || target <= 0.0 {
        return Err(AppError::Validation(format!(
            "target value must be a positive number: {}",
            target
        )));
    }
    Ok(())
}

pub fn template(index: usize) -> Result<&'static ChallengeTemplate> {
    TEMPLATES.get(index).ok_or_else(|| {
        AppError::Validation(format!(
            "unknown template: {} (expected 0..{})",
            index,
            TEMPLATES.len() - 1
        ))
    })
}

/// Persist a new challenge for its user.
pub fn create_challenge(db: &Database, challenge: Challenge) -> Result<Challenge> {
    if challenge.title.trim().is_empty() {
        return Err(AppError::missing("title"));
    }
    require_target(challenge.target_value)?;
    require_user(db, &challenge.user_id)?;
    db.insert_challenge(&challenge)?;
    Ok(challenge)
}

/// Return the user's oldest active challenge, or start a random one when none is active.
///
/// The boolean is `true` when a new challenge was created.
pub fn ensure_active_challenge<R: Rng + ?Sized>(
    db: &Database,
    user_id: &str,
    rng: &mut R,
    today: NaiveDate,
) -> Result<(Challenge, bool)> {
    require_user(db, user_id)?;
    if let Some(active) = db.list_challenges(user_id, true)?.into_iter().next() {
        return Ok((active, false));
    }
    let t = TEMPLATES
        .choose(rng)
        .ok_or_else(|| AppError::Validation("no challenge templates available".into()))?;
    let challenge = Challenge::from_template(user_id.to_string(), t, today);
    db.insert_challenge(&challenge)?;
    tracing::info!(user = user_id, title = t.title, "challenge generated");
    Ok((challenge, true))
}

pub fn list_challenges(db: &Database, user_id: &str, active_only: bool) -> Result<Vec<Challenge>> {
    db.list_challenges(user_id, active_only)
}

/// Patch a challenge's descriptive fields and target.
///
/// A lowered target that the current progress already meets completes the
/// challenge, stamped with `now`.
pub fn update_challenge(
    db: &Database,
    challenge_id: &str,
    patch: &ChallengePatch,
    now: DateTime<Utc>,
) -> Result<Challenge> {
    if patch.is_empty() {
        return Err(AppError::Validation("nothing to update".into()));
    }
    if let Some(t) = patch.target_value {
        require_target(t)?;
    }
    let mut challenge = get_challenge(db, challenge_id)?;
    let was_completed = challenge.completed;
    challenge.apply(patch);
    let current = challenge.current_value;
    let challenge = set_absolute(challenge, current, now);
    db.update_challenge(&challenge)?;
    if challenge.completed && !was_completed {
        tracing::info!(challenge = %challenge.id, title = %challenge.title, "challenge completed");
    }
    Ok(challenge)
}

pub fn delete_challenge(db: &Database, challenge_id: &str) -> Result<()> {
    if challenge_id.trim().is_empty() {
        return Err(AppError::missing("challenge id"));
    }
    if !db.delete_challenge(challenge_id)? {
        return Err(AppError::NotFound(format!("challenge not found: {}", challenge_id)));
    }
    Ok(())
}
