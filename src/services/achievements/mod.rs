pub mod catalog;

pub use catalog::{Achievement, CATALOG, Reward};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::{
    AppState,
    db::repositories::AchievementRepository,
    error::Result,
    services::stats::{self, StatKind, UserStats},
};

/// Catalog entry joined with the user's unlock state, for display.
#[derive(Clone, Copy, Debug)]
pub struct AchievementStatus {
    pub achievement: &'static Achievement,
    pub achieved_at: Option<DateTime<Utc>>,
}

/// One-time backfill gate. The first call for a user evaluates the whole
/// catalog against fresh stats; any later call is a no-op. Two concurrent
/// first calls may both run the backfill, which is safe because unlock
/// inserts are idempotent.
pub async fn evaluate_once(state: &AppState, user_id: Uuid) -> Result<()> {
    let conn = state.db.connection();

    if AchievementRepository::backfill_done(conn, user_id).await? {
        return Ok(());
    }

    let user_stats = stats::compute_all(state, user_id).await?;
    unlock_met(conn, user_id, &user_stats, CATALOG.iter()).await?;

    AchievementRepository::try_mark_backfilled(conn, user_id, Utc::now()).await?;

    Ok(())
}

/// Re-evaluate only the achievements triggered by the given fields, after an
/// event that can only have moved those metrics.
pub async fn evaluate_by_fields(
    state: &AppState,
    user_id: Uuid,
    fields: &[StatKind],
) -> Result<()> {
    let targets: Vec<&'static Achievement> = catalog::with_fields(fields).collect();
    if targets.is_empty() {
        return Ok(());
    }

    let mut user_stats = UserStats::default();
    for kind in fields {
        user_stats.set(*kind, stats::compute(state, user_id, *kind).await?);
    }

    unlock_met(state.db.connection(), user_id, &user_stats, targets.into_iter()).await
}

/// Never mutates state: the full catalog with unlock timestamps, None where
/// unearned.
pub async fn list_with_rewards(state: &AppState, user_id: Uuid) -> Result<Vec<AchievementStatus>> {
    let unlocks = AchievementRepository::unlocks_for(state.db.connection(), user_id).await?;

    let achieved: HashMap<String, DateTime<Utc>> = unlocks
        .into_iter()
        .map(|unlock| (unlock.achievement_id, unlock.achieved_at))
        .collect();

    Ok(CATALOG
        .iter()
        .map(|achievement| AchievementStatus {
            achievement,
            achieved_at: achieved.get(achievement.id).copied(),
        })
        .collect())
}

async fn unlock_met<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    user_stats: &UserStats,
    achievements: impl Iterator<Item = &'static Achievement>,
) -> Result<()> {
    let now = Utc::now();

    for achievement in achievements {
        if user_stats.get(achievement.field) < achievement.threshold {
            continue;
        }

        let won = AchievementRepository::try_unlock(conn, user_id, achievement.id, now).await?;
        if won {
            tracing::info!(
                user_id = %user_id,
                achievement = achievement.id,
                "Achievement unlocked"
            );
        }
    }

    Ok(())
}
