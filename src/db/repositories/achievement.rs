use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    db::{
        entities::{AchievementCheck, AchievementUnlock, achievement_check, achievement_unlock},
        repositories::inserted,
    },
    error::{AppError, Result},
};

pub struct AchievementRepository;

impl AchievementRepository {
    /// Record an unlock. Duplicate attempts are silent no-ops, which is what
    /// makes concurrent evaluations safe. Returns whether this call won.
    pub async fn try_unlock<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        achievement_id: &str,
        achieved_at: DateTime<Utc>,
    ) -> Result<bool> {
        let active = achievement_unlock::ActiveModel {
            user_id: Set(user_id),
            achievement_id: Set(achievement_id.to_string()),
            achieved_at: Set(achieved_at),
        };

        let result = AchievementUnlock::insert(active)
            .on_conflict(
                OnConflict::columns([
                    achievement_unlock::Column::UserId,
                    achievement_unlock::Column::AchievementId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(inserted(&result))
    }

    pub async fn unlocks_for<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<Vec<achievement_unlock::Model>> {
        AchievementUnlock::find()
            .filter(achievement_unlock::Column::UserId.eq(user_id))
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn backfill_done<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<bool> {
        let check = AchievementCheck::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(check.is_some())
    }

    pub async fn try_mark_backfilled<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        checked_at: DateTime<Utc>,
    ) -> Result<bool> {
        let active = achievement_check::ActiveModel {
            user_id: Set(user_id),
            checked_at: Set(checked_at),
        };

        let result = AchievementCheck::insert(active)
            .on_conflict(
                OnConflict::column(achievement_check::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(inserted(&result))
    }
}
