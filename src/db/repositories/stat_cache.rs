use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait, sea_query::OnConflict};
use uuid::Uuid;

use crate::{
    db::entities::{StatCache, stat_cache},
    error::{AppError, Result},
};

pub struct StatCacheRepository;

impl StatCacheRepository {
    /// Last-write-wins upsert of a computed metric value.
    pub async fn upsert<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        stat_type: &str,
        value: i64,
        computed_at: DateTime<Utc>,
    ) -> Result<()> {
        let active = stat_cache::ActiveModel {
            user_id: Set(user_id),
            stat_type: Set(stat_type.to_string()),
            value: Set(value),
            computed_at: Set(computed_at),
        };

        StatCache::insert(active)
            .on_conflict(
                OnConflict::columns([stat_cache::Column::UserId, stat_cache::Column::StatType])
                    .update_columns([stat_cache::Column::Value, stat_cache::Column::ComputedAt])
                    .to_owned(),
            )
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(())
    }

    pub async fn find<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        stat_type: &str,
    ) -> Result<Option<stat_cache::Model>> {
        StatCache::find_by_id((user_id, stat_type.to_string()))
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)
    }
}
