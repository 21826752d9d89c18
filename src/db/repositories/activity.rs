use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait, sea_query::OnConflict};
use uuid::Uuid;

use crate::{
    db::entities::{ActivityRead, activity_read},
    error::{AppError, Result},
};

pub struct ActivityRepository;

impl ActivityRepository {
    pub async fn watermark_for<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<Option<activity_read::Model>> {
        ActivityRead::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Last-write-wins; no ordering check against the previous value.
    pub async fn set_watermark<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        activity_id: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let active = activity_read::ActiveModel {
            user_id: Set(user_id),
            last_read_activity_id: Set(activity_id.to_string()),
            updated_at: Set(updated_at),
        };

        ActivityRead::insert(active)
            .on_conflict(
                OnConflict::column(activity_read::Column::UserId)
                    .update_columns([
                        activity_read::Column::LastReadActivityId,
                        activity_read::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(())
    }
}
