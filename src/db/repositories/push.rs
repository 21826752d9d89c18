use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    db::entities::{PushSubscription, push_subscription},
    error::{AppError, Result},
};

pub struct PushRepository;

impl PushRepository {
    /// Subscribing the same endpoint again refreshes its keys.
    pub async fn subscribe<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
    ) -> Result<()> {
        let active = push_subscription::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            endpoint: Set(endpoint.to_string()),
            p256dh: Set(p256dh.to_string()),
            auth: Set(auth.to_string()),
            created_at: Set(Utc::now()),
        };

        PushSubscription::insert(active)
            .on_conflict(
                OnConflict::columns([
                    push_subscription::Column::UserId,
                    push_subscription::Column::Endpoint,
                ])
                .update_columns([
                    push_subscription::Column::P256dh,
                    push_subscription::Column::Auth,
                ])
                .to_owned(),
            )
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(())
    }

    pub async fn unsubscribe<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        endpoint: &str,
    ) -> Result<u64> {
        let result = PushSubscription::delete_many()
            .filter(push_subscription::Column::UserId.eq(user_id))
            .filter(push_subscription::Column::Endpoint.eq(endpoint))
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(result.rows_affected)
    }

    pub async fn list_for_user<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<Vec<push_subscription::Model>> {
        PushSubscription::find()
            .filter(push_subscription::Column::UserId.eq(user_id))
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }
}
