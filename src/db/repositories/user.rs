use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::{
    db::entities::{User, user},
    error::{AppError, Result},
};

pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<user::Model>> {
        User::find_by_id(id)
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn find_by_ids<C: ConnectionTrait>(
        conn: &C,
        ids: Vec<Uuid>,
    ) -> Result<Vec<user::Model>> {
        User::find()
            .filter(user::Column::Id.is_in(ids))
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        username: &str,
        email: &str,
        role: user::UserRole,
    ) -> Result<user::Model> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active = user::ActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            role: Set(role),
            created_at: Set(now),
        };

        active.insert(conn).await.map_err(AppError::DatabaseError)
    }
}
