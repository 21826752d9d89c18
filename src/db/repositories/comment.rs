use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect,
};
use uuid::Uuid;

use crate::{
    db::entities::{Comment, User, comment, user},
    error::{AppError, Result},
};

pub struct CommentRepository;

impl CommentRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        submission_id: Uuid,
        user_id: Uuid,
        text: &str,
    ) -> Result<comment::Model> {
        let active = comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            submission_id: Set(submission_id),
            user_id: Set(user_id),
            text: Set(text.to_string()),
            created_at: Set(Utc::now()),
        };

        active.insert(conn).await.map_err(AppError::DatabaseError)
    }

    pub async fn count_by_author<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<u64> {
        Comment::find()
            .filter(comment::Column::UserId.eq(user_id))
            .count(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn ids_by_author<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Vec<Uuid>> {
        Comment::find()
            .select_only()
            .column(comment::Column::Id)
            .filter(comment::Column::UserId.eq(user_id))
            .into_tuple()
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Comments on the given submissions created at or after `since`, paired
    /// with the author's profile row.
    pub async fn list_since_on_submissions<C: ConnectionTrait>(
        conn: &C,
        submission_ids: Vec<Uuid>,
        since: DateTime<Utc>,
    ) -> Result<Vec<(comment::Model, Option<user::Model>)>> {
        Comment::find()
            .find_also_related(User)
            .filter(comment::Column::SubmissionId.is_in(submission_ids))
            .filter(comment::Column::CreatedAt.gte(since))
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }
}
