use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    db::{
        entities::{Reaction, User, reaction, user},
        repositories::inserted,
    },
    error::{AppError, Result},
};

pub struct ReactionRepository;

impl ReactionRepository {
    pub async fn find_by_key<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        content_type: reaction::ContentType,
        content_id: Uuid,
        reaction_id: &str,
    ) -> Result<Option<reaction::Model>> {
        Reaction::find()
            .filter(reaction::Column::UserId.eq(user_id))
            .filter(reaction::Column::ContentType.eq(content_type))
            .filter(reaction::Column::ContentId.eq(content_id))
            .filter(reaction::Column::ReactionId.eq(reaction_id))
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Insert-ignore on the toggle key. Returns the created row, or None if
    /// a concurrent request already holds the key.
    pub async fn try_create<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        content_type: reaction::ContentType,
        content_id: Uuid,
        reaction_id: &str,
    ) -> Result<Option<reaction::Model>> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active = reaction::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            content_type: Set(content_type.clone()),
            content_id: Set(content_id),
            reaction_id: Set(reaction_id.to_string()),
            created_at: Set(now),
        };

        let result = Reaction::insert(active)
            .on_conflict(
                OnConflict::columns([
                    reaction::Column::UserId,
                    reaction::Column::ContentType,
                    reaction::Column::ContentId,
                    reaction::Column::ReactionId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        if !inserted(&result) {
            return Ok(None);
        }

        Ok(Some(reaction::Model {
            id,
            user_id,
            content_type,
            content_id,
            reaction_id: reaction_id.to_string(),
            created_at: now,
        }))
    }

    pub async fn delete_by_key<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        content_type: reaction::ContentType,
        content_id: Uuid,
        reaction_id: &str,
    ) -> Result<u64> {
        let result = Reaction::delete_many()
            .filter(reaction::Column::UserId.eq(user_id))
            .filter(reaction::Column::ContentType.eq(content_type))
            .filter(reaction::Column::ContentId.eq(content_id))
            .filter(reaction::Column::ReactionId.eq(reaction_id))
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(result.rows_affected)
    }

    pub async fn count_given<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<u64> {
        Reaction::find()
            .filter(reaction::Column::UserId.eq(user_id))
            .count(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn count_on_content<C: ConnectionTrait>(
        conn: &C,
        content_type: reaction::ContentType,
        content_ids: Vec<Uuid>,
    ) -> Result<u64> {
        if content_ids.is_empty() {
            return Ok(0);
        }

        Reaction::find()
            .filter(reaction::Column::ContentType.eq(content_type))
            .filter(reaction::Column::ContentId.is_in(content_ids))
            .count(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Submission reactions on the given submissions created at or after
    /// `since`, paired with the acting user's profile row.
    pub async fn list_since_on_submissions<C: ConnectionTrait>(
        conn: &C,
        submission_ids: Vec<Uuid>,
        since: DateTime<Utc>,
    ) -> Result<Vec<(reaction::Model, Option<user::Model>)>> {
        Reaction::find()
            .find_also_related(User)
            .filter(reaction::Column::ContentType.eq(reaction::ContentType::Submission))
            .filter(reaction::Column::ContentId.is_in(submission_ids))
            .filter(reaction::Column::CreatedAt.gte(since))
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }
}
