use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    db::{
        entities::{Submission, submission},
        repositories::inserted,
    },
    error::{AppError, Result},
};

pub struct SubmissionRepository;

impl SubmissionRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<Option<submission::Model>> {
        Submission::find_by_id(id)
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Insert the user's drawing for `day`. The (user, day) uniqueness lives
    /// in the schema; a conflict surfaces as `SubmissionExists`.
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        day: NaiveDate,
        image_url: &str,
    ) -> Result<submission::Model> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active = submission::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            day: Set(day),
            image_url: Set(image_url.to_string()),
            created_at: Set(now),
        };

        let result = Submission::insert(active)
            .on_conflict(
                OnConflict::columns([submission::Column::UserId, submission::Column::Day])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        if !inserted(&result) {
            return Err(AppError::SubmissionExists);
        }

        Ok(submission::Model {
            id,
            user_id,
            day,
            image_url: image_url.to_string(),
            created_at: now,
        })
    }

    /// All submission days for the user, most recent first.
    pub async fn days_desc<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Vec<NaiveDate>> {
        Submission::find()
            .select_only()
            .column(submission::Column::Day)
            .filter(submission::Column::UserId.eq(user_id))
            .order_by_desc(submission::Column::Day)
            .into_tuple()
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn count_by_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<u64> {
        Submission::find()
            .filter(submission::Column::UserId.eq(user_id))
            .count(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn ids_by_owner<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Vec<Uuid>> {
        Submission::find()
            .select_only()
            .column(submission::Column::Id)
            .filter(submission::Column::UserId.eq(user_id))
            .into_tuple()
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn list_by_owners<C: ConnectionTrait>(
        conn: &C,
        owner_ids: Vec<Uuid>,
    ) -> Result<Vec<submission::Model>> {
        Submission::find()
            .filter(submission::Column::UserId.is_in(owner_ids))
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }
}
