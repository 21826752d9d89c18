use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::{
    db::entities::{Prompt, prompt},
    error::{AppError, Result},
};

pub struct PromptRepository;

impl PromptRepository {
    pub async fn find_for_day<C: ConnectionTrait>(
        conn: &C,
        day: NaiveDate,
    ) -> Result<Option<prompt::Model>> {
        Prompt::find()
            .filter(prompt::Column::Day.eq(day))
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn find_for_days<C: ConnectionTrait>(
        conn: &C,
        days: Vec<NaiveDate>,
    ) -> Result<Vec<prompt::Model>> {
        Prompt::find()
            .filter(prompt::Column::Day.is_in(days))
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        day: NaiveDate,
        text: &str,
    ) -> Result<prompt::Model> {
        let active = prompt::ActiveModel {
            id: Set(Uuid::new_v4()),
            day: Set(day),
            text: Set(text.to_string()),
            created_at: Set(Utc::now()),
        };

        active.insert(conn).await.map_err(AppError::DatabaseError)
    }
}
