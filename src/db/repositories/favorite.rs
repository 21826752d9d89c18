use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use crate::{
    db::{
        Database,
        entities::{Favorite, favorite},
        repositories::inserted,
    },
    error::{AppError, Result},
};

pub struct FavoriteRepository;

impl FavoriteRepository {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        submission_id: Uuid,
    ) -> Result<favorite::Model> {
        let max_order: Option<i32> = Favorite::find()
            .select_only()
            .column_as(favorite::Column::OrderNumber.max(), "max_order")
            .filter(favorite::Column::UserId.eq(user_id))
            .into_tuple()
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)?
            .flatten();

        let id = Uuid::new_v4();
        let now = Utc::now();
        let order_number = max_order.unwrap_or(0) + 1;

        let active = favorite::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            submission_id: Set(submission_id),
            order_number: Set(order_number),
            created_at: Set(now),
        };

        let result = Favorite::insert(active)
            .on_conflict(
                OnConflict::columns([favorite::Column::UserId, favorite::Column::SubmissionId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        if !inserted(&result) {
            return Err(AppError::AlreadyFavorited);
        }

        Ok(favorite::Model {
            id,
            user_id,
            submission_id,
            order_number,
            created_at: now,
        })
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, user_id: Uuid, id: Uuid) -> Result<()> {
        let favorite = Favorite::find_by_id(id)
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)?
            .ok_or(AppError::FavoriteNotFound)?;

        if favorite.user_id != user_id {
            return Err(AppError::NotFavoriteOwner);
        }

        Favorite::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(())
    }

    pub async fn list_for_user<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<Vec<favorite::Model>> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_asc(favorite::Column::OrderNumber)
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Swap the display order of two favorites owned by the same user.
    /// Both order numbers move in a single UPDATE inside one transaction,
    /// which closes the lost-update window between two concurrent swaps.
    pub async fn swap_order(
        db: &Database,
        user_id: Uuid,
        first_id: Uuid,
        second_id: Uuid,
    ) -> Result<()> {
        let txn = db.begin_transaction().await?;

        let first = Favorite::find_by_id(first_id)
            .one(&txn)
            .await
            .map_err(AppError::DatabaseError)?
            .ok_or(AppError::FavoriteNotFound)?;

        let second = Favorite::find_by_id(second_id)
            .one(&txn)
            .await
            .map_err(AppError::DatabaseError)?
            .ok_or(AppError::FavoriteNotFound)?;

        if first.user_id != user_id || second.user_id != user_id {
            txn.rollback().await.map_err(AppError::DatabaseError)?;
            return Err(AppError::NotFavoriteOwner);
        }

        Favorite::update_many()
            .col_expr(
                favorite::Column::OrderNumber,
                Expr::case(
                    Expr::col(favorite::Column::Id).eq(first.id),
                    second.order_number,
                )
                .case(
                    Expr::col(favorite::Column::Id).eq(second.id),
                    first.order_number,
                )
                .finally(Expr::col(favorite::Column::OrderNumber))
                .into(),
            )
            .filter(favorite::Column::Id.is_in([first.id, second.id]))
            .filter(favorite::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(AppError::DatabaseError)?;

        txn.commit().await.map_err(AppError::DatabaseError)?;

        Ok(())
    }
}
