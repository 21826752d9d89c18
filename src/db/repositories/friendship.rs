use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    db::{
        entities::{Friendship, friendship},
        repositories::inserted,
    },
    error::{AppError, Result},
};

pub struct FriendshipRepository;

impl FriendshipRepository {
    /// An edge may be stored in either direction; check both.
    pub async fn exists_between<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<bool> {
        let edge = Friendship::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(friendship::Column::UserId.eq(user_id))
                            .add(friendship::Column::FriendId.eq(friend_id)),
                    )
                    .add(
                        Condition::all()
                            .add(friendship::Column::UserId.eq(friend_id))
                            .add(friendship::Column::FriendId.eq(user_id)),
                    ),
            )
            .one(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(edge.is_some())
    }

    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<()> {
        let active = friendship::ActiveModel {
            user_id: Set(user_id),
            friend_id: Set(friend_id),
            created_at: Set(Utc::now()),
        };

        let result = Friendship::insert(active)
            .on_conflict(
                OnConflict::columns([friendship::Column::UserId, friendship::Column::FriendId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        if !inserted(&result) {
            return Err(AppError::FriendshipExists);
        }

        Ok(())
    }

    /// Every user connected to `user_id` by an edge in either direction.
    pub async fn friend_ids_of<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Vec<Uuid>> {
        let edges = Friendship::find()
            .filter(
                Condition::any()
                    .add(friendship::Column::UserId.eq(user_id))
                    .add(friendship::Column::FriendId.eq(user_id)),
            )
            .all(conn)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(edges
            .into_iter()
            .map(|edge| {
                if edge.user_id == user_id {
                    edge.friend_id
                } else {
                    edge.user_id
                }
            })
            .collect())
    }

    pub async fn count_for<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<u64> {
        Ok(Self::friend_ids_of(conn, user_id).await?.len() as u64)
    }
}
