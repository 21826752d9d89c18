use uuid::Uuid;

use crate::{
    AppState,
    db::{
        entities::user,
        repositories::{FriendshipRepository, UserRepository},
    },
    error::{AppError, Result},
    services::{achievements, stats::StatKind},
};

/// Create the undirected edge between two users. The edge is stored once;
/// duplicate checks run in both directions.
pub async fn add_friend(state: &AppState, user_id: Uuid, friend_id: Uuid) -> Result<()> {
    if user_id == friend_id {
        return Err(AppError::InvalidParams(
            "Cannot befriend yourself".into(),
        ));
    }

    let conn = state.db.connection();

    UserRepository::find_by_id(conn, friend_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if FriendshipRepository::exists_between(conn, user_id, friend_id).await? {
        return Err(AppError::FriendshipExists);
    }

    FriendshipRepository::create(conn, user_id, friend_id).await?;

    achievements::evaluate_once(state, user_id).await?;
    achievements::evaluate_by_fields(state, user_id, &[StatKind::FriendTotal]).await?;

    Ok(())
}

pub async fn list_friends(state: &AppState, user_id: Uuid) -> Result<Vec<user::Model>> {
    let conn = state.db.connection();

    let friend_ids = FriendshipRepository::friend_ids_of(conn, user_id).await?;
    if friend_ids.is_empty() {
        return Ok(Vec::new());
    }

    UserRepository::find_by_ids(conn, friend_ids).await
}
