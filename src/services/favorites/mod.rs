use uuid::Uuid;

use crate::{
    AppState,
    db::{
        entities::favorite,
        repositories::{FavoriteRepository, SubmissionRepository},
    },
    error::{AppError, Result},
};

pub async fn add_favorite(
    state: &AppState,
    user_id: Uuid,
    submission_id: Uuid,
) -> Result<favorite::Model> {
    let conn = state.db.connection();

    SubmissionRepository::find_by_id(conn, submission_id)
        .await?
        .ok_or(AppError::SubmissionNotFound)?;

    FavoriteRepository::create(conn, user_id, submission_id).await
}

pub async fn remove_favorite(state: &AppState, user_id: Uuid, favorite_id: Uuid) -> Result<()> {
    FavoriteRepository::delete(state.db.connection(), user_id, favorite_id).await
}

pub async fn list_favorites(state: &AppState, user_id: Uuid) -> Result<Vec<favorite::Model>> {
    FavoriteRepository::list_for_user(state.db.connection(), user_id).await
}

/// Swap the display order of two of the user's favorites. Runs inside a
/// transaction with a single two-row UPDATE so concurrent swaps cannot
/// leave both rows with the same order number.
pub async fn swap_favorites(
    state: &AppState,
    user_id: Uuid,
    first_id: Uuid,
    second_id: Uuid,
) -> Result<()> {
    if first_id == second_id {
        return Err(AppError::InvalidParams(
            "Cannot swap a favorite with itself".into(),
        ));
    }

    FavoriteRepository::swap_order(&state.db, user_id, first_id, second_id).await
}
