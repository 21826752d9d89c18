use crate::{
    api::types::{
        AddFavoriteParams, AddFriendParams, AddFriendResponse, FavoriteResponse, FriendInfo,
        ListFavoritesParams, ListFavoritesResponse, ListFriendsParams, ListFriendsResponse,
        PushSubscribeParams, PushSubscribeResponse, PushUnsubscribeParams,
        PushUnsubscribeResponse, RemoveFavoriteParams, RemoveFavoriteResponse,
        SwapFavoritesParams, SwapFavoritesResponse,
    },
    db::repositories::PushRepository,
    error::{AppError, Result},
    services::{favorites, friendships},
};

pub async fn add_friend(params: AddFriendParams) -> Result<AddFriendResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    friendships::add_friend(&app_state, params.user_id, params.friend_id).await?;

    Ok(AddFriendResponse::ok())
}

pub async fn list_friends(params: ListFriendsParams) -> Result<ListFriendsResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let friends = friendships::list_friends(&app_state, params.user_id).await?;

    Ok(ListFriendsResponse {
        friends: friends
            .into_iter()
            .map(|user| FriendInfo {
                id: user.id,
                username: user.username,
            })
            .collect(),
    })
}

pub async fn add_favorite(params: AddFavoriteParams) -> Result<FavoriteResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let favorite =
        favorites::add_favorite(&app_state, params.user_id, params.submission_id).await?;

    Ok(FavoriteResponse {
        id: favorite.id,
        submission_id: favorite.submission_id,
        order_number: favorite.order_number,
    })
}

pub async fn remove_favorite(params: RemoveFavoriteParams) -> Result<RemoveFavoriteResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    favorites::remove_favorite(&app_state, params.user_id, params.favorite_id).await?;

    Ok(RemoveFavoriteResponse::ok())
}

pub async fn list_favorites(params: ListFavoritesParams) -> Result<ListFavoritesResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let favorites = favorites::list_favorites(&app_state, params.user_id).await?;

    Ok(ListFavoritesResponse {
        favorites: favorites
            .into_iter()
            .map(|favorite| FavoriteResponse {
                id: favorite.id,
                submission_id: favorite.submission_id,
                order_number: favorite.order_number,
            })
            .collect(),
    })
}

pub async fn swap_favorites(params: SwapFavoritesParams) -> Result<SwapFavoritesResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    favorites::swap_favorites(&app_state, params.user_id, params.first_id, params.second_id)
        .await?;

    Ok(SwapFavoritesResponse::ok())
}

pub async fn push_subscribe(params: PushSubscribeParams) -> Result<PushSubscribeResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    if params.endpoint.trim().is_empty() {
        return Err(AppError::InvalidParams("endpoint cannot be empty".into()));
    }

    PushRepository::subscribe(
        app_state.db.connection(),
        params.user_id,
        &params.endpoint,
        &params.p256dh,
        &params.auth,
    )
    .await?;

    Ok(PushSubscribeResponse::ok())
}

pub async fn push_unsubscribe(params: PushUnsubscribeParams) -> Result<PushUnsubscribeResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    PushRepository::unsubscribe(app_state.db.connection(), params.user_id, &params.endpoint)
        .await?;

    Ok(PushUnsubscribeResponse::ok())
}
