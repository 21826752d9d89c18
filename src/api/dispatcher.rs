use serde_json::Value;

use crate::{
    AppState,
    api::{
        methods::{
            achievements::list_achievements,
            content::{add_comment, create_submission, toggle_reaction},
            feed::{get_feed, mark_read},
            social::{
                add_favorite, add_friend, list_favorites, list_friends, push_subscribe,
                push_unsubscribe, remove_favorite, swap_favorites,
            },
            stats::{get_cached_stat, get_stat, get_stat_summary},
        },
        types::{
            AddCommentParams, AddFavoriteParams, AddFriendParams, CachedStatParams,
            CreateSubmissionParams, GetFeedParams, GetStatParams, ListAchievementsParams,
            ListFavoritesParams, ListFriendsParams, MarkReadParams, PushSubscribeParams,
            PushUnsubscribeParams, RemoveFavoriteParams, StatSummaryParams, SwapFavoritesParams,
            ToggleReactionParams,
        },
    },
    error::AppError,
};

macro_rules! dispatch {
    ($param_type:ty, $handler:path, $params:expr, $state:expr) => {{
        let mut p: $param_type =
            serde_json::from_value($params).map_err(|e| AppError::InvalidParams(e.to_string()))?;

        p.state = Some($state);

        let result = $handler(p).await?;
        serde_json::to_value(result).map_err(AppError::from)
    }};
}

async fn dispatch_stats(method: &str, params: Value, state: AppState) -> Result<Value, AppError> {
    match method {
        "stats.get" => dispatch!(GetStatParams, get_stat, params, state),
        "stats.cached" => dispatch!(CachedStatParams, get_cached_stat, params, state),
        "stats.summary" => dispatch!(StatSummaryParams, get_stat_summary, params, state),
        _ => Err(AppError::MethodNotFound(method.to_string())),
    }
}

async fn dispatch_achievements(
    method: &str,
    params: Value,
    state: AppState,
) -> Result<Value, AppError> {
    match method {
        "achievements.list" => dispatch!(ListAchievementsParams, list_achievements, params, state),
        _ => Err(AppError::MethodNotFound(method.to_string())),
    }
}

async fn dispatch_feed(method: &str, params: Value, state: AppState) -> Result<Value, AppError> {
    match method {
        "feed.get" => dispatch!(GetFeedParams, get_feed, params, state),
        "feed.markRead" => dispatch!(MarkReadParams, mark_read, params, state),
        _ => Err(AppError::MethodNotFound(method.to_string())),
    }
}

async fn dispatch_content(method: &str, params: Value, state: AppState) -> Result<Value, AppError> {
    match method {
        "submission.create" => {
            dispatch!(CreateSubmissionParams, create_submission, params, state)
        }
        "comment.add" => dispatch!(AddCommentParams, add_comment, params, state),
        "reaction.toggle" => dispatch!(ToggleReactionParams, toggle_reaction, params, state),
        _ => Err(AppError::MethodNotFound(method.to_string())),
    }
}

async fn dispatch_social(method: &str, params: Value, state: AppState) -> Result<Value, AppError> {
    match method {
        "friend.add" => dispatch!(AddFriendParams, add_friend, params, state),
        "friend.list" => dispatch!(ListFriendsParams, list_friends, params, state),
        "favorite.add" => dispatch!(AddFavoriteParams, add_favorite, params, state),
        "favorite.remove" => dispatch!(RemoveFavoriteParams, remove_favorite, params, state),
        "favorite.list" => dispatch!(ListFavoritesParams, list_favorites, params, state),
        "favorite.swap" => dispatch!(SwapFavoritesParams, swap_favorites, params, state),
        "push.subscribe" => dispatch!(PushSubscribeParams, push_subscribe, params, state),
        "push.unsubscribe" => dispatch!(PushUnsubscribeParams, push_unsubscribe, params, state),
        _ => Err(AppError::MethodNotFound(method.to_string())),
    }
}

pub async fn dispatch_method(
    method: &str,
    params: Value,
    state: AppState,
) -> Result<Value, AppError> {
    if method.starts_with("stats.") {
        return dispatch_stats(method, params, state).await;
    }
    if method.starts_with("achievements.") {
        return dispatch_achievements(method, params, state).await;
    }
    if method.starts_with("feed.") {
        return dispatch_feed(method, params, state).await;
    }
    if method.starts_with("submission.")
        || method.starts_with("comment.")
        || method.starts_with("reaction.")
    {
        return dispatch_content(method, params, state).await;
    }
    if method.starts_with("friend.")
        || method.starts_with("favorite.")
        || method.starts_with("push.")
    {
        return dispatch_social(method, params, state).await;
    }
    Err(AppError::MethodNotFound(method.to_string()))
}
