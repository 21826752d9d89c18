use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;

use super::common::SuccessResponse;

#[derive(Deserialize)]
pub struct AddFriendParams {
    pub user_id: Uuid,
    pub friend_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

pub type AddFriendResponse = SuccessResponse;

#[derive(Deserialize)]
pub struct ListFriendsParams {
    pub user_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct FriendInfo {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct ListFriendsResponse {
    pub friends: Vec<FriendInfo>,
}

#[derive(Deserialize)]
pub struct AddFavoriteParams {
    pub user_id: Uuid,
    pub submission_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub order_number: i32,
}

#[derive(Deserialize)]
pub struct RemoveFavoriteParams {
    pub user_id: Uuid,
    pub favorite_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

pub type RemoveFavoriteResponse = SuccessResponse;

#[derive(Deserialize)]
pub struct ListFavoritesParams {
    pub user_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct ListFavoritesResponse {
    pub favorites: Vec<FavoriteResponse>,
}

#[derive(Deserialize)]
pub struct SwapFavoritesParams {
    pub user_id: Uuid,
    pub first_id: Uuid,
    pub second_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

pub type SwapFavoritesResponse = SuccessResponse;

#[derive(Deserialize)]
pub struct PushSubscribeParams {
    pub user_id: Uuid,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,

    #[serde(skip)]
    pub state: Option<AppState>,
}

pub type PushSubscribeResponse = SuccessResponse;

#[derive(Deserialize)]
pub struct PushUnsubscribeParams {
    pub user_id: Uuid,
    pub endpoint: String,

    #[serde(skip)]
    pub state: Option<AppState>,
}

pub type PushUnsubscribeResponse = SuccessResponse;
