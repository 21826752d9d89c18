use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, services::feed::ActivityEntry};

use super::common::SuccessResponse;

#[derive(Deserialize)]
pub struct GetFeedParams {
    pub user_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub entries: Vec<ActivityEntry>,
}

#[derive(Deserialize)]
pub struct MarkReadParams {
    pub user_id: Uuid,
    pub activity_id: String,

    #[serde(skip)]
    pub state: Option<AppState>,
}

pub type MarkReadResponse = SuccessResponse;
