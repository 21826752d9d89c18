use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;

#[derive(Deserialize)]
pub struct CreateSubmissionParams {
    pub user_id: Uuid,
    pub image_url: String,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub day: NaiveDate,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct AddCommentParams {
    pub user_id: Uuid,
    pub submission_id: Uuid,
    pub text: String,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct ToggleReactionParams {
    pub user_id: Uuid,
    pub content_type: String,
    pub content_id: Uuid,
    pub reaction_id: String,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct ToggleReactionResponse {
    pub added: bool,
}
