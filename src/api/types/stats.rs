use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, services::stats::UserStats};

#[derive(Deserialize)]
pub struct GetStatParams {
    pub user_id: Uuid,
    pub stat: String,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct StatResponse {
    pub stat: &'static str,
    pub value: i64,
}

pub type CachedStatParams = GetStatParams;

#[derive(Debug, Serialize)]
pub struct CachedStatResponse {
    pub stat: &'static str,
    pub value: Option<i64>,
    pub computed_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct StatSummaryParams {
    pub user_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct StatSummaryResponse {
    pub stats: UserStats,
}
