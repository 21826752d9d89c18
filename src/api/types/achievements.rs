use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AppState,
    services::{achievements::Reward, stats::StatKind},
};

#[derive(Deserialize)]
pub struct ListAchievementsParams {
    pub user_id: Uuid,

    #[serde(skip)]
    pub state: Option<AppState>,
}

#[derive(Debug, Serialize)]
pub struct AchievementEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub field: StatKind,
    pub threshold: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<Reward>,

    pub achieved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ListAchievementsResponse {
    pub achievements: Vec<AchievementEntry>,
}
