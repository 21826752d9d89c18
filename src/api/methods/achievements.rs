use crate::{
    api::types::{AchievementEntry, ListAchievementsParams, ListAchievementsResponse},
    error::{AppError, Result},
    services::achievements,
};

pub async fn list_achievements(params: ListAchievementsParams) -> Result<ListAchievementsResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let statuses = achievements::list_with_rewards(&app_state, params.user_id).await?;

    Ok(ListAchievementsResponse {
        achievements: statuses
            .into_iter()
            .map(|status| AchievementEntry {
                id: status.achievement.id,
                name: status.achievement.name,
                field: status.achievement.field,
                threshold: status.achievement.threshold,
                reward: status.achievement.reward,
                achieved_at: status.achieved_at,
            })
            .collect(),
    })
}
