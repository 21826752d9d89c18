use chrono::Utc;
use uuid::Uuid;

use crate::{
    AppState,
    db::{
        entities::submission,
        repositories::{PromptRepository, SubmissionRepository, UserRepository},
    },
    error::{AppError, Result},
    services::{achievements, notifications, stats::StatKind},
    tasks,
};

/// Create today's drawing for the user, then run the engagement pipeline:
/// achievements synchronously, friend fan-out detached.
pub async fn create_submission(
    state: &AppState,
    user_id: Uuid,
    image_url: &str,
) -> Result<submission::Model> {
    if image_url.trim().is_empty() {
        return Err(AppError::InvalidParams("image_url cannot be empty".into()));
    }

    let conn = state.db.connection();

    UserRepository::find_by_id(conn, user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let today = Utc::now().date_naive();

    PromptRepository::find_for_day(conn, today)
        .await?
        .ok_or(AppError::PromptNotFound)?;

    let created = SubmissionRepository::create(conn, user_id, today, image_url).await?;

    achievements::evaluate_once(state, user_id).await?;
    achievements::evaluate_by_fields(
        state,
        user_id,
        &[StatKind::SubmissionStreak, StatKind::SubmissionTotal],
    )
    .await?;

    let task_state = state.clone();
    let submission = created.clone();
    tasks::detach("submission-fanout", async move {
        notifications::dispatch_submission(&task_state, &submission).await
    });

    Ok(created)
}
