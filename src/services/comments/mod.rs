use uuid::Uuid;

use crate::{
    AppState,
    db::{
        entities::comment,
        repositories::{CommentRepository, SubmissionRepository},
    },
    error::{AppError, Result},
    services::{achievements, notifications, stats::StatKind},
    tasks,
};

pub async fn add_comment(
    state: &AppState,
    user_id: Uuid,
    submission_id: Uuid,
    text: &str,
) -> Result<comment::Model> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidParams("Comment cannot be empty".into()));
    }

    let conn = state.db.connection();

    SubmissionRepository::find_by_id(conn, submission_id)
        .await?
        .ok_or(AppError::SubmissionNotFound)?;

    let created = CommentRepository::create(conn, submission_id, user_id, trimmed).await?;

    achievements::evaluate_once(state, user_id).await?;
    achievements::evaluate_by_fields(state, user_id, &[StatKind::CommentTotal]).await?;

    let task_state = state.clone();
    let comment = created.clone();
    tasks::detach("comment-notification", async move {
        notifications::dispatch_comment(&task_state, &comment).await
    });

    Ok(created)
}
