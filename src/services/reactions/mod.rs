use uuid::Uuid;

use crate::{
    AppState,
    db::{
        entities::{reaction, reaction::ContentType},
        repositories::{CommentRepository, ReactionRepository, SubmissionRepository},
    },
    error::{AppError, Result},
    services::{achievements, notifications, stats::StatKind},
    tasks,
};

#[derive(Clone, Debug)]
pub enum ReactionToggle {
    Added(reaction::Model),
    Removed,
}

/// Toggle the (user, content, reaction) key: insert if absent, delete if
/// present. Only the toggled-on path feeds achievements and notifications.
pub async fn toggle_reaction(
    state: &AppState,
    user_id: Uuid,
    content_type: ContentType,
    content_id: Uuid,
    reaction_id: &str,
) -> Result<ReactionToggle> {
    if reaction_id.trim().is_empty() {
        return Err(AppError::InvalidParams("reaction_id cannot be empty".into()));
    }

    let conn = state.db.connection();

    match content_type {
        ContentType::Submission => {
            SubmissionRepository::find_by_id(conn, content_id)
                .await?
                .ok_or(AppError::SubmissionNotFound)?;
        }
        ContentType::Comment => {
            CommentRepository::find_by_id(conn, content_id)
                .await?
                .ok_or(AppError::CommentNotFound)?;
        }
    }

    let existing =
        ReactionRepository::find_by_key(conn, user_id, content_type.clone(), content_id, reaction_id)
            .await?;

    if existing.is_some() {
        ReactionRepository::delete_by_key(conn, user_id, content_type, content_id, reaction_id)
            .await?;
        return Ok(ReactionToggle::Removed);
    }

    let created =
        ReactionRepository::try_create(conn, user_id, content_type.clone(), content_id, reaction_id)
            .await?;

    let Some(created) = created else {
        // Lost an insert race: the key exists, so the toggle is already on.
        let current =
            ReactionRepository::find_by_key(conn, user_id, content_type, content_id, reaction_id)
                .await?;
        return Ok(match current {
            Some(model) => ReactionToggle::Added(model),
            None => ReactionToggle::Removed,
        });
    };

    achievements::evaluate_once(state, user_id).await?;
    achievements::evaluate_by_fields(state, user_id, &[StatKind::ReactionGivenTotal]).await?;

    let task_state = state.clone();
    let reaction = created.clone();
    tasks::detach("reaction-notification", async move {
        notifications::dispatch_reaction(&task_state, &reaction).await
    });

    Ok(ReactionToggle::Added(created))
}
