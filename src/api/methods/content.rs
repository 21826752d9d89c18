use crate::{
    api::types::{
        AddCommentParams, CommentResponse, CreateSubmissionParams, SubmissionResponse,
        ToggleReactionParams, ToggleReactionResponse,
    },
    db::entities::reaction::ContentType,
    error::{AppError, Result},
    services::{
        comments,
        reactions::{self, ReactionToggle},
        submissions,
    },
};

pub async fn create_submission(params: CreateSubmissionParams) -> Result<SubmissionResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let submission =
        submissions::create_submission(&app_state, params.user_id, &params.image_url).await?;

    Ok(SubmissionResponse {
        id: submission.id,
        user_id: submission.user_id,
        day: submission.day,
        image_url: submission.image_url,
        created_at: submission.created_at,
    })
}

pub async fn add_comment(params: AddCommentParams) -> Result<CommentResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let comment =
        comments::add_comment(&app_state, params.user_id, params.submission_id, &params.text)
            .await?;

    Ok(CommentResponse {
        id: comment.id,
        submission_id: comment.submission_id,
        user_id: comment.user_id,
        text: comment.text,
        created_at: comment.created_at,
    })
}

pub async fn toggle_reaction(params: ToggleReactionParams) -> Result<ToggleReactionResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let content_type = match params.content_type.as_str() {
        "submission" => ContentType::Submission,
        "comment" => ContentType::Comment,
        other => {
            return Err(AppError::InvalidParams(format!(
                "Unknown content type '{other}'"
            )));
        }
    };

    let outcome = reactions::toggle_reaction(
        &app_state,
        params.user_id,
        content_type,
        params.content_id,
        &params.reaction_id,
    )
    .await?;

    Ok(ToggleReactionResponse {
        added: matches!(outcome, ReactionToggle::Added(_)),
    })
}
