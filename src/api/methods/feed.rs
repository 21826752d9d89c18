use crate::{
    api::types::{FeedResponse, GetFeedParams, MarkReadParams, MarkReadResponse},
    error::{AppError, Result},
    services::feed,
};

pub async fn get_feed(params: GetFeedParams) -> Result<FeedResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let entries = feed::feed(&app_state, params.user_id).await?;

    Ok(FeedResponse { entries })
}

pub async fn mark_read(params: MarkReadParams) -> Result<MarkReadResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    feed::set_watermark(&app_state, params.user_id, &params.activity_id).await?;

    Ok(MarkReadResponse::ok())
}
