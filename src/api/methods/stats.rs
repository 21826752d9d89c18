use crate::{
    api::types::{
        CachedStatParams, CachedStatResponse, GetStatParams, StatResponse, StatSummaryParams,
        StatSummaryResponse,
    },
    error::{AppError, Result},
    services::stats::{self, StatKind},
};

/// Fresh computation; the cache write happens off the request path.
pub async fn get_stat(params: GetStatParams) -> Result<StatResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let kind: StatKind = params.stat.parse()?;
    let value = stats::compute_and_cache(&app_state, params.user_id, kind).await?;

    Ok(StatResponse {
        stat: kind.as_str(),
        value,
    })
}

/// Possibly-stale display value; never recomputes.
pub async fn get_cached_stat(params: CachedStatParams) -> Result<CachedStatResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let kind: StatKind = params.stat.parse()?;
    let cached = stats::cached(&app_state, params.user_id, kind).await?;

    Ok(CachedStatResponse {
        stat: kind.as_str(),
        value: cached.as_ref().map(|row| row.value),
        computed_at: cached.map(|row| row.computed_at),
    })
}

pub async fn get_stat_summary(params: StatSummaryParams) -> Result<StatSummaryResponse> {
    let app_state = params.state.ok_or(AppError::InternalServerError(
        "Failed to get app state".to_string(),
    ))?;

    let user_stats = stats::compute_all(&app_state, params.user_id).await?;

    Ok(StatSummaryResponse { stats: user_stats })
}
