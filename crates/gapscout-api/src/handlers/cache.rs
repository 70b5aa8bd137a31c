use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use gapscout_store::CacheStats;

use crate::dto::{CacheClearParams, ClearResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn cache_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CacheStats>, ApiError> {
    let stats = state.cache.stats().await?;
    Ok(Json(stats))
}

pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CacheClearParams>,
) -> Result<Json<ClearResponse>, ApiError> {
    let (cleared, what) = if params.expired_only {
        (state.cache.clear_expired().await?, "expired cache entries")
    } else {
        (state.cache.clear_all().await?, "cache entries")
    };
    Ok(Json(ClearResponse::cleared(cleared, what)))
}
