use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use gapscout_core::models::BusinessType;
use gapscout_store::{HistoryEntry, HistoryStats};

use crate::dto::{ClearResponse, HistoryParams, LocationHistoryParams};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let business_type = params
        .business_type
        .as_deref()
        .map(str::parse::<BusinessType>)
        .transpose()
        .map_err(ApiError::from)?;

    let entries = state.history.recent(params.limit, business_type).await?;
    Ok(Json(entries))
}

pub async fn get_location_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationHistoryParams>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = state.history.near(params.lat, params.lon, params.tolerance).await?;
    Ok(Json(entries))
}

pub async fn get_history_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoryStats>, ApiError> {
    let stats = state.history.statistics().await?;
    Ok(Json(stats))
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearResponse>, ApiError> {
    let cleared = state.history.clear().await?;
    Ok(Json(ClearResponse::cleared(cleared, "history entries")))
}
