use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use gapscout_osm::PlaceSuggestion;

use crate::dto::{AutocompleteParams, SearchParams, SearchResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn handle_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    tracing::info!(query = %params.query, "Geocoding search");

    let place = state.geocoder.search(&params.query).await?;

    Ok(Json(SearchResponse {
        lat: place.lat,
        lon: place.lon,
        name: place.display_name,
    }))
}

pub async fn handle_autocomplete(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<Vec<PlaceSuggestion>>, ApiError> {
    tracing::debug!(query = %params.query, country = %params.country, "Autocomplete");

    let country = if params.country.is_empty() { None } else { Some(params.country.as_str()) };
    let suggestions = state.geocoder.autocomplete(&params.query, country).await?;

    Ok(Json(suggestions))
}
