use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    cache_stats, clear_cache, clear_history, get_history, get_history_stats,
    get_location_history, handle_analyze, handle_autocomplete, handle_consult, handle_search,
    health_check,
};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(handle_analyze))
        .route("/search", get(handle_search))
        .route("/autocomplete", get(handle_autocomplete))
        .route("/consult", post(handle_consult))
        .route("/history", get(get_history).delete(clear_history))
        .route("/history/location", get(get_location_history))
        .route("/history/stats", get(get_history_stats))
        .route("/cache/stats", get(cache_stats))
        .route("/cache/clear", post(clear_cache))
        .with_state(state)
}
