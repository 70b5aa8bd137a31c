use std::sync::Arc;

use axum::{extract::State, Json};

use gapscout_core::models::{AnalysisRequest, AnalysisResult, BusinessType, Point};

use crate::dto::AnalyzeBody;
use crate::error::ApiError;
use crate::services::AnalyzeService;
use crate::state::AppState;

pub async fn handle_analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let business_type: BusinessType = body.business_type.parse().map_err(ApiError::from)?;

    tracing::info!(
        business_type = %business_type,
        lat = body.lat,
        lon = body.lon,
        radius = body.radius,
        "Processing analysis request"
    );

    let request =
        AnalysisRequest::new(Point::new(body.lat, body.lon), body.radius, business_type);

    let result = AnalyzeService::execute(&state, &request).await?;

    Ok(Json(result))
}
