use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::Response,
    Json,
};

use gapscout_llm::AnalysisBriefing;

use crate::dto::ConsultBody;
use crate::error::ApiError;
use crate::state::AppState;

/// Stream a natural-language consultation for a finished analysis.
///
/// The consultant receives result fields only; chunks are forwarded to the
/// caller verbatim as they arrive.
pub async fn handle_consult(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConsultBody>,
) -> Result<Response, ApiError> {
    let consultant = state
        .consultant
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("No consultant configured"))?;

    tracing::info!(business_type = %body.business_type, "Starting consultation stream");

    let briefing = AnalysisBriefing {
        business_type: body.business_type,
        score: body.score,
        supply_count: body.supply_count,
        demand_count: body.demand_count,
        demand_breakdown: body.demand_breakdown,
        growth_status: body.growth_status,
    };

    let stream = consultant.consult(&briefing).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::internal("Failed to build streaming response").with_details(e.to_string()))
}
