use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use gapscout_core::ScoutError;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into(), details: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into(), details: None }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self { status: StatusCode::SERVICE_UNAVAILABLE, message: message.into(), details: None }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_GATEWAY, message: message.into(), details: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    retryable: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retryable = matches!(
            self.status,
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY
        );
        let body = ErrorBody { error: self.message, details: self.details, retryable };
        (self.status, Json(body)).into_response()
    }
}

impl From<ScoutError> for ApiError {
    fn from(err: ScoutError) -> Self {
        match &err {
            ScoutError::InvalidCoordinate { .. }
            | ScoutError::RadiusOutOfRange { .. }
            | ScoutError::UnknownBusinessType { .. } => {
                Self::bad_request("Invalid request").with_details(err.to_string())
            }
            ScoutError::LocationNotFound { .. } => {
                Self::not_found("Location not found").with_details(err.to_string())
            }
            ScoutError::UpstreamUnavailable { .. } => {
                Self::service_unavailable("Geo data source unavailable")
                    .with_details(err.to_string())
            }
            ScoutError::ConsultantUnavailable { .. } => {
                Self::bad_gateway("Consultant unavailable").with_details(err.to_string())
            }
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}
