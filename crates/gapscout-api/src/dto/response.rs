use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "gapscout-api" }
    }
}

/// Geocoding result
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

/// Cache or history clearing outcome
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared(count: usize, what: &str) -> Self {
        Self { message: format!("Cleared {} {}", count, what) }
    }
}
