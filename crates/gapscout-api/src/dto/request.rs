use serde::Deserialize;

use gapscout_core::models::{BusinessType, DemandBreakdown, GrowthStatus};

/// Analysis request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    pub lat: f64,
    pub lon: f64,
    /// Business type label, e.g. "Cafe" or "Bar/Pub"
    pub business_type: String,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_radius() -> f64 {
    1000.0
}

/// Free-text geocoding query
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

/// Autocomplete query with optional country restriction
#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    pub query: String,
    #[serde(default)]
    pub country: String,
}

/// Consultation request: the result fields to brief the consultant with
#[derive(Debug, Deserialize)]
pub struct ConsultBody {
    pub business_type: BusinessType,
    pub score: f64,
    pub supply_count: u32,
    pub demand_count: u32,
    pub demand_breakdown: DemandBreakdown,
    pub growth_status: GrowthStatus,
}

/// History listing parameters
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
    pub business_type: Option<String>,
}

fn default_history_limit() -> usize {
    10
}

/// Per-location history lookup
#[derive(Debug, Deserialize)]
pub struct LocationHistoryParams {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    0.01
}

/// Cache clearing mode
#[derive(Debug, Deserialize)]
pub struct CacheClearParams {
    #[serde(default = "default_expired_only")]
    pub expired_only: bool,
}

fn default_expired_only() -> bool {
    true
}
