use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use gapscout_core::error::Result;
use gapscout_core::models::{AnalysisRequest, AnalysisResult, BusinessType, GrowthStatus};

/// Cache key quantized from a request.
///
/// Coordinates are rounded to 4 decimal places (roughly 11 m) so nearby
/// repeat requests share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    lat_e4: i64,
    lon_e4: i64,
    radius_m: u64,
    business_type: BusinessType,
}

impl CacheKey {
    pub fn from_request(request: &AnalysisRequest) -> Self {
        Self {
            lat_e4: (request.center.lat * 10_000.0).round() as i64,
            lon_e4: (request.center.lon * 10_000.0).round() as i64,
            radius_m: request.radius_m.round() as u64,
            business_type: request.business_type,
        }
    }
}

/// Cache occupancy counters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub ttl_hours: i64,
}

/// Port for caching finished analysis results
#[async_trait]
pub trait AnalysisCache: Send + Sync {
    /// Fetch a cached result if present and not expired
    async fn get(&self, key: &CacheKey) -> Result<Option<AnalysisResult>>;

    /// Store a result under a key
    async fn put(&self, key: CacheKey, result: AnalysisResult) -> Result<()>;

    async fn stats(&self) -> Result<CacheStats>;

    /// Drop expired entries, returning how many were removed
    async fn clear_expired(&self) -> Result<usize>;

    /// Drop every entry, returning how many were removed
    async fn clear_all(&self) -> Result<usize>;
}

/// One recorded analysis, kept for trend tracking.
///
/// Stores the result summary only, not the point lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
    pub business_type: BusinessType,
    pub radius_m: f64,
    pub score: f64,
    pub verdict: String,
    pub supply_count: u32,
    pub demand_count: u32,
    pub growth_status: GrowthStatus,
    pub construction_count: u32,
}

impl HistoryEntry {
    /// Build an entry from a request and its result, rounding the location
    /// to 6 decimal places
    pub fn from_analysis(request: &AnalysisRequest, result: &AnalysisResult) -> Self {
        Self {
            timestamp: Utc::now(),
            lat: (request.center.lat * 1_000_000.0).round() / 1_000_000.0,
            lon: (request.center.lon * 1_000_000.0).round() / 1_000_000.0,
            business_type: request.business_type,
            radius_m: request.radius_m,
            score: result.score,
            verdict: result.verdict.clone(),
            supply_count: result.supply_count,
            demand_count: result.demand_count,
            growth_status: result.growth_status,
            construction_count: result.construction_count,
        }
    }
}

/// Aggregate usage statistics over the history log
#[derive(Debug, Clone, Serialize)]
pub struct HistoryStats {
    pub total_analyses: usize,
    pub business_types: HashMap<String, usize>,
    pub average_score: f64,
    pub most_analyzed_type: Option<String>,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
}

/// Port for the bounded analysis history log
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append an entry, evicting the oldest once the bound is reached
    async fn record(&self, entry: HistoryEntry) -> Result<()>;

    /// Most recent entries, newest first, optionally filtered by business
    /// type
    async fn recent(
        &self,
        limit: usize,
        business_type: Option<BusinessType>,
    ) -> Result<Vec<HistoryEntry>>;

    /// Entries within `tolerance_deg` of a location, newest first
    async fn near(&self, lat: f64, lon: f64, tolerance_deg: f64) -> Result<Vec<HistoryEntry>>;

    async fn statistics(&self) -> Result<HistoryStats>;

    /// Drop all entries, returning how many were removed
    async fn clear(&self) -> Result<usize>;
}
