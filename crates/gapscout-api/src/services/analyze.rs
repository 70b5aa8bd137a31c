use gapscout_core::error::Result;
use gapscout_core::models::{AnalysisRequest, AnalysisResult};
use gapscout_store::{CacheKey, HistoryEntry};

use crate::state::AppState;

/// Service wrapping an analysis with cache lookup and history recording.
///
/// Correctness never depends on the cache: a miss runs the same pipeline a
/// hit would have served. Cache and history writes are best-effort; a
/// failing store never fails a finished analysis.
pub struct AnalyzeService;

impl AnalyzeService {
    pub async fn execute(state: &AppState, request: &AnalysisRequest) -> Result<AnalysisResult> {
        // Validate before touching the cache: key quantization saturates,
        // so a malformed request can collide with a valid cached key
        request.validate(state.analyzer.config())?;

        let key = CacheKey::from_request(request);

        match state.cache.get(&key).await {
            Ok(Some(cached)) => {
                tracing::debug!("Serving analysis from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Cache lookup failed, running analysis"),
        }

        let result = state.analyzer.analyze(request).await?;

        if let Err(e) = state.cache.put(key, result.clone()).await {
            tracing::warn!(error = %e, "Failed to cache analysis result");
        }
        if let Err(e) = state.history.record(HistoryEntry::from_analysis(request, &result)).await {
            tracing::warn!(error = %e, "Failed to record analysis history");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gapscout_core::config::EngineConfig;
    use gapscout_core::models::{BusinessType, Point, RawFeature};
    use gapscout_core::ports::GeoDataSource;
    use gapscout_core::{MarketAnalyzer, ScoutError};
    use gapscout_osm::NominatimClient;
    use gapscout_store::memory::{MemoryAnalysisCache, MemoryHistoryStore};
    use std::sync::Arc;

    struct EmptySource;

    #[async_trait]
    impl GeoDataSource for EmptySource {
        async fn fetch_features(&self, _center: Point, _radius_m: f64) -> Result<Vec<RawFeature>> {
            Ok(Vec::new())
        }
    }

    fn state() -> AppState {
        let source: Arc<dyn GeoDataSource> = Arc::new(EmptySource);
        AppState::new(
            MarketAnalyzer::new(source, EngineConfig::default()),
            Arc::new(NominatimClient::public("gapscout-tests").unwrap()),
            None,
            Arc::new(MemoryAnalysisCache::default()),
            Arc::new(MemoryHistoryStore::new()),
        )
    }

    #[tokio::test]
    async fn test_nan_latitude_rejected_despite_colliding_cache_key() {
        let state = state();

        // Seed the cache with a valid analysis at lat 0
        let valid =
            AnalysisRequest::new(Point::new(0.0, 100.5348), 1000.0, BusinessType::Cafe);
        AnalyzeService::execute(&state, &valid).await.unwrap();

        // NaN saturates through quantization onto the lat-0 key
        let invalid =
            AnalysisRequest::new(Point::new(f64::NAN, 100.5348), 1000.0, BusinessType::Cafe);
        assert_eq!(CacheKey::from_request(&invalid), CacheKey::from_request(&valid));

        let err = AnalyzeService::execute(&state, &invalid).await.unwrap_err();
        assert!(matches!(err, ScoutError::InvalidCoordinate { .. }));
    }

    #[tokio::test]
    async fn test_out_of_range_latitude_not_served_from_cache() {
        let state = state();

        let valid = AnalysisRequest::new(Point::new(90.0, 0.0), 1000.0, BusinessType::Cafe);
        AnalyzeService::execute(&state, &valid).await.unwrap();

        // Rounds to the same quantized key as lat 90.0 but is out of range
        let invalid =
            AnalysisRequest::new(Point::new(90.00004, 0.0), 1000.0, BusinessType::Cafe);
        assert_eq!(CacheKey::from_request(&invalid), CacheKey::from_request(&valid));

        let err = AnalyzeService::execute(&state, &invalid).await.unwrap_err();
        assert!(matches!(err, ScoutError::InvalidCoordinate { .. }));
    }

    #[tokio::test]
    async fn test_invalid_request_leaves_no_cache_or_history_trace() {
        let state = state();

        let invalid =
            AnalysisRequest::new(Point::new(f64::NAN, 100.5348), 1000.0, BusinessType::Cafe);
        AnalyzeService::execute(&state, &invalid).await.unwrap_err();

        assert_eq!(state.cache.stats().await.unwrap().total_entries, 0);
        assert_eq!(state.history.statistics().await.unwrap().total_analyses, 0);
    }
}
