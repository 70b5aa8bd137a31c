use std::sync::Arc;

use gapscout_core::ports::GeoDataSource;
use gapscout_core::MarketAnalyzer;
use gapscout_llm::Consultant;
use gapscout_osm::NominatimClient;
use gapscout_store::{AnalysisCache, HistoryStore};

/// Shared server state: the analyzer plus its collaborators.
///
/// The analyzer itself is stateless between requests; everything mutable
/// (cache, history) sits behind its own port.
pub struct AppState {
    pub analyzer: MarketAnalyzer<Arc<dyn GeoDataSource>>,
    pub geocoder: Arc<NominatimClient>,
    /// Absent when no API key is configured; consultation requests then
    /// fail with a service-unavailable error
    pub consultant: Option<Arc<dyn Consultant>>,
    pub cache: Arc<dyn AnalysisCache>,
    pub history: Arc<dyn HistoryStore>,
}

impl AppState {
    pub fn new(
        analyzer: MarketAnalyzer<Arc<dyn GeoDataSource>>,
        geocoder: Arc<NominatimClient>,
        consultant: Option<Arc<dyn Consultant>>,
        cache: Arc<dyn AnalysisCache>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self { analyzer, geocoder, consultant, cache, history }
    }
}
