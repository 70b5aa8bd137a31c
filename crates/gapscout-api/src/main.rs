use std::env;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gapscout_core::config::EngineConfig;
use gapscout_core::ports::GeoDataSource;
use gapscout_core::MarketAnalyzer;
use gapscout_llm::{Consultant, GeminiConsultant};
use gapscout_osm::{NominatimClient, OverpassClient};
use gapscout_store::memory::{MemoryAnalysisCache, MemoryHistoryStore};
use gapscout_store::{AnalysisCache, HistoryStore};

use gapscout_api::routes::create_router;
use gapscout_api::state::AppState;

const DEFAULT_USER_AGENT: &str = "gapscout/0.1 (market-gap analyzer)";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gapscout_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = env::var("GAPSCOUT_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8000);

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let user_agent =
        env::var("GAPSCOUT_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

    let source: Arc<dyn GeoDataSource> = match build_overpass() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to initialize Overpass client: {}", e);
            std::process::exit(1);
        }
    };

    let geocoder = match build_nominatim(&user_agent) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to initialize Nominatim client: {}", e);
            std::process::exit(1);
        }
    };

    let consultant: Option<Arc<dyn Consultant>> = match env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            tracing::info!("Consultant enabled (Gemini)");
            Some(Arc::new(GeminiConsultant::with_api_key(key)))
        }
        _ => {
            tracing::info!("GEMINI_API_KEY not set, consultation endpoint disabled");
            None
        }
    };

    let ttl_hours: i64 =
        env::var("GAPSCOUT_CACHE_TTL_HOURS").ok().and_then(|h| h.parse().ok()).unwrap_or(24);

    let cache: Arc<dyn AnalysisCache> =
        Arc::new(MemoryAnalysisCache::new(chrono::Duration::hours(ttl_hours)));
    let history: Arc<dyn HistoryStore> = Arc::new(MemoryHistoryStore::new());

    let analyzer = MarketAnalyzer::new(source, config);
    let state = Arc::new(AppState::new(analyzer, geocoder, consultant, cache, history));

    let cors = build_cors();
    let app = create_router(state).layer(TraceLayer::new_for_http()).layer(cors);

    let addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Layered configuration: defaults, then an optional TOML file, then
/// environment overrides.
fn load_config() -> gapscout_core::Result<EngineConfig> {
    let mut config = EngineConfig::default();
    if let Ok(path) = env::var("GAPSCOUT_CONFIG") {
        tracing::info!(path = %path, "Loading configuration file");
        config = config.load_from_file(&path)?;
    }
    let config = config.load_from_env();
    config.validate()?;
    Ok(config)
}

fn build_overpass() -> gapscout_core::Result<OverpassClient> {
    match env::var("GAPSCOUT_OVERPASS_URL") {
        Ok(url) => OverpassClient::new(url, Duration::from_secs(25)),
        Err(_) => OverpassClient::public(),
    }
}

fn build_nominatim(user_agent: &str) -> gapscout_core::Result<NominatimClient> {
    match env::var("GAPSCOUT_NOMINATIM_URL") {
        Ok(url) => NominatimClient::new(url, user_agent, Duration::from_secs(10)),
        Err(_) => NominatimClient::public(user_agent),
    }
}

fn build_cors() -> CorsLayer {
    let origins = env::var("GAPSCOUT_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    let parsed: Vec<HeaderValue> =
        origins.split(',').filter_map(|o| o.trim().parse().ok()).collect();

    tracing::info!(origins = %origins, "CORS enabled");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
