//! End-to-end pipeline tests over a fixture data source

use async_trait::async_trait;
use gapscout_core::config::EngineConfig;
use gapscout_core::error::{Result, ScoutError};
use gapscout_core::models::{
    AnalysisRequest, BusinessType, GrowthStatus, Point, RawFeature,
};
use gapscout_core::ports::GeoDataSource;
use gapscout_core::scoring::{VERDICT_HIGH, VERDICT_SATURATED};
use gapscout_core::MarketAnalyzer;

const CENTER: Point = Point { lat: 13.7465, lon: 100.5348 };

/// Fixed snapshot source: returns the same features regardless of radius,
/// mimicking an over-fetching upstream. The pipeline's own radial filter
/// decides what counts.
struct FixtureSource {
    features: Vec<RawFeature>,
}

#[async_trait]
impl GeoDataSource for FixtureSource {
    async fn fetch_features(&self, _center: Point, _radius_m: f64) -> Result<Vec<RawFeature>> {
        Ok(self.features.clone())
    }
}

struct FailingSource;

#[async_trait]
impl GeoDataSource for FailingSource {
    async fn fetch_features(&self, _center: Point, _radius_m: f64) -> Result<Vec<RawFeature>> {
        Err(ScoutError::UpstreamUnavailable { reason: "overpass timed out".to_string() })
    }
}

fn offset(lat_deg: f64) -> Point {
    // 0.001 degrees of latitude is roughly 111 m
    Point::new(CENTER.lat + lat_deg, CENTER.lon)
}

fn tagged(id: u64, point: Point, key: &str, value: &str) -> RawFeature {
    RawFeature::new(id, point).with_tag(key, value)
}

/// The worked scenario: 5 cafes of which 3 are inside a 500 m radius,
/// 40 office and 10 residential demand features inside, 2 construction
/// sites inside.
fn scenario_features() -> Vec<RawFeature> {
    let mut features = Vec::new();

    // Cafes: three inside 500 m, two well outside
    features.push(tagged(1, offset(0.0005), "amenity", "cafe").with_name("Corner Cafe"));
    features.push(tagged(2, offset(-0.001), "amenity", "cafe"));
    features.push(tagged(3, offset(0.002), "amenity", "cafe").with_name("Bean House"));
    features.push(tagged(4, offset(0.010), "amenity", "cafe"));
    features.push(tagged(5, offset(0.015), "amenity", "cafe"));

    // 40 office features inside the radius
    for i in 0..40u64 {
        features.push(tagged(100 + i, offset(i as f64 * 1e-5), "office", "company"));
    }

    // 10 residential features inside the radius
    for i in 0..10u64 {
        features.push(tagged(200 + i, offset(-(i as f64) * 1e-5), "building", "apartments"));
    }

    // 2 construction sites inside
    features.push(tagged(300, offset(0.001), "landuse", "construction"));
    features.push(tagged(301, offset(-0.002), "landuse", "construction"));

    // Irrelevant feature, discarded
    features.push(tagged(400, offset(0.0002), "natural", "tree"));

    features
}

fn analyzer(features: Vec<RawFeature>) -> MarketAnalyzer<FixtureSource> {
    MarketAnalyzer::new(FixtureSource { features }, EngineConfig::default())
}

fn request(radius_m: f64) -> AnalysisRequest {
    AnalysisRequest::new(CENTER, radius_m, BusinessType::Cafe)
}

#[tokio::test]
async fn test_worked_scenario() {
    let result = analyzer(scenario_features()).analyze(&request(500.0)).await.unwrap();

    assert_eq!(result.supply_count, 3);
    assert_eq!(result.demand_count, 50);
    assert_eq!(result.demand_breakdown.office, 40);
    assert_eq!(result.demand_breakdown.students, 0);
    assert_eq!(result.demand_breakdown.residential, 10);
    assert_eq!(result.demand_breakdown.transport, 0);
    assert_eq!(result.construction_count, 2);
    assert_eq!(result.growth_status, GrowthStatus::Stable);
    assert_eq!(result.verdict, VERDICT_HIGH);
    assert!(result.score >= 3.5 && result.score <= 5.0);

    // Render lists are consistent with the counts
    assert_eq!(result.supply_points.len(), 3);
    assert_eq!(result.demand_points.len(), 50);
    assert_eq!(result.demand_breakdown.total(), result.demand_count);
}

#[tokio::test]
async fn test_empty_area_is_a_floor_result_not_an_error() {
    let result = analyzer(Vec::new()).analyze(&request(500.0)).await.unwrap();

    assert_eq!(result.supply_count, 0);
    assert_eq!(result.demand_count, 0);
    assert_eq!(result.construction_count, 0);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.verdict, VERDICT_SATURATED);
    assert_eq!(result.growth_status, GrowthStatus::Declining);
}

#[tokio::test]
async fn test_radius_expansion_never_shrinks_counts() {
    let features = scenario_features();

    let narrow = analyzer(features.clone()).analyze(&request(500.0)).await.unwrap();
    let wide = analyzer(features).analyze(&request(2000.0)).await.unwrap();

    assert!(wide.supply_count >= narrow.supply_count);
    assert!(wide.demand_count >= narrow.demand_count);
    assert!(wide.construction_count >= narrow.construction_count);

    // The two out-of-radius cafes fall inside 2 km
    assert_eq!(wide.supply_count, 5);
}

#[tokio::test]
async fn test_repeated_analysis_is_idempotent() {
    let engine = analyzer(scenario_features());
    let req = request(500.0);

    let first = engine.analyze(&req).await.unwrap();
    let second = engine.analyze(&req).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_duplicate_upstream_features_counted_once() {
    let mut features = scenario_features();
    let dupes: Vec<RawFeature> = features.clone();
    features.extend(dupes);

    let result = analyzer(features).analyze(&request(500.0)).await.unwrap();
    assert_eq!(result.supply_count, 3);
    assert_eq!(result.demand_count, 50);
}

#[tokio::test]
async fn test_upstream_failure_fails_the_whole_analysis() {
    let engine = MarketAnalyzer::new(FailingSource, EngineConfig::default());
    let err = engine.analyze(&request(500.0)).await.unwrap_err();

    assert!(matches!(err, ScoutError::UpstreamUnavailable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_invalid_request_rejected_before_fetch() {
    // A failing source proves validation happens first: validation errors
    // surface instead of the upstream error
    let engine = MarketAnalyzer::new(FailingSource, EngineConfig::default());

    let err = engine.analyze(&request(50.0)).await.unwrap_err();
    assert!(matches!(err, ScoutError::RadiusOutOfRange { .. }));
    assert!(!err.is_retryable());

    let bad_center =
        AnalysisRequest::new(Point::new(120.0, 0.0), 1000.0, BusinessType::Cafe);
    let err = engine.analyze(&bad_center).await.unwrap_err();
    assert!(matches!(err, ScoutError::InvalidCoordinate { .. }));
}
