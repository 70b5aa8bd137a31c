//! Overpass API client implementing the `GeoDataSource` port
//!
//! One analysis needs three tag buckets (competitors, demand sources,
//! construction). The sub-queries are issued concurrently and merged by
//! feature id before classification; the pipeline's dedup rule makes the
//! merge safe when an element matches more than one bucket.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use gapscout_core::error::{Result, ScoutError};
use gapscout_core::models::{Point, RawFeature};
use gapscout_core::ports::GeoDataSource;
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

/// Tag selectors per query bucket. Together they cover every supply rule
/// across all business types, the four demand categories, and construction;
/// the classifier discards whatever a given analysis does not need.
const COMPETITOR_SELECTORS: &[&str] = &[
    r#"["amenity"~"^(cafe|restaurant|bar|pub|pharmacy|coworking_space)$"]"#,
    r#"["shop"="convenience"]"#,
    r#"["leisure"="fitness_centre"]"#,
];

const DEMAND_SELECTORS: &[&str] = &[
    r#"["office"]"#,
    r#"["amenity"~"^(school|university|college)$"]"#,
    r#"["building"~"^(apartments|condominium|residential)$"]"#,
    r#"["public_transport"="station"]"#,
    r#"["railway"="station"]"#,
];

const CONSTRUCTION_SELECTORS: &[&str] = &[
    r#"["landuse"="construction"]"#,
    r#"["building"="construction"]"#,
];

/// HTTP client for the Overpass API
pub struct OverpassClient {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            ScoutError::UpstreamUnavailable { reason: format!("Failed to build HTTP client: {}", e) }
        })?;
        Ok(Self { endpoint: endpoint.into(), client, timeout })
    }

    /// Create a client against the public Overpass instance
    pub fn public() -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    async fn query_bucket(
        &self,
        selectors: &[&str],
        center: Point,
        radius_m: f64,
    ) -> Result<Vec<RawFeature>> {
        let query = build_query(selectors, center, radius_m, self.timeout);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| ScoutError::UpstreamUnavailable {
                reason: format!("Overpass request failed: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(ScoutError::UpstreamUnavailable {
                reason: format!("Overpass returned status {}", response.status()),
            });
        }

        let body: OverpassResponse =
            response.json().await.map_err(|e| ScoutError::UpstreamUnavailable {
                reason: format!("Failed to parse Overpass response: {}", e),
            })?;

        Ok(parse_elements(body))
    }
}

#[async_trait]
impl GeoDataSource for OverpassClient {
    async fn fetch_features(&self, center: Point, radius_m: f64) -> Result<Vec<RawFeature>> {
        let (competitors, demand, construction) = futures::try_join!(
            self.query_bucket(COMPETITOR_SELECTORS, center, radius_m),
            self.query_bucket(DEMAND_SELECTORS, center, radius_m),
            self.query_bucket(CONSTRUCTION_SELECTORS, center, radius_m),
        )?;

        let merged = merge_by_id(vec![competitors, demand, construction]);
        tracing::debug!(count = merged.len(), "Fetched Overpass feature snapshot");
        Ok(merged)
    }
}

/// Build an Overpass QL query selecting nodes, ways, and relations matching
/// any of the selectors within `radius_m` of `center`. The server-side
/// timeout mirrors the client-side one so neither cuts the other short.
fn build_query(selectors: &[&str], center: Point, radius_m: f64, timeout: Duration) -> String {
    let around = format!("(around:{:.0},{:.6},{:.6})", radius_m, center.lat, center.lon);
    let mut query = format!("[out:json][timeout:{}];\n(\n", timeout.as_secs());
    for selector in selectors {
        query.push_str(&format!("  nwr{}{};\n", selector, around));
    }
    query.push_str(");\nout center;\n");
    query
}

/// Merge bucket results, keeping the first occurrence of each feature id
fn merge_by_id(buckets: Vec<Vec<RawFeature>>) -> Vec<RawFeature> {
    let mut seen = std::collections::HashSet::new();
    let mut merged = Vec::new();
    for bucket in buckets {
        for feature in bucket {
            if seen.insert(feature.id) {
                merged.push(feature);
            }
        }
    }
    merged
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

/// Convert Overpass elements to raw features.
///
/// Ways and relations use their `out center` centroid. OSM element ids are
/// only unique per element type, so the type is folded into the high bits of
/// the feature id to keep dedup sound across types.
fn parse_elements(body: OverpassResponse) -> Vec<RawFeature> {
    body.elements
        .into_iter()
        .filter_map(|element| {
            let (lat, lon) = match (element.lat, element.lon, &element.center) {
                (Some(lat), Some(lon), _) => (lat, lon),
                (_, _, Some(center)) => (center.lat, center.lon),
                _ => return None,
            };

            let namespace: u64 = match element.kind.as_str() {
                "node" => 0,
                "way" => 1 << 62,
                "relation" => 1 << 63,
                _ => return None,
            };

            let name = element.tags.get("name").cloned();
            let mut feature =
                RawFeature::new(namespace | element.id, Point::new(lat, lon));
            feature.tags = element.tags;
            feature.name = name;
            Some(feature)
        })
        .collect()
}
