//! Nominatim geocoding client
//!
//! Free-text place search and autocomplete. Raw Nominatim hits are
//! re-ranked locally: specific points of interest beat administrative
//! areas, and matches on the query prefix beat incidental substring hits.

use std::time::Duration;

use gapscout_core::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How many raw hits to request before re-ranking
const RAW_LIMIT: usize = 20;

/// How many suggestions to return after re-ranking
const SUGGESTION_LIMIT: usize = 8;

/// A ranked geocoding suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSuggestion {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

/// HTTP client for the Nominatim search API
pub struct NominatimClient {
    endpoint: String,
    user_agent: String,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            ScoutError::UpstreamUnavailable { reason: format!("Failed to build HTTP client: {}", e) }
        })?;
        Ok(Self { endpoint: endpoint.into(), user_agent: user_agent.into(), client })
    }

    /// Create a client against the public Nominatim instance.
    ///
    /// Nominatim's usage policy requires an identifying user agent.
    pub fn public(user_agent: impl Into<String>) -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT, user_agent, DEFAULT_TIMEOUT)
    }

    /// Geocode free text to the best-ranked match
    pub async fn search(&self, query: &str) -> Result<PlaceSuggestion> {
        self.ranked(query, None)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ScoutError::LocationNotFound { query: query.to_string() })
    }

    /// Ranked autocomplete suggestions, optionally restricted to a country
    /// code
    pub async fn autocomplete(
        &self,
        query: &str,
        country: Option<&str>,
    ) -> Result<Vec<PlaceSuggestion>> {
        self.ranked(query, country).await
    }

    async fn ranked(&self, query: &str, country: Option<&str>) -> Result<Vec<PlaceSuggestion>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", RAW_LIMIT.to_string()),
            ("addressdetails", "1".to_string()),
            ("extratags", "1".to_string()),
        ];
        if let Some(code) = country {
            if !code.is_empty() {
                params.push(("countrycodes", code.to_string()));
            }
        }

        let response = self
            .client
            .get(format!("{}/search", self.endpoint))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&params)
            .send()
            .await
            .map_err(|e| ScoutError::UpstreamUnavailable {
                reason: format!("Nominatim request failed: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(ScoutError::UpstreamUnavailable {
                reason: format!("Nominatim returned status {}", response.status()),
            });
        }

        let places: Vec<NominatimPlace> =
            response.json().await.map_err(|e| ScoutError::UpstreamUnavailable {
                reason: format!("Failed to parse Nominatim response: {}", e),
            })?;

        Ok(rank_places(places, query))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NominatimPlace {
    pub display_name: String,
    /// Nominatim serializes coordinates as strings
    pub lat: String,
    pub lon: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub importance: f64,
}

/// Relevance ranking: filter out non-places, score the rest, return the top
/// suggestions in descending score order
pub(crate) fn rank_places(places: Vec<NominatimPlace>, query: &str) -> Vec<PlaceSuggestion> {
    let mut scored: Vec<(f64, PlaceSuggestion)> = places
        .into_iter()
        .filter(is_relevant)
        .filter_map(|place| {
            let lat = place.lat.parse::<f64>().ok()?;
            let lon = place.lon.parse::<f64>().ok()?;
            let score = relevance(&place, query);
            Some((score, PlaceSuggestion { display_name: place.display_name, lat, lon }))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(SUGGESTION_LIMIT).map(|(_, s)| s).collect()
}

/// Drop hits that are never useful as a business location: bare countries,
/// seas, oceans, and continents
fn is_relevant(place: &NominatimPlace) -> bool {
    if place.class == "boundary"
        && place.kind == "administrative"
        && place.display_name.split(',').count() <= 1
    {
        return false;
    }
    if (place.class == "natural" || place.class == "waterway")
        && matches!(place.kind.as_str(), "sea" | "ocean" | "continent")
    {
        return false;
    }
    true
}

fn relevance(place: &NominatimPlace, query: &str) -> f64 {
    // Specific POIs outrank streets, which outrank districts and
    // administrative boundaries
    let mut score = match place.class.as_str() {
        "amenity" => 100.0,
        "shop" => 95.0,
        "tourism" => 90.0,
        "leisure" => 85.0,
        "building" => 80.0,
        "highway" => 70.0,
        "place" => match place.kind.as_str() {
            "city_block" => 62.0,
            "neighbourhood" => 60.0,
            "quarter" => 58.0,
            "suburb" => 55.0,
            "hamlet" => 50.0,
            "village" => 45.0,
            "town" => 40.0,
            "city" => 35.0,
            "state" => 10.0,
            "country" => 5.0,
            _ => 30.0,
        },
        "boundary" => 20.0,
        _ => 40.0,
    };

    score += place.importance * 20.0;

    let display_lower = place.display_name.to_lowercase();
    let query_lower = query.to_lowercase();
    if display_lower.starts_with(&query_lower) {
        score += 30.0;
    } else if display_lower
        .split(',')
        .next()
        .map(|first| first.to_lowercase().contains(&query_lower))
        .unwrap_or(false)
    {
        score += 20.0;
    } else if display_lower.contains(&query_lower) {
        score += 10.0;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(display_name: &str, class: &str, kind: &str, importance: f64) -> NominatimPlace {
        NominatimPlace {
            display_name: display_name.to_string(),
            lat: "13.7465".to_string(),
            lon: "100.5348".to_string(),
            kind: kind.to_string(),
            class: class.to_string(),
            importance,
        }
    }

    #[test]
    fn test_poi_outranks_administrative_boundary() {
        let suggestions = rank_places(
            vec![
                place("Siam Province, Thailand", "boundary", "administrative", 0.8),
                place("Siam Coffee, Bangkok, Thailand", "amenity", "cafe", 0.2),
            ],
            "siam",
        );

        assert_eq!(suggestions[0].display_name, "Siam Coffee, Bangkok, Thailand");
    }

    #[test]
    fn test_prefix_match_gets_a_bonus() {
        let suggestions = rank_places(
            vec![
                place("Old Siam Mall, Bangkok", "shop", "mall", 0.3),
                place("Siam Square, Bangkok", "shop", "mall", 0.3),
            ],
            "siam",
        );

        assert_eq!(suggestions[0].display_name, "Siam Square, Bangkok");
    }

    #[test]
    fn test_bare_country_and_ocean_are_dropped() {
        let suggestions = rank_places(
            vec![
                place("Thailand", "boundary", "administrative", 0.9),
                place("Pacific Ocean", "natural", "ocean", 0.9),
                place("Siam Square, Bangkok", "place", "neighbourhood", 0.4),
            ],
            "siam",
        );

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].display_name, "Siam Square, Bangkok");
    }

    #[test]
    fn test_suggestions_capped_at_eight() {
        let places: Vec<NominatimPlace> =
            (0..15).map(|i| place(&format!("Place {}", i), "amenity", "cafe", 0.1)).collect();
        assert_eq!(rank_places(places, "place").len(), 8);
    }

    #[test]
    fn test_unparsable_coordinates_are_skipped() {
        let mut bad = place("Broken, Nowhere", "amenity", "cafe", 0.5);
        bad.lat = "not-a-number".to_string();
        assert!(rank_places(vec![bad], "broken").is_empty());
    }

    #[test]
    fn test_nominatim_payload_parses() {
        let raw = r#"[{"display_name": "Siam Square, Bangkok",
                       "lat": "13.7465", "lon": "100.5348",
                       "type": "neighbourhood", "class": "place",
                       "importance": 0.61}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(raw).unwrap();
        assert_eq!(places[0].class, "place");
        assert_eq!(places[0].importance, 0.61);
    }
}
