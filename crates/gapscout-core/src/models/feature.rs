use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, ScoutError};

/// Unique identifier for a raw map feature (e.g. an OSM element id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureId(pub u64);

/// Geographic coordinate in WGS 84 decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct a point, rejecting non-finite or out-of-range coordinates
    pub fn validated(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ScoutError::InvalidCoordinate {
                field: "lat",
                value: lat,
                expected: "-90..=90",
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ScoutError::InvalidCoordinate {
                field: "lon",
                value: lon,
                expected: "-180..=180",
            });
        }
        Ok(Self { lat, lon })
    }
}

/// Raw point-of-interest record as returned by a geo data source.
///
/// Owned transiently by the analysis that fetched it; the pipeline consumes
/// one snapshot per request and never shares features across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    pub id: FeatureId,
    pub point: Point,
    pub name: Option<String>,
    pub tags: HashMap<String, String>,
}

impl RawFeature {
    pub fn new(id: u64, point: Point) -> Self {
        Self {
            id: FeatureId(id),
            point,
            name: None,
            tags: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Look up a tag value by key
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_validation_accepts_in_range() {
        assert!(Point::validated(13.7465, 100.5348).is_ok());
        assert!(Point::validated(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_point_validation_rejects_out_of_range() {
        assert!(Point::validated(90.1, 0.0).is_err());
        assert!(Point::validated(0.0, -180.5).is_err());
        assert!(Point::validated(f64::NAN, 0.0).is_err());
        assert!(Point::validated(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_feature_tag_lookup() {
        let feature = RawFeature::new(1, Point::new(0.0, 0.0)).with_tag("amenity", "cafe");
        assert_eq!(feature.tag("amenity"), Some("cafe"));
        assert_eq!(feature.tag("shop"), None);
    }
}
