use serde::{Deserialize, Serialize};

use super::{BusinessType, Point};
use crate::config::EngineConfig;
use crate::error::{Result, ScoutError};

/// Validated input for one market analysis.
///
/// Immutable once constructed; every analysis is a pure function of its
/// request plus the feature snapshot fetched for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub center: Point,
    pub radius_m: f64,
    pub business_type: BusinessType,
}

impl AnalysisRequest {
    pub fn new(center: Point, radius_m: f64, business_type: BusinessType) -> Self {
        Self { center, radius_m, business_type }
    }

    /// Check coordinates and the radius band. Out-of-range values are
    /// rejected, never clamped silently.
    pub fn validate(&self, config: &EngineConfig) -> Result<()> {
        Point::validated(self.center.lat, self.center.lon)?;

        if !self.radius_m.is_finite()
            || self.radius_m < config.radius_min_m
            || self.radius_m > config.radius_max_m
        {
            return Err(ScoutError::RadiusOutOfRange {
                radius_m: self.radius_m,
                min_m: config.radius_min_m,
                max_m: config.radius_max_m,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(radius_m: f64) -> AnalysisRequest {
        AnalysisRequest::new(Point::new(13.7465, 100.5348), radius_m, BusinessType::Cafe)
    }

    #[test]
    fn test_accepts_radius_within_band() {
        let config = EngineConfig::default();
        assert!(request(100.0).validate(&config).is_ok());
        assert!(request(1000.0).validate(&config).is_ok());
        assert!(request(5000.0).validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_radius_outside_band() {
        let config = EngineConfig::default();
        assert!(matches!(
            request(99.0).validate(&config),
            Err(ScoutError::RadiusOutOfRange { .. })
        ));
        assert!(matches!(
            request(5001.0).validate(&config),
            Err(ScoutError::RadiusOutOfRange { .. })
        ));
        assert!(request(f64::NAN).validate(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_center() {
        let config = EngineConfig::default();
        let req = AnalysisRequest::new(Point::new(91.0, 0.0), 1000.0, BusinessType::Cafe);
        assert!(matches!(
            req.validate(&config),
            Err(ScoutError::InvalidCoordinate { .. })
        ));
    }
}
