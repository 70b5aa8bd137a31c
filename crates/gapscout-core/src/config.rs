//! Engine configuration
//!
//! All scoring thresholds live here as named configuration, layered
//! defaults -> TOML file -> environment, so the cut points are auditable
//! rather than scattered through the scoring logic.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{Result, ScoutError};

/// Scoring constants: the saturation pivot, growth adjustments, growth cut
/// points, and verdict band boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Demand/supply ratio at which the base score reaches half of the
    /// maximum (the saturating map `5 * r / (r + pivot)`)
    pub ratio_pivot: f64,

    /// Additive score adjustment per growth status, applied before clamping
    pub growth_bonus_growing: f64,
    pub growth_bonus_stable: f64,
    pub growth_bonus_declining: f64,

    /// Construction-count cut points: counts below `growth_stable_min` are
    /// Declining, counts below `growth_growing_min` are Stable, the rest
    /// are Growing. Total over every non-negative count.
    pub growth_stable_min: u32,
    pub growth_growing_min: u32,

    /// Verdict band boundaries. Scores in `[verdict_high_min, 5]` are the
    /// high band, `[verdict_balanced_min, verdict_high_min)` the balanced
    /// band, and `[0, verdict_balanced_min)` the saturated band.
    pub verdict_high_min: f64,
    pub verdict_balanced_min: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ratio_pivot: 5.0,
            growth_bonus_growing: 0.5,
            growth_bonus_stable: 0.25,
            growth_bonus_declining: 0.0,
            growth_stable_min: 1,
            growth_growing_min: 3,
            verdict_high_min: 3.5,
            verdict_balanced_min: 2.0,
        }
    }
}

/// Engine-wide configuration: request bounds plus scoring constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Accepted analysis radius band in meters; requests outside are rejected
    pub radius_min_m: f64,
    pub radius_max_m: f64,

    pub scoring: ScoringConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            radius_min_m: 100.0,
            radius_max_m: 5000.0,
            scoring: ScoringConfig::default(),
        }
    }
}

/// Optional overlay as parsed from a TOML config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    radius_min_m: Option<f64>,
    radius_max_m: Option<f64>,
    #[serde(default)]
    scoring: FileScoringConfig,
}

#[derive(Debug, Default, Deserialize)]
struct FileScoringConfig {
    ratio_pivot: Option<f64>,
    growth_bonus_growing: Option<f64>,
    growth_bonus_stable: Option<f64>,
    growth_bonus_declining: Option<f64>,
    growth_stable_min: Option<u32>,
    growth_growing_min: Option<u32>,
    verdict_high_min: Option<f64>,
    verdict_balanced_min: Option<f64>,
}

impl EngineConfig {
    /// Load configuration from a TOML file, overlaying the current values
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ScoutError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file: FileConfig = toml::from_str(&content).map_err(|e| ScoutError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;

        if let Some(v) = file.radius_min_m {
            self.radius_min_m = v;
        }
        if let Some(v) = file.radius_max_m {
            self.radius_max_m = v;
        }
        let s = &mut self.scoring;
        let fs = file.scoring;
        if let Some(v) = fs.ratio_pivot {
            s.ratio_pivot = v;
        }
        if let Some(v) = fs.growth_bonus_growing {
            s.growth_bonus_growing = v;
        }
        if let Some(v) = fs.growth_bonus_stable {
            s.growth_bonus_stable = v;
        }
        if let Some(v) = fs.growth_bonus_declining {
            s.growth_bonus_declining = v;
        }
        if let Some(v) = fs.growth_stable_min {
            s.growth_stable_min = v;
        }
        if let Some(v) = fs.growth_growing_min {
            s.growth_growing_min = v;
        }
        if let Some(v) = fs.verdict_high_min {
            s.verdict_high_min = v;
        }
        if let Some(v) = fs.verdict_balanced_min {
            s.verdict_balanced_min = v;
        }

        Ok(self)
    }

    /// Overlay values from `GAPSCOUT_*` environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Some(v) = parse_env_f64("GAPSCOUT_RADIUS_MIN_M") {
            self.radius_min_m = v;
        }
        if let Some(v) = parse_env_f64("GAPSCOUT_RADIUS_MAX_M") {
            self.radius_max_m = v;
        }
        if let Some(v) = parse_env_f64("GAPSCOUT_RATIO_PIVOT") {
            self.scoring.ratio_pivot = v;
        }
        if let Some(v) = parse_env_u32("GAPSCOUT_GROWTH_STABLE_MIN") {
            self.scoring.growth_stable_min = v;
        }
        if let Some(v) = parse_env_u32("GAPSCOUT_GROWTH_GROWING_MIN") {
            self.scoring.growth_growing_min = v;
        }
        if let Some(v) = parse_env_f64("GAPSCOUT_VERDICT_HIGH_MIN") {
            self.scoring.verdict_high_min = v;
        }
        if let Some(v) = parse_env_f64("GAPSCOUT_VERDICT_BALANCED_MIN") {
            self.scoring.verdict_balanced_min = v;
        }
        self
    }

    /// Reject configurations whose cut points are not monotone
    pub fn validate(&self) -> Result<()> {
        if self.radius_min_m <= 0.0 || self.radius_min_m >= self.radius_max_m {
            return Err(ScoutError::ConfigInvalid {
                key: "radius_min_m".to_string(),
                reason: format!(
                    "radius band [{}, {}] must be positive and ordered",
                    self.radius_min_m, self.radius_max_m
                ),
            });
        }
        let s = &self.scoring;
        if s.ratio_pivot <= 0.0 {
            return Err(ScoutError::ConfigInvalid {
                key: "scoring.ratio_pivot".to_string(),
                reason: "pivot must be positive".to_string(),
            });
        }
        if s.growth_stable_min > s.growth_growing_min {
            return Err(ScoutError::ConfigInvalid {
                key: "scoring.growth_stable_min".to_string(),
                reason: "growth cut points must be ordered".to_string(),
            });
        }
        if !(0.0 < s.verdict_balanced_min
            && s.verdict_balanced_min < s.verdict_high_min
            && s.verdict_high_min < 5.0)
        {
            return Err(ScoutError::ConfigInvalid {
                key: "scoring.verdict_balanced_min".to_string(),
                reason: "verdict bands must satisfy 0 < balanced < high < 5".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env_f64(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected a number", key, raw);
            None
        }
    }
}

fn parse_env_u32(key: &str) -> Option<u32> {
    let raw = env::var(key).ok()?;
    match raw.parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected a non-negative integer", key, raw);
            None
        }
    }
}
