//! Growth classification and opportunity scoring
//!
//! Both functions are pure: the same counts and config always produce the
//! same score, so the engine is unit-testable without the data pipeline.

use crate::config::ScoringConfig;
use crate::models::GrowthStatus;

pub const VERDICT_HIGH: &str = "High potential";
pub const VERDICT_BALANCED: &str = "Balanced market";
pub const VERDICT_SATURATED: &str = "Saturated market";

pub const COLOR_HIGH: &str = "#27ae60";
pub const COLOR_BALANCED: &str = "#f39c12";
pub const COLOR_SATURATED: &str = "#c0392b";

/// Opportunity score with its derived verdict band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCard {
    /// Normalized opportunity score in [0, 5]
    pub value: f64,
    pub verdict: &'static str,
    pub verdict_color: &'static str,
}

/// Map a construction-site count to a growth status.
///
/// Counts below `growth_stable_min` are Declining, counts below
/// `growth_growing_min` are Stable, everything above is Growing. The cut
/// points are monotone, so every non-negative count maps to exactly one
/// status.
pub fn classify_growth(construction_count: u32, config: &ScoringConfig) -> GrowthStatus {
    if construction_count >= config.growth_growing_min {
        GrowthStatus::Growing
    } else if construction_count >= config.growth_stable_min {
        GrowthStatus::Stable
    } else {
        GrowthStatus::Declining
    }
}

/// Combine supply, demand, and growth into a clamped [0, 5] score.
///
/// The demand/supply ratio `demand / (supply + 1)` feeds the saturating map
/// `5 * r / (r + pivot)`, which rises with demand, falls with supply, and
/// approaches 5 as competitors vanish. A constant growth adjustment is added
/// before clamping, so Growing always outranks Declining at fixed counts.
pub fn score(
    supply_count: u32,
    demand_count: u32,
    growth: GrowthStatus,
    config: &ScoringConfig,
) -> ScoreCard {
    let ratio = demand_count as f64 / (supply_count as f64 + 1.0);
    let base = 5.0 * ratio / (ratio + config.ratio_pivot);

    let adjustment = match growth {
        GrowthStatus::Growing => config.growth_bonus_growing,
        GrowthStatus::Stable => config.growth_bonus_stable,
        GrowthStatus::Declining => config.growth_bonus_declining,
    };

    let value = ((base + adjustment).clamp(0.0, 5.0) * 100.0).round() / 100.0;

    let (verdict, verdict_color) = verdict_for(value, config);

    ScoreCard { value, verdict, verdict_color }
}

/// Resolve the verdict band for a score.
///
/// The three bands partition [0, 5]: every score maps to exactly one
/// verdict/color pair.
pub fn verdict_for(value: f64, config: &ScoringConfig) -> (&'static str, &'static str) {
    if value >= config.verdict_high_min {
        (VERDICT_HIGH, COLOR_HIGH)
    } else if value >= config.verdict_balanced_min {
        (VERDICT_BALANCED, COLOR_BALANCED)
    } else {
        (VERDICT_SATURATED, COLOR_SATURATED)
    }
}
