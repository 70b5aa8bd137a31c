//! Analysis pipeline: fetch, filter, classify, aggregate, score, assemble

use geo::{Distance, Haversine, Point as GeoPoint};

use crate::aggregate::{aggregate, Aggregation};
use crate::config::EngineConfig;
use crate::error::{Result, ScoutError};
use crate::models::{AnalysisRequest, AnalysisResult, Point, RawFeature};
use crate::ports::GeoDataSource;
use crate::scoring::{classify_growth, score};

/// Geodesic distance between two points in meters
pub fn distance_m(a: Point, b: Point) -> f64 {
    Haversine.distance(GeoPoint::new(a.lon, a.lat), GeoPoint::new(b.lon, b.lat))
}

/// Drives one analysis end to end over an injected geo data source.
///
/// Request-scoped and stateless between requests: concurrent analyses share
/// nothing mutable, each operates on its own freshly fetched snapshot.
pub struct MarketAnalyzer<G: GeoDataSource> {
    source: G,
    config: EngineConfig,
}

impl<G: GeoDataSource> MarketAnalyzer<G> {
    pub fn new(source: G, config: EngineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one analysis.
    ///
    /// Either every field of the result is populated and internally
    /// consistent, or the call fails with a typed error; a partial result is
    /// never returned. An empty area is a valid floor-band result, not an
    /// error.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        request.validate(&self.config)?;

        let snapshot = self.source.fetch_features(request.center, request.radius_m).await?;
        let fetched = snapshot.len();

        let in_radius: Vec<&RawFeature> = snapshot
            .iter()
            .filter(|f| distance_m(request.center, f.point) <= request.radius_m)
            .collect();

        tracing::debug!(
            fetched,
            in_radius = in_radius.len(),
            radius_m = request.radius_m,
            "Filtered feature snapshot"
        );

        let agg = aggregate(in_radius, request.business_type);
        verify_partition(&agg)?;

        let growth = classify_growth(agg.construction_count, &self.config.scoring);
        let card = score(agg.supply_count, agg.demand_count(), growth, &self.config.scoring);

        tracing::info!(
            business_type = %request.business_type,
            supply = agg.supply_count,
            demand = agg.demand_count(),
            construction = agg.construction_count,
            score = card.value,
            verdict = card.verdict,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            score: card.value,
            verdict: card.verdict.to_string(),
            verdict_color: card.verdict_color.to_string(),
            supply_count: agg.supply_count,
            demand_count: agg.demand_count(),
            demand_breakdown: agg.demand_breakdown,
            growth_status: growth,
            construction_count: agg.construction_count,
            supply_points: agg.supply_points,
            demand_points: agg.demand_points,
        })
    }
}

/// Cross-check the partition invariant before assembly.
///
/// The breakdown sum and the retained demand point list are produced on
/// independent paths through the aggregator; a mismatch means a classifier
/// or aggregator bug and is fatal, never swallowed.
fn verify_partition(agg: &Aggregation) -> Result<()> {
    let breakdown_total = agg.demand_breakdown.total();
    let retained = agg.demand_points.len() as u32;
    if breakdown_total != retained {
        let reason = format!(
            "demand breakdown sums to {} but {} demand points were retained",
            breakdown_total, retained
        );
        tracing::error!(%reason, "Invariant violation");
        return Err(ScoutError::InvariantViolation { reason });
    }

    let supply_retained = agg.supply_points.len() as u32;
    if agg.supply_count != supply_retained {
        let reason = format!(
            "supply count {} does not match {} retained supply points",
            agg.supply_count, supply_retained
        );
        tracing::error!(%reason, "Invariant violation");
        return Err(ScoutError::InvariantViolation { reason });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_between_known_points() {
        // Paris to London, roughly 344 km
        let paris = Point::new(48.8566, 2.3522);
        let london = Point::new(51.5074, -0.1276);
        let d = distance_m(paris, london);
        assert!(d > 339_000.0 && d < 349_000.0, "Paris-London distance {} should be ~344km", d);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Point::new(13.7465, 100.5348);
        assert!(distance_m(p, p) < 0.001);
    }
}
