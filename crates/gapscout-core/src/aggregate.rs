//! Tallying classified features into counts and render lists

use std::collections::HashSet;

use crate::models::{BusinessType, DemandBreakdown, FeatureId, Point, RawFeature, SupplyPoint};
use crate::rules::{classify, Classification};

/// Display name used when a competitor feature carries no name tag
const UNNAMED: &str = "Unknown";

/// Tallies for one analysis: exact counts per bucket plus the point lists
/// retained for map rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub supply_count: u32,
    pub demand_breakdown: DemandBreakdown,
    pub construction_count: u32,
    pub supply_points: Vec<SupplyPoint>,
    pub demand_points: Vec<Point>,
}

impl Aggregation {
    /// Sum of the four demand categories
    pub fn demand_count(&self) -> u32 {
        self.demand_breakdown.total()
    }
}

/// Classify and tally a feature snapshot.
///
/// Features are keyed by id, not position: a feature returned twice at a
/// tile or query boundary is counted once, first occurrence wins. No feature
/// contributes to more than one bucket.
pub fn aggregate<'a, I>(features: I, business_type: BusinessType) -> Aggregation
where
    I: IntoIterator<Item = &'a RawFeature>,
{
    let mut seen: HashSet<FeatureId> = HashSet::new();
    let mut agg = Aggregation::default();

    for feature in features {
        if !seen.insert(feature.id) {
            continue;
        }

        match classify(feature, business_type) {
            Classification::Supply => {
                agg.supply_count += 1;
                agg.supply_points.push(SupplyPoint {
                    lat: feature.point.lat,
                    lon: feature.point.lon,
                    name: feature.name.clone().unwrap_or_else(|| UNNAMED.to_string()),
                });
            }
            Classification::Demand(category) => {
                agg.demand_breakdown.bump(category);
                agg.demand_points.push(feature.point);
            }
            Classification::Construction => {
                agg.construction_count += 1;
            }
            Classification::Discard => {}
        }
    }

    agg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(id: u64, key: &str, value: &str) -> RawFeature {
        RawFeature::new(id, Point::new(13.7465, 100.5348)).with_tag(key, value)
    }

    #[test]
    fn test_counts_per_bucket() {
        let features = vec![
            tagged(1, "amenity", "cafe").with_name("Corner Cafe"),
            tagged(2, "amenity", "cafe"),
            tagged(3, "office", "it"),
            tagged(4, "building", "apartments"),
            tagged(5, "landuse", "construction"),
            tagged(6, "natural", "tree"),
        ];

        let agg = aggregate(&features, BusinessType::Cafe);

        assert_eq!(agg.supply_count, 2);
        assert_eq!(agg.demand_count(), 2);
        assert_eq!(agg.demand_breakdown.office, 1);
        assert_eq!(agg.demand_breakdown.residential, 1);
        assert_eq!(agg.construction_count, 1);
        assert_eq!(agg.supply_points.len(), 2);
        assert_eq!(agg.demand_points.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_counted_once() {
        // Same feature id twice, as can happen at tile boundaries
        let features = vec![
            tagged(7, "amenity", "cafe"),
            tagged(7, "amenity", "cafe"),
            tagged(8, "office", "company"),
            tagged(8, "office", "company"),
        ];

        let agg = aggregate(&features, BusinessType::Cafe);

        assert_eq!(agg.supply_count, 1);
        assert_eq!(agg.demand_count(), 1);
        assert_eq!(agg.supply_points.len(), 1);
    }

    #[test]
    fn test_unnamed_supply_gets_placeholder() {
        let agg = aggregate(&[tagged(1, "amenity", "cafe")], BusinessType::Cafe);
        assert_eq!(agg.supply_points[0].name, "Unknown");
    }

    #[test]
    fn test_breakdown_sums_to_demand_count() {
        let features = vec![
            tagged(1, "office", "it"),
            tagged(2, "amenity", "school"),
            tagged(3, "building", "residential"),
            tagged(4, "public_transport", "station"),
            tagged(5, "amenity", "university"),
        ];

        let agg = aggregate(&features, BusinessType::Cafe);
        assert_eq!(agg.demand_breakdown.total(), agg.demand_count());
        assert_eq!(agg.demand_count(), 5);
        assert_eq!(agg.demand_points.len(), 5);
    }

    #[test]
    fn test_empty_snapshot() {
        let agg = aggregate(&[], BusinessType::Cafe);
        assert_eq!(agg.supply_count, 0);
        assert_eq!(agg.demand_count(), 0);
        assert_eq!(agg.construction_count, 0);
    }
}
