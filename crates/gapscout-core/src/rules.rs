//! Tag-driven feature classification
//!
//! Each rule is a pure predicate over a feature's tag map. The rule tables
//! are exhaustively enumerated per business type and per demand category,
//! so every classification decision is auditable and testable in isolation.

use crate::models::{BusinessType, DemandCategory, RawFeature};

/// Outcome of classifying a single feature.
///
/// Exactly one of: competitor (supply), customer source (demand),
/// construction signal, or irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Supply,
    Demand(DemandCategory),
    Construction,
    Discard,
}

/// A single tag predicate: the key must be present, and when `values` is
/// non-empty its value must be one of them. An empty value list accepts any
/// value (e.g. `office=*`).
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    pub key: &'static str,
    pub values: &'static [&'static str],
}

impl TagRule {
    pub fn matches(&self, feature: &RawFeature) -> bool {
        match feature.tag(self.key) {
            Some(value) => self.values.is_empty() || self.values.contains(&value),
            None => false,
        }
    }
}

/// Competitor tag rules per business type
pub fn supply_rules(business_type: BusinessType) -> &'static [TagRule] {
    match business_type {
        BusinessType::Cafe => &[TagRule { key: "amenity", values: &["cafe"] }],
        BusinessType::Restaurant => &[TagRule { key: "amenity", values: &["restaurant"] }],
        BusinessType::BarPub => &[TagRule { key: "amenity", values: &["bar", "pub"] }],
        BusinessType::ConvenienceStore => &[TagRule { key: "shop", values: &["convenience"] }],
        BusinessType::Pharmacy => &[TagRule { key: "amenity", values: &["pharmacy"] }],
        BusinessType::GymFitness => &[TagRule { key: "leisure", values: &["fitness_centre"] }],
        BusinessType::CoworkingSpace => &[TagRule { key: "amenity", values: &["coworking_space"] }],
    }
}

/// Active construction-site rules, checked for every business type
pub const CONSTRUCTION_RULES: &[TagRule] = &[
    TagRule { key: "landuse", values: &["construction"] },
    TagRule { key: "building", values: &["construction"] },
];

/// Demand rule sets in fixed evaluation order; the first matching set wins,
/// which guarantees the categories partition the demand features
pub const DEMAND_RULES: &[(DemandCategory, &[TagRule])] = &[
    (DemandCategory::Office, &[TagRule { key: "office", values: &[] }]),
    (
        DemandCategory::Students,
        &[TagRule { key: "amenity", values: &["school", "university", "college"] }],
    ),
    (
        DemandCategory::Residential,
        &[TagRule { key: "building", values: &["apartments", "condominium", "residential"] }],
    ),
    (
        DemandCategory::Transport,
        &[
            TagRule { key: "public_transport", values: &["station"] },
            TagRule { key: "railway", values: &["station"] },
        ],
    ),
];

fn any_match(rules: &[TagRule], feature: &RawFeature) -> bool {
    rules.iter().any(|rule| rule.matches(feature))
}

/// Assign a feature to exactly one bucket.
///
/// Supply takes precedence over everything else: a competitor is never also
/// counted as demand, even when its tags would match a demand rule.
/// Construction is checked next, then the demand categories in their fixed
/// order. Anything left unmatched is discarded.
pub fn classify(feature: &RawFeature, business_type: BusinessType) -> Classification {
    if any_match(supply_rules(business_type), feature) {
        return Classification::Supply;
    }

    if any_match(CONSTRUCTION_RULES, feature) {
        return Classification::Construction;
    }

    for (category, rules) in DEMAND_RULES {
        if any_match(rules, feature) {
            return Classification::Demand(*category);
        }
    }

    Classification::Discard
}
