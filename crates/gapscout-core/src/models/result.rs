use serde::{Deserialize, Serialize};

use super::{DemandCategory, GrowthStatus, Point};

/// Per-category demand tally.
///
/// Invariant: the four counts partition the demand set, so their sum equals
/// `demand_count` exactly. The assembler verifies this before returning a
/// result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandBreakdown {
    #[serde(rename = "Office")]
    pub office: u32,
    #[serde(rename = "Students")]
    pub students: u32,
    #[serde(rename = "Residential")]
    pub residential: u32,
    #[serde(rename = "Transport")]
    pub transport: u32,
}

impl DemandBreakdown {
    pub fn bump(&mut self, category: DemandCategory) {
        match category {
            DemandCategory::Office => self.office += 1,
            DemandCategory::Students => self.students += 1,
            DemandCategory::Residential => self.residential += 1,
            DemandCategory::Transport => self.transport += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.office + self.students + self.residential + self.transport
    }
}

/// Competitor location retained for map rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyPoint {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

/// Fully assembled analysis outcome.
///
/// Created once per request and never mutated afterwards. The core does not
/// persist results; history, if any, is a collaborator's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: f64,
    pub verdict: String,
    pub verdict_color: String,
    pub supply_count: u32,
    pub demand_count: u32,
    pub demand_breakdown: DemandBreakdown,
    pub growth_status: GrowthStatus,
    pub construction_count: u32,
    pub supply_points: Vec<SupplyPoint>,
    pub demand_points: Vec<Point>,
}
