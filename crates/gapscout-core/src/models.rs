//! Domain models for the scoring engine

mod business;
mod feature;
mod request;
mod result;

pub use business::{BusinessType, DemandCategory, GrowthStatus};
pub use feature::{FeatureId, Point, RawFeature};
pub use request::AnalysisRequest;
pub use result::{AnalysisResult, DemandBreakdown, SupplyPoint};
