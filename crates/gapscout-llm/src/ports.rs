//! Consultation port definitions

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use gapscout_core::error::Result;
use gapscout_core::models::{AnalysisResult, BusinessType, DemandBreakdown, GrowthStatus};

/// Text chunks produced progressively by a consultant
pub type ConsultationStream = BoxStream<'static, Result<String>>;

/// The result fields a consultant is allowed to see.
///
/// Deliberately excludes the raw point lists: the consultation is grounded
/// in the aggregate numbers only.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisBriefing {
    pub business_type: BusinessType,
    pub score: f64,
    pub supply_count: u32,
    pub demand_count: u32,
    pub demand_breakdown: DemandBreakdown,
    pub growth_status: GrowthStatus,
}

impl AnalysisBriefing {
    pub fn from_result(business_type: BusinessType, result: &AnalysisResult) -> Self {
        Self {
            business_type,
            score: result.score,
            supply_count: result.supply_count,
            demand_count: result.demand_count,
            demand_breakdown: result.demand_breakdown,
            growth_status: result.growth_status,
        }
    }
}

/// Port for streaming location consultations
#[async_trait]
pub trait Consultant: Send + Sync {
    /// Generate a consultation for a finished analysis.
    ///
    /// Returns a one-way stream of text chunks forwarded to the caller
    /// verbatim.
    async fn consult(&self, briefing: &AnalysisBriefing) -> Result<ConsultationStream>;

    /// Drain the stream into a single consultation text, for callers that
    /// do not handle progressive output
    async fn consult_once(&self, briefing: &AnalysisBriefing) -> Result<String> {
        let mut stream = self.consult(briefing).await?;
        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk?);
        }
        Ok(text)
    }
}
