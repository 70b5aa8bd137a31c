//! Gemini consultant adapter
//!
//! Calls the Gemini `streamGenerateContent` endpoint and forwards generated
//! text chunks as they arrive.

use async_trait::async_trait;
use futures::StreamExt;
use gapscout_core::error::{Result, ScoutError};
use serde_json::{json, Value};

use crate::ports::{AnalysisBriefing, Consultant, ConsultationStream};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini streaming consultant
pub struct GeminiConsultant {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiConsultant {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a consultant against the public Gemini API with the default
    /// model
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key)
    }
}

#[async_trait]
impl Consultant for GeminiConsultant {
    async fn consult(&self, briefing: &AnalysisBriefing) -> Result<ConsultationStream> {
        let prompt = build_prompt(briefing);
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse&key={}",
            self.endpoint, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            ScoutError::ConsultantUnavailable { reason: format!("Gemini request failed: {}", e) }
        })?;

        if !response.status().is_success() {
            return Err(ScoutError::ConsultantUnavailable {
                reason: format!("Gemini returned status {}", response.status()),
            });
        }

        tracing::debug!(model = %self.model, "Streaming consultation");

        // Server-sent events: accumulate bytes, emit the text of each
        // complete `data:` line
        let stream = response
            .bytes_stream()
            .scan(String::new(), |buffer, chunk| {
                let emitted: Vec<Result<String>> = match chunk {
                    Ok(bytes) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));
                        let mut texts = Vec::new();
                        while let Some(newline) = buffer.find('\n') {
                            let line = buffer[..newline].trim().to_string();
                            buffer.drain(..=newline);
                            if let Some(data) = line.strip_prefix("data: ") {
                                if let Some(text) = extract_text(data) {
                                    texts.push(Ok(text));
                                }
                            }
                        }
                        texts
                    }
                    Err(e) => vec![Err(ScoutError::ConsultantUnavailable {
                        reason: format!("Gemini stream interrupted: {}", e),
                    })],
                };
                futures::future::ready(Some(futures::stream::iter(emitted)))
            })
            .flatten();

        Ok(Box::pin(stream))
    }
}

/// Build the consultation prompt from result fields only
pub fn build_prompt(briefing: &AnalysisBriefing) -> String {
    let b = &briefing.demand_breakdown;
    format!(
        "You are an expert business strategy and site-selection consultant.\n\
         Assess the potential of this location for opening a \"{business}\" \
         based on the following statistics:\n\n\
         - Opportunity score: {score:.2} out of 5 (higher means strong demand and few competitors)\n\
         - Competing {business} locations within the analyzed radius: {supply}\n\
         - Customer-generating places nearby: {demand}\n\
         - Customer mix: Office {office}, Students {students}, Residential {residential}, Transport {transport}\n\
         - Area growth trend (new construction): {growth}\n\n\
         Respond concisely and professionally, with a blank line between sections:\n\n\
         **Verdict:** one line with your call and the key reason\n\n\
         **Strength of this location:** one point\n\n\
         **Risk to watch:** one point\n\n\
         **Recommended strategy:** one marketing or store-format suggestion suited to this customer mix",
        business = briefing.business_type,
        score = briefing.score,
        supply = briefing.supply_count,
        demand = briefing.demand_count,
        office = b.office,
        students = b.students,
        residential = b.residential,
        transport = b.transport,
        growth = briefing.growth_status,
    )
}

/// Pull the generated text out of one streamed response chunk
fn extract_text(data: &str) -> Option<String> {
    let value: Value = serde_json::from_str(data).ok()?;
    value["candidates"][0]["content"]["parts"][0]["text"].as_str().map(str::to_string)
}
