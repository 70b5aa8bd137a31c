//! GapScout LLM - Consultation port and adapters
//!
//! Turns a finished analysis into a streamed natural-language consultation.
//! The consultant only ever sees aggregated result fields, never raw
//! feature data, and has no ordering dependency on the scoring pipeline
//! beyond needing its output.

pub mod gemini;
pub mod ports;

pub use gemini::GeminiConsultant;
pub use ports::{AnalysisBriefing, Consultant, ConsultationStream};
