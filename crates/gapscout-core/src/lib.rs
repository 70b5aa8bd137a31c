//! GapScout Core - Supply/demand scoring engine
//!
//! This crate contains the location-analysis pipeline: tag-driven feature
//! classification, aggregation, growth classification, opportunity scoring,
//! and the `GeoDataSource` port the pipeline consumes.

pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod rules;
pub mod scoring;

pub use analyzer::MarketAnalyzer;
pub use error::{Result, ScoutError};
