//! GapScout API - HTTP serving layer
//!
//! Exposes the scoring pipeline plus its collaborators (geocoding,
//! consultation, cache, history) over an axum router.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;
