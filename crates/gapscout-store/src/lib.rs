//! GapScout Store - Cache and history ports with in-memory backends
//!
//! The scoring core never touches these; caching and history are
//! serving-layer concerns. A cache miss must produce the same analysis as a
//! hit, modulo data staleness.

pub mod memory;
pub mod ports;

pub use memory::{MemoryAnalysisCache, MemoryHistoryStore};
pub use ports::{
    AnalysisCache, CacheKey, CacheStats, HistoryEntry, HistoryStats, HistoryStore,
};
