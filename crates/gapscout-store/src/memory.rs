//! In-memory cache and history implementations.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock
//! poisoning only occurs when another thread panicked while holding the
//! lock, which is an unrecoverable state.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use gapscout_core::error::Result;
use gapscout_core::models::{AnalysisResult, BusinessType};

use crate::ports::{
    AnalysisCache, CacheKey, CacheStats, HistoryEntry, HistoryStats, HistoryStore,
};

const DEFAULT_TTL_HOURS: i64 = 24;

/// Bound on retained history entries; oldest are evicted first
const HISTORY_CAP: usize = 100;

#[derive(Debug, Clone)]
struct CachedEntry {
    stored_at: DateTime<Utc>,
    result: AnalysisResult,
}

/// In-memory TTL cache for analysis results
#[derive(Debug, Clone)]
pub struct MemoryAnalysisCache {
    entries: Arc<RwLock<HashMap<CacheKey, CachedEntry>>>,
    ttl: Duration,
}

impl Default for MemoryAnalysisCache {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_TTL_HOURS))
    }
}

impl MemoryAnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    fn is_expired(&self, entry: &CachedEntry) -> bool {
        Utc::now() - entry.stored_at > self.ttl
    }
}

#[async_trait]
impl AnalysisCache for MemoryAnalysisCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<AnalysisResult>> {
        let expired = {
            let entries = self.entries.read().unwrap();
            match entries.get(key) {
                Some(entry) if !self.is_expired(entry) => {
                    return Ok(Some(entry.result.clone()));
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.entries.write().unwrap().remove(key);
        }
        Ok(None)
    }

    async fn put(&self, key: CacheKey, result: AnalysisResult) -> Result<()> {
        let entry = CachedEntry { stored_at: Utc::now(), result };
        self.entries.write().unwrap().insert(key, entry);
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        let entries = self.entries.read().unwrap();
        let expired = entries.values().filter(|e| self.is_expired(e)).count();
        Ok(CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            ttl_hours: self.ttl.num_hours(),
        })
    }

    async fn clear_expired(&self) -> Result<usize> {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        let now = Utc::now();
        entries.retain(|_, entry| now - entry.stored_at <= self.ttl);
        Ok(before - entries.len())
    }

    async fn clear_all(&self) -> Result<usize> {
        let mut entries = self.entries.write().unwrap();
        let cleared = entries.len();
        entries.clear();
        Ok(cleared)
    }
}

/// In-memory bounded history log
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn record(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries.push(entry);
        if entries.len() > HISTORY_CAP {
            let overflow = entries.len() - HISTORY_CAP;
            entries.drain(..overflow);
        }
        Ok(())
    }

    async fn recent(
        &self,
        limit: usize,
        business_type: Option<BusinessType>,
    ) -> Result<Vec<HistoryEntry>> {
        let entries = self.entries.read().unwrap();
        let mut matched: Vec<HistoryEntry> = entries
            .iter()
            .filter(|e| business_type.map(|bt| e.business_type == bt).unwrap_or(true))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched.truncate(limit);
        Ok(matched)
    }

    async fn near(&self, lat: f64, lon: f64, tolerance_deg: f64) -> Result<Vec<HistoryEntry>> {
        let entries = self.entries.read().unwrap();
        let mut matched: Vec<HistoryEntry> = entries
            .iter()
            .filter(|e| (e.lat - lat).abs() <= tolerance_deg && (e.lon - lon).abs() <= tolerance_deg)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matched)
    }

    async fn statistics(&self) -> Result<HistoryStats> {
        let entries = self.entries.read().unwrap();

        if entries.is_empty() {
            return Ok(HistoryStats {
                total_analyses: 0,
                business_types: HashMap::new(),
                average_score: 0.0,
                most_analyzed_type: None,
                first: None,
                last: None,
            });
        }

        let mut business_types: HashMap<String, usize> = HashMap::new();
        let mut total_score = 0.0;
        for entry in entries.iter() {
            *business_types.entry(entry.business_type.label().to_string()).or_default() += 1;
            total_score += entry.score;
        }

        let most_analyzed_type = business_types
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(label, _)| label.clone());

        let average = (total_score / entries.len() as f64 * 100.0).round() / 100.0;

        Ok(HistoryStats {
            total_analyses: entries.len(),
            business_types,
            average_score: average,
            most_analyzed_type,
            first: entries.first().map(|e| e.timestamp),
            last: entries.last().map(|e| e.timestamp),
        })
    }

    async fn clear(&self) -> Result<usize> {
        let mut entries = self.entries.write().unwrap();
        let cleared = entries.len();
        entries.clear();
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gapscout_core::models::{
        AnalysisRequest, DemandBreakdown, GrowthStatus, Point,
    };

    fn request(business_type: BusinessType) -> AnalysisRequest {
        AnalysisRequest::new(Point::new(13.7465, 100.5348), 1000.0, business_type)
    }

    fn result(score: f64) -> AnalysisResult {
        AnalysisResult {
            score,
            verdict: "High potential".to_string(),
            verdict_color: "#27ae60".to_string(),
            supply_count: 3,
            demand_count: 50,
            demand_breakdown: DemandBreakdown {
                office: 40,
                students: 0,
                residential: 10,
                transport: 0,
            },
            growth_status: GrowthStatus::Stable,
            construction_count: 2,
            supply_points: Vec::new(),
            demand_points: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        let cache = MemoryAnalysisCache::default();
        let key = CacheKey::from_request(&request(BusinessType::Cafe));

        assert!(cache.get(&key).await.unwrap().is_none());
        cache.put(key, result(4.0)).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap().unwrap().score, 4.0);
    }

    #[tokio::test]
    async fn test_nearby_requests_share_a_key() {
        // Within 1e-4 degrees the quantized keys collide by design
        let a = CacheKey::from_request(&request(BusinessType::Cafe));
        let b = CacheKey::from_request(&AnalysisRequest::new(
            Point::new(13.746504, 100.534797),
            1000.0,
            BusinessType::Cafe,
        ));
        assert_eq!(a, b);

        // Different business type never shares an entry
        let c = CacheKey::from_request(&request(BusinessType::Pharmacy));
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_expired_entries_are_dropped() {
        let cache = MemoryAnalysisCache::new(Duration::hours(-1));
        let key = CacheKey::from_request(&request(BusinessType::Cafe));

        cache.put(key, result(4.0)).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());

        cache.put(key, result(4.0)).await.unwrap();
        assert_eq!(cache.clear_expired().await.unwrap(), 1);
        assert_eq!(cache.stats().await.unwrap().total_entries, 0);
    }

    #[tokio::test]
    async fn test_history_recent_filters_by_type() {
        let store = MemoryHistoryStore::new();
        store
            .record(HistoryEntry::from_analysis(&request(BusinessType::Cafe), &result(4.0)))
            .await
            .unwrap();
        store
            .record(HistoryEntry::from_analysis(&request(BusinessType::Pharmacy), &result(2.0)))
            .await
            .unwrap();

        let all = store.recent(10, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let cafes = store.recent(10, Some(BusinessType::Cafe)).await.unwrap();
        assert_eq!(cafes.len(), 1);
        assert_eq!(cafes[0].business_type, BusinessType::Cafe);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let store = MemoryHistoryStore::new();
        for _ in 0..120 {
            store
                .record(HistoryEntry::from_analysis(&request(BusinessType::Cafe), &result(3.0)))
                .await
                .unwrap();
        }
        let stats = store.statistics().await.unwrap();
        assert_eq!(stats.total_analyses, 100);
    }

    #[tokio::test]
    async fn test_history_location_lookup() {
        let store = MemoryHistoryStore::new();
        store
            .record(HistoryEntry::from_analysis(&request(BusinessType::Cafe), &result(4.0)))
            .await
            .unwrap();

        let near = store.near(13.75, 100.53, 0.01).await.unwrap();
        assert_eq!(near.len(), 1);

        let far = store.near(14.5, 101.0, 0.01).await.unwrap();
        assert!(far.is_empty());
    }

    #[tokio::test]
    async fn test_history_statistics() {
        let store = MemoryHistoryStore::new();
        store
            .record(HistoryEntry::from_analysis(&request(BusinessType::Cafe), &result(4.0)))
            .await
            .unwrap();
        store
            .record(HistoryEntry::from_analysis(&request(BusinessType::Cafe), &result(2.0)))
            .await
            .unwrap();
        store
            .record(HistoryEntry::from_analysis(&request(BusinessType::Pharmacy), &result(3.0)))
            .await
            .unwrap();

        let stats = store.statistics().await.unwrap();
        assert_eq!(stats.total_analyses, 3);
        assert_eq!(stats.business_types["Cafe"], 2);
        assert_eq!(stats.average_score, 3.0);
        assert_eq!(stats.most_analyzed_type.as_deref(), Some("Cafe"));
        assert_eq!(store.clear().await.unwrap(), 3);
    }
}
