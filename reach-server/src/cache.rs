//! Caching layer for search results.
//!
//! A map view and the destination details that follow it ask the same
//! question with the same parameters, so finished searches are kept for a
//! short while and shared. Keys cover every input that changes the answer.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use moka::future::Cache as MokaCache;

use crate::domain::{CellId, ModeSet};
use crate::planner::{ReachabilityResult, SearchRequest};

/// Everything that identifies a search. Budgets are stored as raw bits so
/// the key can be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    source: CellId,
    start: NaiveDateTime,
    max_elapsed_mins: i64,
    max_money_bits: u64,
    max_co2_bits: u64,
    modes: ModeSet,
}

impl SearchKey {
    pub fn for_request(request: &SearchRequest) -> Self {
        let budgets = &request.budgets;
        Self {
            source: request.source.clone(),
            start: request.start,
            max_elapsed_mins: budgets.max_elapsed_mins,
            max_money_bits: budgets.max_money_euros.to_bits(),
            max_co2_bits: budgets.max_co2_kg.to_bits(),
            modes: budgets.allowed_modes,
        }
    }
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 256,
        }
    }
}

/// Cache of finished reachability searches.
pub struct SearchCache {
    results: MokaCache<SearchKey, Arc<ReachabilityResult>>,
}

impl SearchCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let results = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { results }
    }

    pub async fn get(&self, key: &SearchKey) -> Option<Arc<ReachabilityResult>> {
        self.results.get(key).await
    }

    pub async fn insert(&self, key: SearchKey, result: Arc<ReachabilityResult>) {
        self.results.insert(key, result).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.results.entry_count()
    }

    /// Flush moka's pending maintenance so counts are exact.
    pub async fn run_pending_tasks(&self) {
        self.results.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostModel;
    use crate::geo::GeoLookup;
    use crate::planner::{Budgets, Planner, SearchConfig};
    use crate::schedule::ScheduleIndex;

    fn request(source: &str, budgets: Budgets) -> SearchRequest {
        let config = SearchConfig::default();
        SearchRequest::at_hour(CellId::parse(source).unwrap(), 9, budgets, &config).unwrap()
    }

    fn result_for(request: &SearchRequest) -> Arc<ReachabilityResult> {
        let index = ScheduleIndex::default();
        let geo = GeoLookup::new();
        let cost = CostModel::default();
        let config = SearchConfig::default();
        Arc::new(Planner::new(&index, &geo, &cost, &config).search(request))
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 256);
    }

    #[test]
    fn keys_cover_every_parameter() {
        let base = SearchKey::for_request(&request("A", Budgets::default()));

        assert_eq!(base, SearchKey::for_request(&request("A", Budgets::default())));
        assert_ne!(base, SearchKey::for_request(&request("B", Budgets::default())));
        assert_ne!(
            base,
            SearchKey::for_request(&request("A", Budgets::default().with_max_money(3.0)))
        );
        assert_ne!(
            base,
            SearchKey::for_request(&request("A", Budgets::default().with_max_co2(3.0)))
        );
        assert_ne!(
            base,
            SearchKey::for_request(&request(
                "A",
                Budgets::default().without_mode(crate::domain::TransportMode::Bus)
            ))
        );

        let mut later = request("A", Budgets::default());
        later.start += chrono::Duration::hours(1);
        assert_ne!(base, SearchKey::for_request(&later));
    }

    #[tokio::test]
    async fn stores_and_returns_results() {
        let cache = SearchCache::new(&CacheConfig::default());
        let req = request("A", Budgets::default());
        let key = SearchKey::for_request(&req);

        assert!(cache.get(&key).await.is_none());

        cache.insert(key.clone(), result_for(&req)).await;
        let hit = cache.get(&key).await.unwrap();
        assert_eq!(hit.source().as_str(), "A");

        cache.invalidate_all();
        assert!(cache.get(&key).await.is_none());
    }
}
