//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::SearchCache;
use crate::cost::CostModel;
use crate::geo::GeoLookup;
use crate::planner::SearchConfig;
use crate::schedule::ScheduleIndex;

/// Shared application state.
///
/// Everything except the cache is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Schedule lookup tables
    pub index: Arc<ScheduleIndex>,

    /// Cell coordinates
    pub geo: Arc<GeoLookup>,

    /// Money and CO2 rates
    pub cost: Arc<CostModel>,

    /// Search configuration
    pub config: Arc<SearchConfig>,

    /// Recently computed searches
    pub cache: Arc<SearchCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        index: ScheduleIndex,
        geo: GeoLookup,
        cost: CostModel,
        config: SearchConfig,
        cache: SearchCache,
    ) -> Self {
        Self {
            index: Arc::new(index),
            geo: Arc::new(geo),
            cost: Arc::new(cost),
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }
}
