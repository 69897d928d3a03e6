//! Configuration types shared across the search service and its cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default lifetime of a cached search response.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default upper bound on cached responses before eviction kicks in.
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

/// Global configuration for the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Absolute expiry of a cache entry, measured from the write instant.
    pub cache_ttl: Duration,
    /// Maximum number of cached responses kept by the default cache.
    pub cache_max_entries: u64,
    /// Provider names in descending priority.
    ///
    /// Priority decides which duplicate offer survives dedup. Providers not
    /// listed follow in registration order; unknown names are rejected when the
    /// service is built.
    pub provider_priority: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            provider_priority: Vec::new(),
        }
    }
}
