use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tokio::sync::Mutex;
use trek_core::{Clock, DateTime, Fingerprint, SearchConfig, SearchResponse, Utc};

/// Time-bounded store of aggregated responses keyed by query fingerprint.
///
/// Entries expire a fixed time after they are written and are never removed
/// explicitly. Concurrent writers for the same key are last-write-wins.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// The cached response for `key`, if present and unexpired.
    async fn lookup(&self, key: &Fingerprint) -> Option<Arc<SearchResponse>>;

    /// Store `value` under `key`, restarting its expiry.
    async fn store(&self, key: Fingerprint, value: Arc<SearchResponse>);
}

/// Production cache backed by `moka` with absolute time-to-live and a size bound.
#[derive(Clone)]
pub struct MokaResultCache {
    inner: Cache<Fingerprint, Arc<SearchResponse>>,
}

impl MokaResultCache {
    /// Cache whose entries live for `ttl` after write, holding at most `max_entries`.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    /// Cache sized and timed from a [`SearchConfig`].
    #[must_use]
    pub fn from_config(cfg: &SearchConfig) -> Self {
        Self::new(cfg.cache_ttl, cfg.cache_max_entries)
    }
}

#[async_trait]
impl ResultCache for MokaResultCache {
    async fn lookup(&self, key: &Fingerprint) -> Option<Arc<SearchResponse>> {
        self.inner.get(key).await
    }

    async fn store(&self, key: Fingerprint, value: Arc<SearchResponse>) {
        self.inner.insert(key, value).await;
    }
}

struct Entry {
    value: Arc<SearchResponse>,
    expires_at: DateTime<Utc>,
}

/// Cache driven by an injected [`Clock`], so expiry is deterministic under test.
///
/// Expired entries are dropped lazily on lookup and swept on every store.
pub struct ClockedResultCache {
    inner: Mutex<HashMap<Fingerprint, Entry>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl ClockedResultCache {
    /// Cache whose entries live for `ttl` after write, as measured by `clock`.
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            clock,
        }
    }

    /// Number of entries currently held, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// True if no entries are held.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[async_trait]
impl ResultCache for ClockedResultCache {
    async fn lookup(&self, key: &Fingerprint) -> Option<Arc<SearchResponse>> {
        let now = self.clock.now();
        let mut guard = self.inner.lock().await;
        if let Some(entry) = guard.get(key)
            && now < entry.expires_at
        {
            return Some(Arc::clone(&entry.value));
        }
        guard.remove(key);
        None
    }

    async fn store(&self, key: Fingerprint, value: Arc<SearchResponse>) {
        let now = self.clock.now();
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut guard = self.inner.lock().await;
        guard.retain(|_, e| now < e.expires_at);
        guard.insert(key, Entry { value, expires_at });
    }
}
