use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use trek_core::connector::ProviderKey;
use trek_core::{
    Clock, Fingerprint, RouteProvider, SearchConfig, SearchQuery, SearchResponse, SystemClock,
    TrekError,
};
use trek_middleware::{MokaResultCache, ResilientProvider, ResultCache};

use crate::aggregator::Aggregator;

/// Search gateway: cache in front of a concurrent multi-provider aggregation.
pub struct SearchService {
    aggregator: Aggregator,
    cache: Arc<dyn ResultCache>,
    cfg: SearchConfig,
}

/// Builder for [`SearchService`].
pub struct SearchServiceBuilder {
    providers: Vec<Arc<dyn RouteProvider>>,
    cfg: SearchConfig,
    cache: Option<Arc<dyn ResultCache>>,
    clock: Option<Arc<dyn Clock>>,
}

impl Default for SearchServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchServiceBuilder {
    /// Empty builder with default configuration (five-minute cache TTL).
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            cfg: SearchConfig::default(),
            cache: None,
            clock: None,
        }
    }

    /// Register a provider.
    ///
    /// Registration order is the priority order unless [`prefer`](Self::prefer)
    /// says otherwise.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn RouteProvider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Put these providers first, in the given order. Unlisted providers keep
    /// their registration order after the listed ones.
    #[must_use]
    pub fn prefer(mut self, keys: &[ProviderKey]) -> Self {
        self.cfg.provider_priority = keys.iter().map(|k| k.as_str().to_string()).collect();
        self
    }

    /// Lifetime of cached responses.
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cfg.cache_ttl = ttl;
        self
    }

    /// Capacity of the default cache.
    #[must_use]
    pub const fn cache_max_entries(mut self, n: u64) -> Self {
        self.cfg.cache_max_entries = n;
        self
    }

    /// Use `cache` instead of the default in-memory store. TTL and capacity
    /// settings then belong to the supplied cache.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Time source for offer expiry checks.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: SearchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the service.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider is registered or if the priority
    /// list names a provider that is not registered.
    pub fn build(self) -> Result<SearchService, TrekError> {
        if self.providers.is_empty() {
            return Err(TrekError::InvalidArg(
                "no providers registered; add at least one via with_provider(...)".to_string(),
            ));
        }

        let known: HashSet<&'static str> = self.providers.iter().map(|p| p.name()).collect();
        if let Some(unknown) = self
            .cfg
            .provider_priority
            .iter()
            .find(|n| !known.contains(n.as_str()))
        {
            return Err(TrekError::InvalidArg(format!(
                "priority names unregistered provider '{unknown}'"
            )));
        }

        let ordered = ordered(self.providers, &self.cfg.provider_priority);
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MokaResultCache::from_config(&self.cfg)));

        Ok(SearchService {
            aggregator: Aggregator::new(
                ordered.into_iter().map(ResilientProvider::new).collect(),
                clock,
            ),
            cache,
            cfg: self.cfg,
        })
    }
}

fn ordered(providers: Vec<Arc<dyn RouteProvider>>, pref: &[String]) -> Vec<Arc<dyn RouteProvider>> {
    // first mention wins if a name is listed twice
    let mut pos: HashMap<&str, usize> = HashMap::new();
    for (i, n) in pref.iter().enumerate() {
        pos.entry(n.as_str()).or_insert(i);
    }
    let mut v: Vec<(usize, Arc<dyn RouteProvider>)> = providers.into_iter().enumerate().collect();
    v.sort_by_key(|(orig_i, p)| (pos.get(p.name()).copied().unwrap_or(usize::MAX), *orig_i));
    v.into_iter().map(|(_, p)| p).collect()
}

impl SearchService {
    /// Start building a service.
    ///
    /// ```rust,ignore
    /// let svc = trek::SearchService::builder()
    ///     .with_provider(Arc::new(ProviderOneClient::with_default_base(client.clone())?))
    ///     .with_provider(Arc::new(ProviderTwoClient::with_default_base(client)?))
    ///     .prefer(&[ProviderTwoClient::KEY])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> SearchServiceBuilder {
        SearchServiceBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Provider names in effective priority order.
    #[must_use]
    pub fn provider_order(&self) -> Vec<&'static str> {
        self.aggregator.providers().iter().map(ResilientProvider::name).collect()
    }

    /// Search all providers, answering from the cache when possible.
    ///
    /// `Ok(None)` means "no results": nothing survived filtering, or the query
    /// asked for cached results only and none were cached. Only non-empty
    /// responses are cached.
    ///
    /// # Errors
    /// Returns an error if the query cannot be fingerprinted or a provider
    /// fails with a defect. Unreachable providers are not errors.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "trek::service",
            skip(self, query),
            fields(origin = query.origin(), destination = query.destination()),
        )
    )]
    pub async fn search(&self, query: &SearchQuery) -> Result<Option<Arc<SearchResponse>>, TrekError> {
        let key = Fingerprint::of(query)?;

        if let Some(hit) = self.cache.lookup(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "trek::service", fingerprint = %key, "cache hit");
            return Ok(Some(hit));
        }

        if query.only_cached() {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "trek::service", fingerprint = %key, "cache miss with only-cached set");
            return Ok(None);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "trek::service", fingerprint = %key, "cache miss");

        let Some(resp) = self.aggregator.aggregate(query).await? else {
            #[cfg(feature = "tracing")]
            tracing::info!(target: "trek::service", "no routes found");
            return Ok(None);
        };

        #[cfg(feature = "tracing")]
        tracing::info!(
            target: "trek::service",
            routes = resp.routes.len(),
            min_price = %resp.min_price,
            max_price = %resp.max_price,
            "aggregated"
        );

        let resp = Arc::new(resp);
        self.cache.store(key, Arc::clone(&resp)).await;
        Ok(Some(resp))
    }

    /// Like [`search`](Self::search), but gives up as soon as `cancel` resolves.
    ///
    /// In-flight provider calls are dropped and nothing is cached.
    ///
    /// # Errors
    /// `TrekError::Cancelled` if `cancel` fires first; otherwise as [`search`](Self::search).
    pub async fn search_until<C>(
        &self,
        query: &SearchQuery,
        cancel: C,
    ) -> Result<Option<Arc<SearchResponse>>, TrekError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "trek::service", "search cancelled");
                Err(TrekError::Cancelled)
            }
            res = self.search(query) => res,
        }
    }

    /// Probe every provider concurrently; true if at least one is reachable.
    ///
    /// # Errors
    /// Returns a provider defect only when no provider reported itself reachable.
    #[cfg_attr(feature = "tracing", tracing::instrument(target = "trek::service", skip(self)))]
    pub async fn is_available(&self) -> Result<bool, TrekError> {
        let probes = self.aggregator.providers().iter().map(ResilientProvider::probe);
        let results = futures::future::join_all(probes).await;

        let mut defect = None;
        for r in results {
            match r {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(e) => {
                    defect.get_or_insert(e);
                }
            }
        }
        defect.map_or(Ok(false), Err)
    }
}

impl core::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SearchService")
            .field("aggregator", &self.aggregator)
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}
