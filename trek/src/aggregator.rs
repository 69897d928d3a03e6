use std::sync::Arc;

use trek_core::{Clock, RouteOffer, SearchQuery, SearchResponse, TrekError, merge_offers, summarize};
use trek_middleware::ResilientProvider;

/// Concurrent fan-out over providers with merge, dedup and statistics.
///
/// Providers are held in priority order; that order, not arrival order,
/// decides which duplicate survives.
#[derive(Clone)]
pub struct Aggregator {
    providers: Vec<ResilientProvider>,
    clock: Arc<dyn Clock>,
}

impl Aggregator {
    /// Aggregate over `providers` (highest priority first) using `clock` for expiry checks.
    #[must_use]
    pub fn new(providers: Vec<ResilientProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { providers, clock }
    }

    /// Providers in priority order.
    #[must_use]
    pub fn providers(&self) -> &[ResilientProvider] {
        &self.providers
    }

    /// Fan out `query` to every provider and merge the answers.
    ///
    /// Unavailable providers contribute nothing. The current instant is read
    /// once, after every provider has answered.
    ///
    /// # Errors
    /// Returns the first provider defect to complete; the remaining calls are
    /// dropped. Availability failures never surface here.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "trek::aggregator",
            skip(self, query),
            fields(providers = self.providers.len()),
        )
    )]
    pub async fn aggregate(&self, query: &SearchQuery) -> Result<Option<SearchResponse>, TrekError> {
        // output stays in priority order; a defect short-circuits stalled siblings
        let tasks = self
            .providers
            .iter()
            .map(|p| async move { p.fetch(query).await.map(|f| (p.name(), f)) });
        let joined = futures::future::try_join_all(tasks).await?;

        let mut batches: Vec<Vec<RouteOffer>> = Vec::with_capacity(joined.len());
        let mut answered = 0usize;
        for (name, fetched) in joined {
            if fetched.is_available() {
                answered += 1;
            }
            let offers = fetched.unwrap_or_default();
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "trek::aggregator", provider = name, offers = offers.len(), "provider answered");
            #[cfg(not(feature = "tracing"))]
            let _ = name;
            batches.push(offers);
        }

        if answered == 0 && !self.providers.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "trek::aggregator", "no provider was available");
        }

        let routes = merge_offers(batches, self.clock.now());
        Ok(summarize(routes))
    }
}

impl core::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Aggregator")
            .field(
                "providers",
                &self.providers.iter().map(ResilientProvider::name).collect::<Vec<_>>(),
            )
            .field("clock", &self.clock)
            .finish()
    }
}
