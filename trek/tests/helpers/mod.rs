// Shared fixtures for service-level tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use trek::{ClockedResultCache, ManualClock, SearchQuery, SearchService, SearchServiceBuilder};
use trek_mock::MockProvider;
pub use trek_mock::fixtures::{epoch, mow_led, offer};

pub const ONE: &str = "provider-one";
pub const TWO: &str = "provider-two";

/// A manual clock frozen at the fixture epoch.
pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(epoch()))
}

pub fn mock(name: &'static str) -> Arc<MockProvider> {
    Arc::new(MockProvider::new(name))
}

/// Builder wired to `clock` for both expiry filtering and the cache.
pub fn builder_at(clock: &Arc<ManualClock>) -> SearchServiceBuilder {
    SearchService::builder()
        .clock(clock.clone())
        .cache(Arc::new(ClockedResultCache::new(
            Duration::from_secs(5 * 60),
            clock.clone(),
        )))
}

/// Service over `providers` (priority = registration order) at the fixture epoch.
pub fn service(providers: &[Arc<MockProvider>]) -> (SearchService, Arc<ManualClock>) {
    let clock = clock();
    let svc = providers
        .iter()
        .fold(builder_at(&clock), |b, p| b.with_provider(p.clone()))
        .build()
        .unwrap();
    (svc, clock)
}

pub fn departure() -> DateTime<Utc> {
    epoch() + chrono::Duration::days(1)
}

pub fn query() -> SearchQuery {
    SearchQuery::builder("MOW", "LED", departure()).build().unwrap()
}

pub fn cached_only_query() -> SearchQuery {
    SearchQuery::builder("MOW", "LED", departure())
        .only_cached(true)
        .build()
        .unwrap()
}
