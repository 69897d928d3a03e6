//! trek fans a route search out to several upstream providers and answers
//! with one merged, deduplicated response.
//!
//! Overview
//! - Providers implement [`trek_core::RouteProvider`]; HTTP clients live in
//!   `trek-http`, deterministic test doubles in `trek-mock`.
//! - Every provider call goes through a failure-isolating wrapper: an
//!   unreachable provider contributes nothing instead of failing the search.
//! - Offers are concatenated in provider-priority order, expired offers are
//!   dropped, duplicates collapse onto the highest-priority copy, and the
//!   survivors are summarised (price and duration range).
//! - Responses are cached per query fingerprint for five minutes by default.
//!
//! Outcomes
//! - `Ok(Some(response))`: at least one live route.
//! - `Ok(None)`: no results, or a cached-only query that missed the cache.
//! - `Err(_)`: invalid input, a provider defect, or cancellation.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trek::{SearchQuery, SearchService};
//! use trek_http::{ProviderOneClient, ProviderTwoClient};
//!
//! let client = reqwest::Client::new();
//! let svc = SearchService::builder()
//!     .with_provider(Arc::new(ProviderOneClient::with_default_base(client.clone())?))
//!     .with_provider(Arc::new(ProviderTwoClient::with_default_base(client)?))
//!     .build()?;
//!
//! let q = SearchQuery::builder("Moscow", "Sochi", departure).build()?;
//! if let Some(resp) = svc.search(&q).await? {
//!     println!("{} routes from {}", resp.routes.len(), resp.min_price);
//! }
//! ```
//!
//! See `trek/examples/` for a runnable demonstration.
#![warn(missing_docs)]

mod aggregator;
mod service;

pub use aggregator::Aggregator;
pub use service::{SearchService, SearchServiceBuilder};

pub use trek_core::{
    Clock, DateTime, Decimal, Fetched, Fingerprint, ManualClock, ProviderKey, Route, RouteKey,
    RouteOffer, RouteProvider, SearchConfig, SearchFilters, SearchQuery, SearchQueryBuilder,
    SearchResponse, SystemClock, TrekError, Utc,
};
pub use trek_middleware::{ClockedResultCache, MokaResultCache, ResilientProvider, ResultCache};
