//! Merge pipeline: normalize provider offers, drop expired ones, dedup, summarize.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use trek_types::{Route, RouteKey, RouteOffer, SearchResponse};

/// Give every offer a fresh identity, preserving order.
pub fn normalize<I>(offers: I) -> Vec<Route>
where
    I: IntoIterator<Item = RouteOffer>,
{
    offers.into_iter().map(Route::from_offer).collect()
}

/// Keep only routes whose time-limit is strictly after `now`.
#[must_use]
pub fn retain_live(mut routes: Vec<Route>, now: DateTime<Utc>) -> Vec<Route> {
    routes.retain(|r| r.is_live_at(now));
    routes
}

/// De-duplicate routes by [`RouteKey`], keeping the first occurrence.
///
/// Input order is preserved among survivors, so callers control which
/// duplicate wins by the order in which they concatenate provider results.
#[must_use]
pub fn dedup_routes(routes: Vec<Route>) -> Vec<Route> {
    let mut seen: HashSet<RouteKey> = HashSet::with_capacity(routes.len());
    routes.into_iter().filter(|r| seen.insert(r.key())).collect()
}

/// Merge per-provider offer batches given in priority order (first is highest).
///
/// - Offers are normalized into routes with fresh identities.
/// - Batches are concatenated in the given order.
/// - Routes whose time-limit is not strictly after `now` are dropped.
/// - Duplicates by [`RouteKey`] are removed, keeping the first.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "trek::core::merge_offers", level = "debug", skip(batches))
)]
pub fn merge_offers<I>(batches: I, now: DateTime<Utc>) -> Vec<Route>
where
    I: IntoIterator<Item = Vec<RouteOffer>>,
{
    let routes = normalize(batches.into_iter().flatten());
    dedup_routes(retain_live(routes, now))
}

/// Build a response with min/max price and duration statistics.
///
/// Returns `None` for an empty set: there is no meaningful minimum or maximum
/// of nothing, and callers must report "no results" instead.
#[must_use]
pub fn summarize(routes: Vec<Route>) -> Option<SearchResponse> {
    let first = routes.first()?;
    let mut min_price = first.price;
    let mut max_price = first.price;
    let mut min_minutes = first.duration_minutes();
    let mut max_minutes = min_minutes;

    for r in &routes[1..] {
        let minutes = r.duration_minutes();
        min_price = min_price.min(r.price);
        max_price = max_price.max(r.price);
        min_minutes = min_minutes.min(minutes);
        max_minutes = max_minutes.max(minutes);
    }

    Some(SearchResponse {
        routes,
        min_price,
        max_price,
        min_minutes_route: min_minutes,
        max_minutes_route: max_minutes,
    })
}
