//! Aggregated search response.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::route::Route;

/// Deduplicated, filtered routes with summary statistics.
///
/// Always non-empty: an aggregation with no surviving routes is reported as
/// "no results" instead of a response, so the statistics are never defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Surviving routes, in provider-priority order.
    pub routes: Vec<Route>,
    /// Cheapest price among `routes`.
    pub min_price: Decimal,
    /// Most expensive price among `routes`.
    pub max_price: Decimal,
    /// Shortest trip duration in minutes.
    pub min_minutes_route: i64,
    /// Longest trip duration in minutes.
    pub max_minutes_route: i64,
}
