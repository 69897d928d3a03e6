//! Canonical search query and its builder.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TrekError;

/// Optional narrowing applied to a search.
///
/// Providers map the filters their native protocol understands and silently
/// ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Upper bound for the arrival instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_date_time: Option<DateTime<Utc>>,
    /// Price ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    /// Offers must stay valid at least until this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_time_limit: Option<DateTime<Utc>>,
    /// Answer from the cache only; never contact providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_cached: Option<bool>,
}

impl SearchFilters {
    /// True when every filter is unset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.destination_date_time.is_none()
            && self.max_price.is_none()
            && self.min_time_limit.is_none()
            && self.only_cached.is_none()
    }
}

/// A validated, immutable route search query.
///
/// Construct with [`SearchQuery::builder`]; the builder rejects malformed input
/// so every `SearchQuery` in circulation is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchQuery {
    origin: String,
    destination: String,
    origin_date_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<SearchFilters>,
}

impl SearchQuery {
    /// Start building a query for the given origin, destination and departure instant.
    pub fn builder(
        origin: impl Into<String>,
        destination: impl Into<String>,
        origin_date_time: DateTime<Utc>,
    ) -> SearchQueryBuilder {
        SearchQueryBuilder {
            origin: origin.into(),
            destination: destination.into(),
            origin_date_time,
            filters: SearchFilters::default(),
        }
    }

    /// Origin location.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination location.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Departure instant (UTC).
    #[must_use]
    pub const fn origin_date_time(&self) -> DateTime<Utc> {
        self.origin_date_time
    }

    /// The filter block, if any filter was set.
    #[must_use]
    pub const fn filters(&self) -> Option<&SearchFilters> {
        self.filters.as_ref()
    }

    /// Whether the caller asked for cached results only.
    #[must_use]
    pub fn only_cached(&self) -> bool {
        self.filters
            .as_ref()
            .and_then(|f| f.only_cached)
            .unwrap_or(false)
    }
}

/// Builder for [`SearchQuery`].
#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    origin: String,
    destination: String,
    origin_date_time: DateTime<Utc>,
    filters: SearchFilters,
}

impl SearchQueryBuilder {
    /// Latest acceptable arrival instant.
    #[must_use]
    pub const fn destination_date_time(mut self, at: DateTime<Utc>) -> Self {
        self.filters.destination_date_time = Some(at);
        self
    }

    /// Price ceiling.
    #[must_use]
    pub const fn max_price(mut self, price: Decimal) -> Self {
        self.filters.max_price = Some(price);
        self
    }

    /// Minimum offer expiry instant.
    #[must_use]
    pub const fn min_time_limit(mut self, at: DateTime<Utc>) -> Self {
        self.filters.min_time_limit = Some(at);
        self
    }

    /// Answer from the cache only.
    #[must_use]
    pub const fn only_cached(mut self, yes: bool) -> Self {
        self.filters.only_cached = Some(yes);
        self
    }

    /// Replace the whole filter block.
    #[must_use]
    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Validate and build the query.
    ///
    /// # Errors
    /// Returns `InvalidArg` if origin or destination is blank, if the arrival
    /// bound precedes the departure instant, or if the price ceiling is negative.
    pub fn build(self) -> Result<SearchQuery, TrekError> {
        let origin = self.origin.trim().to_string();
        let destination = self.destination.trim().to_string();
        if origin.is_empty() {
            return Err(TrekError::InvalidArg("origin must not be empty".into()));
        }
        if destination.is_empty() {
            return Err(TrekError::InvalidArg("destination must not be empty".into()));
        }

        let mut filters = self.filters;
        if let Some(bound) = filters.destination_date_time
            && bound < self.origin_date_time
        {
            return Err(TrekError::InvalidArg(
                "destination date/time precedes origin date/time".into(),
            ));
        }
        if let Some(price) = filters.max_price {
            if price.is_sign_negative() {
                return Err(TrekError::InvalidArg("max price must not be negative".into()));
            }
            // 100 and 100.00 are the same ceiling
            filters.max_price = Some(price.normalize());
        }

        Ok(SearchQuery {
            origin,
            destination,
            origin_date_time: self.origin_date_time,
            filters: (!filters.is_empty()).then_some(filters),
        })
    }
}
