//! Re-export of foundational types from `trek-types`.
// Consolidated re-exports so downstream crates can depend on `trek-core` only

pub use trek_types::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL, SearchConfig};
pub use trek_types::{ProviderKey, TrekError};
pub use trek_types::{Route, RouteKey, RouteOffer, SearchResponse};
pub use trek_types::{SearchFilters, SearchQuery, SearchQueryBuilder};

pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
