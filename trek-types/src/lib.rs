//! Trek-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod query;
mod response;
mod route;

pub use config::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL, SearchConfig};
pub use connector::ProviderKey;
pub use error::TrekError;
pub use query::{SearchFilters, SearchQuery, SearchQueryBuilder};
pub use response::SearchResponse;
pub use route::{Route, RouteKey, RouteOffer};
