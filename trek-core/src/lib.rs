//! trek-core
//!
//! Core types, traits, and utilities shared across the trek ecosystem.
//!
//! - `types`: canonical queries, routes and responses (re-exported from `trek-types`).
//! - `connector`: the `RouteProvider` trait and the `Fetched` call outcome.
//! - `fingerprint`: deterministic cache keys for queries.
//! - `merge`: normalization, expiry filtering, dedup and statistics.
//! - `clock`: injectable time sources.
//!
//! Providers are async (`async-trait`) and must be `Send + Sync`; the
//! orchestrator in the `trek` crate drives them on a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Injectable time sources.
pub mod clock;
/// Provider trait and the `Fetched` outcome of failure-isolated calls.
pub mod connector;
/// Query fingerprints used as cache keys.
pub mod fingerprint;
/// Merge pipeline for provider offers.
pub mod merge;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use connector::{Fetched, RouteProvider};
pub use fingerprint::Fingerprint;
pub use merge::{dedup_routes, merge_offers, normalize, retain_live, summarize};
pub use types::*;
