//! trek-http
//!
//! reqwest-backed [`RouteProvider`](trek_core::RouteProvider) implementations
//! for the two upstream search providers. Each client owns its native wire
//! shapes and converts them to and from the canonical trek types; the shared
//! [`HttpTransport`] maps transport failures and non-success statuses onto
//! `TrekError::Transport` and `TrekError::Status`.
//!
//! Clients take an injected `reqwest::Client` so callers control pooling,
//! timeouts and TLS.
#![warn(missing_docs)]

/// Provider one client and wire shapes.
pub mod one;
/// Shared HTTP transport.
pub mod transport;
/// Provider two client and wire shapes.
pub mod two;
mod wire;

pub use one::ProviderOneClient;
pub use transport::HttpTransport;
pub use two::ProviderTwoClient;
