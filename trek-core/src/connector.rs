use async_trait::async_trait;

use crate::TrekError;
pub use trek_types::ProviderKey;
use trek_types::{RouteOffer, SearchQuery};

/// Outcome of a call made through a failure-isolating wrapper.
///
/// `Unavailable` carries the suppressed upstream failure so callers can see
/// that a provider dropped out without the aggregate failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// The provider answered.
    Available(T),
    /// The provider could not be reached or answered with a non-success status.
    Unavailable(TrekError),
}

impl<T> Fetched<T> {
    /// True when the provider answered.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// The value, or `None` for an unavailable provider.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(v) => Some(v),
            Self::Unavailable(_) => None,
        }
    }

    /// The value, or `T::default()` for an unavailable provider.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.into_option().unwrap_or_default()
    }
}

/// Main trait implemented by provider clients.
///
/// A provider translates the canonical [`SearchQuery`] into its own native
/// request, performs the call, and translates its native routes back into
/// [`RouteOffer`]s. Native field names never cross this boundary.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// A stable identifier used for priority lists and logs (e.g. "provider-one").
    fn name(&self) -> &'static str;

    /// Canonical provider key constructed from the static name.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Search the provider for offers matching `query`.
    ///
    /// Filters the native protocol does not support are silently omitted.
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RouteOffer>, TrekError>;

    /// Lightweight reachability check; `Ok(())` means the provider is up.
    async fn ping(&self) -> Result<(), TrekError>;
}
