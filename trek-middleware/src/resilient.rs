use std::sync::Arc;

use trek_core::{Fetched, RouteOffer, RouteProvider, SearchQuery, TrekError};

/// Failure-isolating wrapper around a single provider.
///
/// Each call is attempted exactly once. Upstream unavailability (transport
/// failure or non-success status) is logged and turned into
/// [`Fetched::Unavailable`]; any other error is a defect and is returned as
/// `Err`. No retries, no backoff, no circuit state, and no timeout of its own:
/// the caller's deadline governs.
#[derive(Clone)]
pub struct ResilientProvider {
    inner: Arc<dyn RouteProvider>,
}

impl ResilientProvider {
    /// Wrap a provider.
    #[must_use]
    pub fn new(inner: Arc<dyn RouteProvider>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// The wrapped provider.
    #[must_use]
    pub const fn inner(&self) -> &Arc<dyn RouteProvider> {
        &self.inner
    }

    /// Search the provider, isolating upstream failures.
    ///
    /// # Errors
    /// Returns the provider's error unchanged unless it is an upstream
    /// availability failure.
    pub async fn fetch(&self, query: &SearchQuery) -> Result<Fetched<Vec<RouteOffer>>, TrekError> {
        isolate(self.name(), "fetch", self.inner.fetch(query)).await
    }

    /// Ping the provider; `Ok(false)` if it is unreachable.
    ///
    /// # Errors
    /// Returns the provider's error unchanged unless it is an upstream
    /// availability failure.
    pub async fn probe(&self) -> Result<bool, TrekError> {
        isolate(self.name(), "ping", self.inner.ping())
            .await
            .map(|f| f.is_available())
    }
}

/// Run one provider call and suppress upstream availability failures.
///
/// # Errors
/// Propagates every error for which [`TrekError::is_upstream_unavailable`] is false.
pub async fn isolate<T, Fut>(
    provider: &'static str,
    operation: &'static str,
    fut: Fut,
) -> Result<Fetched<T>, TrekError>
where
    Fut: core::future::Future<Output = Result<T, TrekError>>,
{
    match fut.await {
        Ok(v) => Ok(Fetched::Available(v)),
        Err(e) if e.is_upstream_unavailable() => {
            log_unavailable(provider, operation, &e);
            Ok(Fetched::Unavailable(e))
        }
        Err(e) => Err(e),
    }
}

fn log_unavailable(provider: &'static str, operation: &'static str, err: &TrekError) {
    #[cfg(feature = "tracing")]
    match err {
        TrekError::Status {
            target,
            status,
            body,
            ..
        } => tracing::error!(
            provider,
            operation,
            target = %target,
            status = *status,
            body = %body,
            "{err}"
        ),
        TrekError::Transport { target, .. } => tracing::error!(
            provider,
            operation,
            target = %target,
            "{err}"
        ),
        other => tracing::error!(provider, operation, "{other}"),
    }
    #[cfg(not(feature = "tracing"))]
    let _ = (provider, operation, err);
}
