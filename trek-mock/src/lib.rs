//! trek-mock
//!
//! In-memory providers for CI-safe tests and examples. Behavior is scripted per
//! operation and every call is counted, so tests can assert on fan-out.
#![warn(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use trek_core::{RouteOffer, RouteProvider, SearchQuery, TrekError};

pub mod fixtures;

/// Instruction for how a mocked operation should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value.
    Return(T),
    /// Fail with the provided error.
    Fail(TrekError),
    /// Never complete (simulate a stalled upstream).
    Hang,
}

/// Scriptable provider with call counters.
pub struct MockProvider {
    name: &'static str,
    fetch: Mutex<MockBehavior<Vec<RouteOffer>>>,
    ping: Mutex<MockBehavior<()>>,
    delay: Duration,
    fetch_calls: AtomicUsize,
    ping_calls: AtomicUsize,
    last_query: Mutex<Option<SearchQuery>>,
}

impl MockProvider {
    /// A reachable provider that returns no routes.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            fetch: Mutex::new(MockBehavior::Return(Vec::new())),
            ping: Mutex::new(MockBehavior::Return(())),
            delay: Duration::ZERO,
            fetch_calls: AtomicUsize::new(0),
            ping_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// A provider whose every call fails with a connection error.
    #[must_use]
    pub fn unreachable(name: &'static str) -> Self {
        let err = Self::connection_refused(name);
        Self::new(name)
            .fetch_behavior(MockBehavior::Fail(err.clone()))
            .ping_behavior(MockBehavior::Fail(err))
    }

    /// Transport error as a refused connection would produce it.
    #[must_use]
    pub fn connection_refused(name: &'static str) -> TrekError {
        TrekError::transport(name, format!("POST http://{name}/search"), "connection refused")
    }

    /// Return `routes` from `fetch`.
    #[must_use]
    pub fn with_routes(self, routes: Vec<RouteOffer>) -> Self {
        self.fetch_behavior(MockBehavior::Return(routes))
    }

    /// Script `fetch`.
    #[must_use]
    pub fn fetch_behavior(self, behavior: MockBehavior<Vec<RouteOffer>>) -> Self {
        self.set_fetch_behavior(behavior);
        self
    }

    /// Script `ping`.
    #[must_use]
    pub fn ping_behavior(self, behavior: MockBehavior<()>) -> Self {
        self.set_ping_behavior(behavior);
        self
    }

    /// Sleep this long before answering any call.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Re-script `fetch` on a shared provider.
    pub fn set_fetch_behavior(&self, behavior: MockBehavior<Vec<RouteOffer>>) {
        *self.fetch.lock().unwrap_or_else(PoisonError::into_inner) = behavior;
    }

    /// Re-script `ping` on a shared provider.
    pub fn set_ping_behavior(&self, behavior: MockBehavior<()>) {
        *self.ping.lock().unwrap_or_else(PoisonError::into_inner) = behavior;
    }

    /// Number of `fetch` calls so far.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `ping` calls so far.
    #[must_use]
    pub fn ping_calls(&self) -> usize {
        self.ping_calls.load(Ordering::SeqCst)
    }

    /// The query seen by the most recent `fetch`.
    #[must_use]
    pub fn last_query(&self) -> Option<SearchQuery> {
        self.last_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn play<T>(&self, behavior: MockBehavior<T>) -> Result<T, TrekError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match behavior {
            MockBehavior::Return(v) => Ok(v),
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl RouteProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RouteOffer>, TrekError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(query.clone());
        let behavior = self
            .fetch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        self.play(behavior).await
    }

    async fn ping(&self) -> Result<(), TrekError> {
        self.ping_calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self
            .ping
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        self.play(behavior).await
    }
}
