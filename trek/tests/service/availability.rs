use std::sync::Arc;

use trek::TrekError;
use trek_mock::{MockBehavior, MockProvider};

use crate::helpers::{ONE, TWO, mock, service};

#[tokio::test]
async fn one_reachable_provider_is_enough() {
    let down = Arc::new(MockProvider::unreachable(ONE));
    let up = mock(TWO);
    let (svc, _clock) = service(&[down.clone(), up.clone()]);

    assert!(svc.is_available().await.unwrap());
    assert_eq!(down.ping_calls(), 1);
    assert_eq!(up.ping_calls(), 1);
}

#[tokio::test]
async fn all_unreachable_is_unavailable() {
    let a = Arc::new(MockProvider::unreachable(ONE));
    let b = mock(TWO);
    b.set_ping_behavior(MockBehavior::Fail(TrekError::status(
        TWO,
        "GET http://provider-two/api/v1/ping",
        500,
        "",
    )));
    let (svc, _clock) = service(&[a, b]);

    assert!(!svc.is_available().await.unwrap());
}

#[tokio::test]
async fn probing_does_not_search() {
    let p = mock(ONE);
    let (svc, _clock) = service(&[p.clone()]);

    svc.is_available().await.unwrap();
    assert_eq!(p.fetch_calls(), 0);
}

#[tokio::test]
async fn defect_surfaces_only_without_a_reachable_provider() {
    let broken = mock(ONE);
    broken.set_ping_behavior(MockBehavior::Fail(TrekError::connector(ONE, "bad config")));
    let up = mock(TWO);
    let (svc, _clock) = service(&[broken.clone(), up.clone()]);
    assert!(svc.is_available().await.unwrap());

    up.set_ping_behavior(MockBehavior::Fail(MockProvider::connection_refused(TWO)));
    let err = svc.is_available().await.unwrap_err();
    assert!(matches!(err, TrekError::Connector { .. }));
}

#[tokio::test(start_paused = true)]
async fn probes_run_concurrently() {
    let slow_a = Arc::new(MockProvider::new(ONE).with_delay(std::time::Duration::from_secs(2)));
    let slow_b = Arc::new(MockProvider::new(TWO).with_delay(std::time::Duration::from_secs(2)));
    let (svc, _clock) = service(&[slow_a, slow_b]);

    let started = tokio::time::Instant::now();
    assert!(svc.is_available().await.unwrap());
    assert!(started.elapsed() < std::time::Duration::from_secs(3));
}
