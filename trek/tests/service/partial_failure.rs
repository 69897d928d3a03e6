use std::sync::Arc;

use chrono::Duration;
use rust_decimal::Decimal;
use trek::TrekError;
use trek_mock::{MockBehavior, MockProvider};

use crate::helpers::{ONE, TWO, departure, epoch, mock, offer, query, service};

fn two_routes() -> Vec<trek::RouteOffer> {
    let limit = epoch() + Duration::hours(1);
    vec![
        offer("MOW", "LED", departure(), 30, 100, limit),
        offer("MOW", "LED", departure(), 45, 150, limit),
    ]
}

#[tokio::test]
async fn unreachable_provider_is_skipped() {
    let down = Arc::new(MockProvider::unreachable(ONE));
    let up = mock(TWO);
    up.set_fetch_behavior(MockBehavior::Return(two_routes()));
    let (svc, _clock) = service(&[down.clone(), up]);

    let resp = svc.search(&query()).await.unwrap().expect("routes");
    assert_eq!(resp.routes.len(), 2);
    assert_eq!(resp.min_price, Decimal::new(100, 0));
    assert_eq!(down.fetch_calls(), 1);
}

#[tokio::test]
async fn server_error_status_is_skipped() {
    let failing = mock(ONE);
    failing.set_fetch_behavior(MockBehavior::Fail(TrekError::status(
        ONE,
        "POST http://provider-one/api/v1/search",
        500,
        "internal error",
    )));
    let up = mock(TWO);
    up.set_fetch_behavior(MockBehavior::Return(two_routes()));
    let (svc, _clock) = service(&[failing, up]);

    let resp = svc.search(&query()).await.unwrap().expect("routes");
    assert_eq!(resp.routes.len(), 2);
}

#[tokio::test]
async fn every_provider_down_is_no_results() {
    let (svc, _clock) = service(&[
        Arc::new(MockProvider::unreachable(ONE)),
        Arc::new(MockProvider::unreachable(TWO)),
    ]);
    assert!(svc.search(&query()).await.unwrap().is_none());
}

#[tokio::test]
async fn undecodable_answer_is_an_error() {
    let broken = mock(ONE);
    broken.set_fetch_behavior(MockBehavior::Fail(TrekError::Data(
        "provider-one answered with an undecodable body".into(),
    )));
    let up = mock(TWO);
    up.set_fetch_behavior(MockBehavior::Return(two_routes()));
    let (svc, _clock) = service(&[broken, up]);

    let err = svc.search(&query()).await.unwrap_err();
    assert!(matches!(err, TrekError::Data(_)));
}

#[tokio::test]
async fn defects_do_not_poison_the_cache() {
    let flaky = mock(ONE);
    flaky.set_fetch_behavior(MockBehavior::Fail(TrekError::connector(ONE, "boom")));
    let (svc, _clock) = service(&[flaky.clone()]);

    assert!(svc.search(&query()).await.is_err());
    flaky.set_fetch_behavior(MockBehavior::Return(two_routes()));
    assert!(svc.search(&query()).await.unwrap().is_some());
    assert_eq!(flaky.fetch_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn defect_surfaces_while_another_provider_stalls() {
    let broken = mock(ONE);
    broken.set_fetch_behavior(MockBehavior::Fail(TrekError::Data("missing field `Routes`".into())));
    let stalled = mock(TWO);
    stalled.set_fetch_behavior(MockBehavior::Hang);
    let (svc, _clock) = service(&[stalled.clone(), broken]);

    let started = tokio::time::Instant::now();
    let outcome = tokio::time::timeout(std::time::Duration::from_secs(3600), svc.search(&query()))
        .await
        .expect("defect must not wait for the stalled provider");
    assert!(matches!(outcome, Err(TrekError::Data(_))));
    assert!(started.elapsed() < std::time::Duration::from_secs(1));
    assert_eq!(stalled.fetch_calls(), 1);
}
