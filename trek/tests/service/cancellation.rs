use std::sync::Arc;
use std::time::Duration;

use trek::TrekError;
use trek_mock::{MockBehavior, MockProvider};

use crate::helpers::{ONE, TWO, epoch, mock, mow_led, query, service};

#[tokio::test(start_paused = true)]
async fn cancel_wins_over_a_stalled_provider() {
    let fast = mock(ONE);
    fast.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let stalled = mock(TWO);
    stalled.set_fetch_behavior(MockBehavior::Hang);
    let (svc, _clock) = service(&[fast.clone(), stalled.clone()]);

    let err = svc
        .search_until(&query(), tokio::time::sleep(Duration::from_secs(30)))
        .await
        .unwrap_err();
    assert_eq!(err, TrekError::Cancelled);
    assert_eq!(stalled.fetch_calls(), 1);

    // no partial result was cached
    stalled.set_fetch_behavior(MockBehavior::Return(Vec::new()));
    svc.search(&query()).await.unwrap().expect("routes");
    assert_eq!(fast.fetch_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn completes_normally_before_the_deadline() {
    let p = Arc::new(
        MockProvider::new(ONE)
            .with_routes(mow_led(epoch()))
            .with_delay(Duration::from_secs(1)),
    );
    let (svc, _clock) = service(&[p]);

    let resp = svc
        .search_until(&query(), tokio::time::sleep(Duration::from_secs(10)))
        .await
        .unwrap()
        .expect("routes");
    assert_eq!(resp.routes.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn fan_out_is_concurrent() {
    let a = Arc::new(
        MockProvider::new(ONE)
            .with_routes(mow_led(epoch()))
            .with_delay(Duration::from_secs(5)),
    );
    let b = Arc::new(MockProvider::new(TWO).with_delay(Duration::from_secs(5)));
    let (svc, _clock) = service(&[a, b]);

    let started = tokio::time::Instant::now();
    svc.search(&query()).await.unwrap().expect("routes");
    assert!(started.elapsed() < Duration::from_secs(6));
}
