use std::sync::Arc;
use std::time::Duration;

use trek::{MokaResultCache, SearchQuery, SearchService};
use trek_mock::MockBehavior;

use crate::helpers::{ONE, TWO, cached_only_query, departure, epoch, mock, mow_led, query, service};

#[tokio::test]
async fn identical_query_within_ttl_is_served_from_cache() {
    let one = mock(ONE);
    one.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let (svc, clock) = service(&[one.clone()]);

    let first = svc.search(&query()).await.unwrap().expect("routes");
    clock.advance(chrono::Duration::minutes(4));
    let second = svc.search(&query()).await.unwrap().expect("routes");

    assert_eq!(one.fetch_calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn entry_expires_five_minutes_after_write() {
    let one = mock(ONE);
    one.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let (svc, clock) = service(&[one.clone()]);

    svc.search(&query()).await.unwrap();
    clock.advance(chrono::Duration::minutes(5));
    // offers in the fixture stay bookable for an hour, so a refetch still finds them
    assert!(svc.search(&query()).await.unwrap().is_some());
    assert_eq!(one.fetch_calls(), 2);
}

#[tokio::test]
async fn different_filters_are_different_entries() {
    let one = mock(ONE);
    one.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let (svc, _clock) = service(&[one.clone()]);

    svc.search(&query()).await.unwrap();
    let narrowed = SearchQuery::builder("MOW", "LED", departure())
        .max_price(rust_decimal::Decimal::new(120, 0))
        .build()
        .unwrap();
    svc.search(&narrowed).await.unwrap();
    assert_eq!(one.fetch_calls(), 2);
}

#[tokio::test]
async fn only_cached_miss_never_contacts_providers() {
    let one = mock(ONE);
    let two = mock(TWO);
    one.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let (svc, _clock) = service(&[one.clone(), two.clone()]);

    assert!(svc.search(&cached_only_query()).await.unwrap().is_none());
    assert_eq!(one.fetch_calls(), 0);
    assert_eq!(two.fetch_calls(), 0);
}

#[tokio::test]
async fn only_cached_hit_returns_the_cached_response() {
    let one = mock(ONE);
    one.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let (svc, _clock) = service(&[one.clone()]);

    let warm = svc.search(&query()).await.unwrap().expect("routes");
    let hit = svc.search(&cached_only_query()).await.unwrap().expect("cached");
    assert!(Arc::ptr_eq(&warm, &hit));
    assert_eq!(one.fetch_calls(), 1);
}

#[tokio::test]
async fn only_cached_after_expiry_is_no_results() {
    let one = mock(ONE);
    one.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let (svc, clock) = service(&[one.clone()]);

    svc.search(&query()).await.unwrap().expect("routes");
    clock.advance(chrono::Duration::minutes(5) + chrono::Duration::seconds(1));
    assert!(svc.search(&cached_only_query()).await.unwrap().is_none());
    assert_eq!(one.fetch_calls(), 1);
}

#[tokio::test]
async fn no_results_are_not_cached() {
    let one = mock(ONE);
    let (svc, _clock) = service(&[one.clone()]);

    assert!(svc.search(&query()).await.unwrap().is_none());
    assert!(svc.search(&query()).await.unwrap().is_none());
    assert_eq!(one.fetch_calls(), 2);
}

#[tokio::test]
async fn default_moka_cache_serves_repeats() {
    let one = mock(ONE);
    // real clock: fixture offers dated 2030 are still in the future
    one.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let svc = SearchService::builder()
        .with_provider(one.clone())
        .build()
        .unwrap();
    assert_eq!(svc.config().cache_ttl, Duration::from_secs(300));

    svc.search(&query()).await.unwrap().expect("routes");
    svc.search(&query()).await.unwrap().expect("routes");
    assert_eq!(one.fetch_calls(), 1);
}

#[tokio::test]
async fn injected_moka_cache_is_used() {
    let one = mock(ONE);
    one.set_fetch_behavior(MockBehavior::Return(mow_led(epoch())));
    let cache = Arc::new(MokaResultCache::new(Duration::from_secs(60), 16));
    let svc = SearchService::builder()
        .with_provider(one.clone())
        .cache(cache)
        .build()
        .unwrap();

    svc.search(&query()).await.unwrap();
    svc.search(&query()).await.unwrap();
    assert_eq!(one.fetch_calls(), 1);
}
