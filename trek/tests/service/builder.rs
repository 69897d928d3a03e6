use std::sync::Arc;
use std::time::Duration;

use trek::{ProviderKey, SearchConfig, SearchService, TrekError};

use crate::helpers::{ONE, TWO, mock};

#[test]
fn no_providers_is_rejected() {
    let err = SearchService::builder().build().unwrap_err();
    assert!(matches!(err, TrekError::InvalidArg(_)));
}

#[test]
fn unknown_priority_name_is_rejected() {
    let err = SearchService::builder()
        .with_provider(mock(ONE))
        .prefer(&[ProviderKey::new("provider-three")])
        .build()
        .unwrap_err();
    match err {
        TrekError::InvalidArg(msg) => assert!(msg.contains("provider-three")),
        other => panic!("expected InvalidArg, got {other:?}"),
    }
}

#[test]
fn unlisted_providers_follow_in_registration_order() {
    let svc = SearchService::builder()
        .with_provider(mock(ONE))
        .with_provider(mock(TWO))
        .with_provider(mock("provider-three"))
        .prefer(&[ProviderKey::new("provider-three")])
        .build()
        .unwrap();
    assert_eq!(svc.provider_order(), vec!["provider-three", ONE, TWO]);
}

#[test]
fn config_block_is_applied() {
    let cfg = SearchConfig {
        cache_ttl: Duration::from_secs(60),
        cache_max_entries: 8,
        provider_priority: vec![TWO.to_string()],
    };
    let svc = SearchService::builder()
        .with_provider(mock(ONE))
        .with_provider(mock(TWO))
        .config(cfg.clone())
        .build()
        .unwrap();
    assert_eq!(svc.config(), &cfg);
    assert_eq!(svc.provider_order(), vec![TWO, ONE]);
}

#[test]
fn cache_knobs_override_defaults() {
    let svc = SearchService::builder()
        .with_provider(Arc::new(trek_mock::MockProvider::new(ONE)))
        .cache_ttl(Duration::from_secs(30))
        .cache_max_entries(2)
        .build()
        .unwrap();
    assert_eq!(svc.config().cache_ttl, Duration::from_secs(30));
    assert_eq!(svc.config().cache_max_entries, 2);
}
