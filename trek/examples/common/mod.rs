use std::sync::Arc;

use chrono::{Duration, Utc};
use trek::RouteProvider;
use trek_mock::MockProvider;
use trek_mock::fixtures::{mow_led, offer};

/// Providers for the examples: in-memory mocks when `TREK_EXAMPLES_USE_MOCK`
/// is set, otherwise HTTP clients against the default provider hosts.
pub fn get_providers() -> Result<Vec<Arc<dyn RouteProvider>>, Box<dyn std::error::Error>> {
    if std::env::var("TREK_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using mock providers) ---");
        let now = Utc::now();
        let mut second = mow_led(now);
        // one overlap with the first provider, one offer of its own
        second.truncate(1);
        second.push(offer(
            "MOW",
            "LED",
            now + Duration::days(1) + Duration::hours(6),
            50,
            120,
            now + Duration::hours(1),
        ));
        Ok(vec![
            Arc::new(MockProvider::new("provider-one").with_routes(mow_led(now))),
            Arc::new(MockProvider::new("provider-two").with_routes(second)),
        ])
    } else {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(vec![
            Arc::new(trek_http::ProviderOneClient::with_default_base(client.clone())?),
            Arc::new(trek_http::ProviderTwoClient::with_default_base(client)?),
        ])
    }
}
