//! Deterministic route fixtures.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use trek_core::RouteOffer;

/// Fixed reference instant used by the fixtures: 2030-01-01T00:00:00Z.
#[must_use]
pub fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_893_456_000, 0).unwrap_or_default()
}

/// Build an offer departing at `departure`, lasting `minutes`, priced `price`
/// (whole units) and bookable until `time_limit`.
#[must_use]
pub fn offer(
    origin: &str,
    destination: &str,
    departure: DateTime<Utc>,
    minutes: i64,
    price: i64,
    time_limit: DateTime<Utc>,
) -> RouteOffer {
    RouteOffer {
        origin: origin.to_string(),
        destination: destination.to_string(),
        origin_date_time: departure,
        destination_date_time: departure + Duration::minutes(minutes),
        price: Decimal::new(price, 0),
        time_limit,
    }
}

/// Three Moscow → Saint Petersburg offers departing a day after `now`,
/// priced {100, 250, 80} with durations {30, 45, 60} minutes, all bookable
/// for another hour.
#[must_use]
pub fn mow_led(now: DateTime<Utc>) -> Vec<RouteOffer> {
    let dep = now + Duration::days(1);
    let limit = now + Duration::hours(1);
    vec![
        offer("MOW", "LED", dep, 30, 100, limit),
        offer("MOW", "LED", dep + Duration::hours(2), 45, 250, limit),
        offer("MOW", "LED", dep + Duration::hours(4), 60, 80, limit),
    ]
}
