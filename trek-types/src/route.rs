//! Canonical route records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One offer as reported by a provider, already translated into canonical
/// field names but not yet given an identity.
///
/// Providers produce these; only the aggregation pipeline turns them into
/// [`Route`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteOffer {
    /// Departure location.
    pub origin: String,
    /// Arrival location.
    pub destination: String,
    /// Departure instant (UTC).
    pub origin_date_time: DateTime<Utc>,
    /// Arrival instant (UTC).
    pub destination_date_time: DateTime<Utc>,
    /// Offer price.
    pub price: Decimal,
    /// Instant after which the offer is no longer bookable.
    pub time_limit: DateTime<Utc>,
}

/// Identity-free key under which two routes are considered the same offer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    /// Departure location.
    pub origin: String,
    /// Arrival location.
    pub destination: String,
    /// Departure instant.
    pub origin_date_time: DateTime<Utc>,
    /// Arrival instant.
    pub destination_date_time: DateTime<Utc>,
    /// Normalized price, so `100` and `100.00` collide.
    pub price: Decimal,
}

/// A canonical route in an aggregated response.
///
/// `id` is generated fresh every time an offer is normalized and is therefore
/// excluded from equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Opaque identity, unique per normalization.
    pub id: Uuid,
    /// Departure location.
    pub origin: String,
    /// Arrival location.
    pub destination: String,
    /// Departure instant (UTC).
    pub origin_date_time: DateTime<Utc>,
    /// Arrival instant (UTC).
    pub destination_date_time: DateTime<Utc>,
    /// Offer price.
    pub price: Decimal,
    /// Instant after which the offer is no longer bookable.
    pub time_limit: DateTime<Utc>,
}

impl Route {
    /// Give an offer a fresh identity.
    #[must_use]
    pub fn from_offer(offer: RouteOffer) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: offer.origin,
            destination: offer.destination,
            origin_date_time: offer.origin_date_time,
            destination_date_time: offer.destination_date_time,
            price: offer.price,
            time_limit: offer.time_limit,
        }
    }

    /// Dedup key of this route.
    #[must_use]
    pub fn key(&self) -> RouteKey {
        RouteKey {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            origin_date_time: self.origin_date_time,
            destination_date_time: self.destination_date_time,
            price: self.price.normalize(),
        }
    }

    /// Total elapsed trip time in whole minutes (truncated).
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.destination_date_time - self.origin_date_time).num_minutes()
    }

    /// True if the offer is still bookable at `now` (expiry strictly after `now`).
    #[must_use]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.time_limit > now
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.destination == other.destination
            && self.origin_date_time == other.origin_date_time
            && self.destination_date_time == other.destination_date_time
            && self.price == other.price
            && self.time_limit == other.time_limit
    }
}

impl Eq for Route {}
