//! Client for provider two (`POST /search`, `GET /ping`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trek_core::connector::{ProviderKey, RouteProvider};
use trek_core::{RouteOffer, SearchQuery, TrekError};
use url::Url;

use crate::transport::HttpTransport;
use crate::wire::utc_lenient;

/// Native search request of provider two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderTwoSearchRequest {
    /// Departure point.
    pub departure: String,
    /// Arrival point.
    pub arrival: String,
    /// Departure instant.
    pub departure_date: DateTime<Utc>,
    /// Offers must stay valid at least until this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_time_limit: Option<DateTime<Utc>>,
}

impl From<&SearchQuery> for ProviderTwoSearchRequest {
    fn from(q: &SearchQuery) -> Self {
        Self {
            departure: q.origin().to_string(),
            arrival: q.destination().to_string(),
            departure_date: q.origin_date_time(),
            // no arrival bound and no price ceiling in this protocol
            min_time_limit: q.filters().and_then(|f| f.min_time_limit),
        }
    }
}

/// Native search response of provider two.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderTwoSearchResponse {
    /// Offers found.
    #[serde(default)]
    pub routes: Vec<ProviderTwoRoute>,
}

/// A point and instant, used for both ends of a provider-two trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderTwoPoint {
    /// Location name.
    pub point: String,
    /// Instant at that location.
    #[serde(deserialize_with = "utc_lenient")]
    pub date: DateTime<Utc>,
}

/// One native offer of provider two.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderTwoRoute {
    /// Start of the trip.
    pub departure: ProviderTwoPoint,
    /// End of the trip.
    pub arrival: ProviderTwoPoint,
    /// Offer price.
    pub price: Decimal,
    /// Offer expiry.
    #[serde(deserialize_with = "utc_lenient")]
    pub time_limit: DateTime<Utc>,
}

impl From<ProviderTwoRoute> for RouteOffer {
    fn from(r: ProviderTwoRoute) -> Self {
        Self {
            origin: r.departure.point,
            destination: r.arrival.point,
            origin_date_time: r.departure.date,
            destination_date_time: r.arrival.date,
            price: r.price,
            time_limit: r.time_limit,
        }
    }
}

/// HTTP client for provider two.
#[derive(Debug, Clone)]
pub struct ProviderTwoClient {
    http: HttpTransport,
}

impl ProviderTwoClient {
    /// Static key used in priority lists.
    pub const KEY: ProviderKey = ProviderKey::new("provider-two");

    /// Address used by [`ProviderTwoClient::with_default_base`].
    pub const DEFAULT_BASE: &'static str = "http://provider-two/api/v1";

    /// Client bound to `base`, sharing the caller's `reqwest::Client`.
    #[must_use]
    pub fn new(client: reqwest::Client, base: &Url) -> Self {
        Self {
            http: HttpTransport::new(Self::KEY.as_str(), client, base),
        }
    }

    /// Client bound to [`ProviderTwoClient::DEFAULT_BASE`].
    ///
    /// # Errors
    /// Never in practice; the default address is a valid URL.
    pub fn with_default_base(client: reqwest::Client) -> Result<Self, TrekError> {
        let base = Url::parse(Self::DEFAULT_BASE)
            .map_err(|e| TrekError::InvalidArg(format!("default base: {e}")))?;
        Ok(Self::new(client, &base))
    }
}

#[async_trait]
impl RouteProvider for ProviderTwoClient {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Provider Two"
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RouteOffer>, TrekError> {
        let req = ProviderTwoSearchRequest::from(query);
        let resp: ProviderTwoSearchResponse = self.http.post_json("search", &req).await?;
        Ok(resp.routes.into_iter().map(RouteOffer::from).collect())
    }

    async fn ping(&self) -> Result<(), TrekError> {
        self.http.get_ok("ping").await
    }
}
