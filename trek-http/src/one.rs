//! Client for provider one (`POST /search`, `GET /ping`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trek_core::connector::{ProviderKey, RouteProvider};
use trek_core::{RouteOffer, SearchQuery, TrekError};
use url::Url;

use crate::transport::HttpTransport;
use crate::wire::utc_lenient;

/// Native search request of provider one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderOneSearchRequest {
    /// Departure point.
    pub from: String,
    /// Arrival point.
    pub to: String,
    /// Departure instant.
    pub date_from: DateTime<Utc>,
    /// Latest arrival instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    /// Price ceiling, sent as a JSON number.
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_price: Option<Decimal>,
}

impl From<&SearchQuery> for ProviderOneSearchRequest {
    fn from(q: &SearchQuery) -> Self {
        let filters = q.filters();
        Self {
            from: q.origin().to_string(),
            to: q.destination().to_string(),
            date_from: q.origin_date_time(),
            date_to: filters.and_then(|f| f.destination_date_time),
            // min time-limit has no counterpart here
            max_price: filters.and_then(|f| f.max_price),
        }
    }
}

/// Native search response of provider one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderOneSearchResponse {
    /// Offers found.
    #[serde(default)]
    pub routes: Vec<ProviderOneRoute>,
}

/// One native offer of provider one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderOneRoute {
    /// Departure point.
    pub from: String,
    /// Arrival point.
    pub to: String,
    /// Departure instant.
    #[serde(deserialize_with = "utc_lenient")]
    pub date_from: DateTime<Utc>,
    /// Arrival instant.
    #[serde(deserialize_with = "utc_lenient")]
    pub date_to: DateTime<Utc>,
    /// Offer price.
    pub price: Decimal,
    /// Offer expiry.
    #[serde(deserialize_with = "utc_lenient")]
    pub time_limit: DateTime<Utc>,
}

impl From<ProviderOneRoute> for RouteOffer {
    fn from(r: ProviderOneRoute) -> Self {
        Self {
            origin: r.from,
            destination: r.to,
            origin_date_time: r.date_from,
            destination_date_time: r.date_to,
            price: r.price,
            time_limit: r.time_limit,
        }
    }
}

/// HTTP client for provider one.
#[derive(Debug, Clone)]
pub struct ProviderOneClient {
    http: HttpTransport,
}

impl ProviderOneClient {
    /// Static key used in priority lists.
    pub const KEY: ProviderKey = ProviderKey::new("provider-one");

    /// Address used by [`ProviderOneClient::with_default_base`].
    pub const DEFAULT_BASE: &'static str = "http://provider-one/api/v1";

    /// Client bound to `base`, sharing the caller's `reqwest::Client`.
    #[must_use]
    pub fn new(client: reqwest::Client, base: &Url) -> Self {
        Self {
            http: HttpTransport::new(Self::KEY.as_str(), client, base),
        }
    }

    /// Client bound to [`ProviderOneClient::DEFAULT_BASE`].
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
impl RouteProvider for ProviderOneClient {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Provider One"
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<RouteOffer>, TrekError> {
        let req = ProviderOneSearchRequest::from(query);
        let resp: ProviderOneSearchResponse = self.http.post_json("search", &req).await?;
        Ok(resp.routes.into_iter().map(RouteOffer::from).collect())
    }

    async fn ping(&self) -> Result<(), TrekError> {
        self.http.get_ok("ping").await
    }
}
