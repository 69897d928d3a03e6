//! Shared HTTP plumbing for provider clients.

use serde::Serialize;
use serde::de::DeserializeOwned;
use trek_core::TrekError;
use url::Url;

/// An injected `reqwest::Client` bound to one provider's base address.
///
/// Cloning is cheap; clones share the client's connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    provider: &'static str,
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    /// Bind `client` to `base` (e.g. `http://provider-one/api/v1`) for `provider`.
    #[must_use]
    pub fn new(provider: &'static str, client: reqwest::Client, base: &Url) -> Self {
        Self {
            provider,
            client,
            base: base.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Base address without a trailing slash.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, TrekError> {
        let raw = format!("{}/{}", self.base, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| TrekError::InvalidArg(format!("bad endpoint '{raw}': {e}")))
    }

    /// `POST {base}/{path}` with a JSON body and decode a JSON answer.
    ///
    /// # Errors
    /// `Transport` if the upstream cannot be reached, `Status` for a non-success
    /// status (with the response body), `Data` if the answer cannot be decoded.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "trek::http::post_json",
            level = "debug",
            skip(self, body),
            fields(provider = self.provider),
        )
    )]
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, TrekError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let target = format!("POST {url}");
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_err(&target, &e))?;
        let resp = self.ensure_success(&target, resp).await?;
        resp.json::<R>().await.map_err(|e| self.map_err(&target, &e))
    }

    /// `GET {base}/{path}`; any success status is `Ok(())`.
    ///
    /// # Errors
    /// `Transport` if the upstream cannot be reached, `Status` for a non-success status.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "trek::http::get_ok",
            level = "debug",
            skip(self),
            fields(provider = self.provider),
        )
    )]
    pub async fn get_ok(&self, path: &str) -> Result<(), TrekError> {
        let url = self.endpoint(path)?;
        let target = format!("GET {url}");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_err(&target, &e))?;
        self.ensure_success(&target, resp).await.map(|_| ())
    }

    async fn ensure_success(
        &self,
        target: &str,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, TrekError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = body_or_marker(resp.text().await);
        Err(TrekError::status(self.provider, target, status.as_u16(), body))
    }

    fn map_err(&self, target: &str, e: &reqwest::Error) -> TrekError {
        if e.is_decode() {
            TrekError::Data(format!(
                "{} answered '{target}' with an undecodable body: {e}",
                self.provider
            ))
        } else if e.is_builder() {
            TrekError::connector(self.provider, format!("cannot build '{target}': {e}"))
        } else {
            // connect, timeout, DNS, interrupted body
            TrekError::transport(self.provider, target, e.to_string())
        }
    }
}

/// Response body text, or a marker distinguishable from an empty body.
fn body_or_marker<E: std::fmt::Display>(text: Result<String, E>) -> String {
    text.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}
