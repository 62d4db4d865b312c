// Hand-written async HTTP client for the StoreHub POS API.
//
// Base URL: https://api.storehubhq.com/
// Auth: HTTP Basic (Authorization header injected as a default header)

use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::{Error, truncate_body};
use crate::transport::TransportConfig;

/// Production StoreHub API base.
pub const DEFAULT_BASE_URL: &str = "https://api.storehubhq.com";

/// An opaque StoreHub record (transaction, customer or product).
///
/// The vendor owns the schema, so records are passed through untouched.
pub type Record = Value;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the StoreHub API.
///
/// Every request carries the Basic `Authorization` header derived from the
/// [`Credentials`] it was built with. Responses are expected to be JSON
/// arrays of records.
pub struct StoreHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StoreHubClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client that authenticates every request with `credentials`.
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, credentials.header_value()?);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins append rather
    /// than replace the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized API base.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List transactions inside the `from..=to` window.
    ///
    /// `GET /transactions?from={from}&to={to}`. Dates are forwarded
    /// verbatim; StoreHub decides which formats it accepts.
    pub async fn list_transactions(&self, from: &str, to: &str) -> Result<Vec<Record>, Error> {
        self.get_records("transactions", &[("from", from), ("to", to)])
            .await
    }

    /// Snapshot of all customers. `GET /customers`
    pub async fn list_customers(&self) -> Result<Vec<Record>, Error> {
        self.get_records("customers", &[]).await
    }

    /// Snapshot of all products. `GET /products`
    pub async fn list_products(&self) -> Result<Vec<Record>, Error> {
        self.get_records("products", &[]).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get_records(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Record>, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let resp = request.send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response(resp: reqwest::Response) -> Result<Vec<Record>, Error> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "StoreHub rejected request");
            return Err(Error::Http {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let body = resp.text().await?;
        match serde_json::from_str::<Vec<Record>>(&body) {
            Ok(records) => Ok(records),
            Err(e) => {
                let preview = body
                    .char_indices()
                    .nth(200)
                    .map_or(body.as_str(), |(end, _)| &body[..end]);
                let message = format!("{e} (body preview: {preview:?})");
                Err(Error::Deserialization {
                    message,
                    body: truncate_body(body),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            StoreHubClient::with_client("https://api.storehubhq.com", reqwest::Client::new())
                .unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.storehubhq.com/");
    }

    #[test]
    fn nested_base_path_is_preserved() {
        let client =
            StoreHubClient::with_client("http://proxy.local/storehub/", reqwest::Client::new())
                .unwrap();
        assert_eq!(
            client.url("products").unwrap().as_str(),
            "http://proxy.local/storehub/products"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = StoreHubClient::with_client("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
