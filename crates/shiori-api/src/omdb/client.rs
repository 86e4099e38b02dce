use reqwest::Client;
use serde::de::DeserializeOwned;

use super::types::{RawDetail, SearchEnvelope};
use crate::cancel::CancelToken;
use crate::error::CatalogError;
use crate::traits::{CatalogClient, MovieDetail, MovieSummary};

const BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb HTTP client.
///
/// Both request kinds hit the same endpoint: `s=<title>` for search,
/// `i=<id>` for lookup. A 2xx body still carries the `Response: "False"`
/// sentinel when nothing matched, so that is checked before the body is
/// treated as a result.
pub struct OmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client at a non-default endpoint (tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api { status, message });
        }

        resp.json().await.map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn search_inner(&self, title: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        let envelope: SearchEnvelope = self.get_json(&[("s", title)]).await?;
        if envelope.is_not_found() {
            tracing::debug!(title, error = ?envelope.error, "no catalog match");
            return Err(CatalogError::NotFound);
        }
        Ok(envelope
            .search
            .into_iter()
            .map(|raw| raw.into_summary())
            .collect())
    }

    async fn fetch_inner(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        let raw: RawDetail = self.get_json(&[("i", id), ("plot", "full")]).await?;
        if raw.is_not_found() {
            tracing::debug!(id, error = ?raw.error, "no catalog entry for id");
            return Err(CatalogError::NotFound);
        }
        Ok(raw.into_detail())
    }
}

impl CatalogClient for OmdbClient {
    async fn search(
        &self,
        title: &str,
        token: &CancelToken,
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::debug!(title, "search cancelled");
                Err(CatalogError::Cancelled)
            }
            result = self.search_inner(title) => result,
        }
    }

    async fn fetch_by_id(
        &self,
        id: &str,
        token: &CancelToken,
    ) -> Result<MovieDetail, CatalogError> {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::debug!(id, "detail fetch cancelled");
                Err(CatalogError::Cancelled)
            }
            result = self.fetch_inner(id) => result,
        }
    }
}
