//! Network side of the cache.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use super::model::{RequestKey, Resource};

/// Errors from the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete (offline, refused, reset).
    #[error("Network error for {url}: {reason}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport failure description.
        reason: String,
    },

    /// The request exceeded the configured timeout.
    #[error("Timed out fetching {url}")]
    Timeout {
        /// Requested URL.
        url: String,
    },

    /// The request could not be formed.
    #[error("Invalid request {0}")]
    InvalidRequest(String),
}

/// Issues requests over the network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs the request.
    ///
    /// Any HTTP status counts as a completed fetch; only transport failures
    /// are errors.
    async fn fetch(&self, key: &RequestKey) -> Result<Resource, FetchError>;
}

/// `reqwest`-backed fetcher for one site origin.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    origin: Url,
    http_client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher that resolves relative URLs against `origin`.
    ///
    /// # Errors
    ///
    /// Returns an error if `origin` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(origin: &str, timeout: Duration) -> Result<Self, FetchError> {
        let origin = Url::parse(origin)
            .map_err(|e| FetchError::InvalidRequest(format!("origin {origin}: {e}")))?;
        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            origin,
            http_client,
        })
    }

    /// Resolves a manifest entry or request URL against the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be joined.
    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        self.origin
            .join(url)
            .map_err(|e| FetchError::InvalidRequest(format!("{url}: {e}")))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, key: &RequestKey) -> Result<Resource, FetchError> {
        let url = self.resolve(&key.url)?;
        let method = Method::from_bytes(key.method.as_bytes())
            .map_err(|e| FetchError::InvalidRequest(format!("{key}: {e}")))?;

        let transport_error = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: key.url.clone(),
                }
            } else {
                FetchError::Network {
                    url: key.url.clone(),
                    reason: e.to_string(),
                }
            }
        };

        let response = self
            .http_client
            .request(method, url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(transport_error)?;

        debug!(%key, status, bytes = body.len(), "Fetched from network");
        Ok(Resource {
            url: final_url,
            status,
            headers,
            body,
        })
    }
}
