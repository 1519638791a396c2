//! HTTP client for the open data feeds.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT_CHARSET, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use super::FeatureSource;
use super::error::FeedError;
use super::types::FeatureCollection;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches and decodes GeoJSON feature collections.
///
/// Each request is bounded by a timeout; when it elapses the in-flight
/// request is dropped and the fetch yields `None`.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl FeedClient {
    /// Create a client with the default timeout.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Config(e.to_string()))?;

        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a feed, returning the error on failure.
    pub async fn try_fetch(&self, url: &str) -> Result<FeatureCollection, FeedError> {
        let response = self.http.get(url).send().await.map_err(|e| self.classify(url, e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Upstream {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(url, e))?;
        let text = String::from_utf8_lossy(&bytes);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        serde_json::from_str(text).map_err(|e| FeedError::Json {
            message: e.to_string(),
        })
    }

    /// Fetch a feed. Any failure is logged and yields `None`.
    pub async fn fetch(&self, url: &str) -> Option<FeatureCollection> {
        match self.try_fetch(url).await {
            Ok(collection) => {
                debug!(url, features = collection.features.len(), "fetched feed");
                Some(collection)
            }
            Err(e) => {
                warn!(url, error = %e, "feed fetch failed");
                None
            }
        }
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> FeedError {
        if err.is_timeout() {
            FeedError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            FeedError::Http(err)
        }
    }
}

impl FeatureSource for FeedClient {
    async fn fetch(&self, url: &str) -> Option<Arc<FeatureCollection>> {
        FeedClient::fetch(self, url).await.map(Arc::new)
    }
}
