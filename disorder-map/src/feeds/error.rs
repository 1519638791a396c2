//! Feed error types.

use std::time::Duration;

/// Errors that can occur while fetching a feed.
///
/// These never leave the fetcher: `FeedClient::fetch` logs them and returns
/// `None`.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Request did not complete within the configured timeout
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned an error status
    #[error("upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Body is not a GeoJSON feature collection
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Client could not be configured
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Why a single feature was skipped at the parsing boundary.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("feature has no properties")]
    MissingProperties,

    #[error("invalid properties: {0}")]
    Properties(#[from] serde_json::Error),

    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("invalid geometry: {0}")]
    Geometry(String),
}
