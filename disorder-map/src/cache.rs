//! Caching layer for feed responses.
//!
//! Refreshes can be triggered from the page as well as on a timer, so the
//! decoded collections are cached per URL for a short time to keep bursts of
//! refreshes from reaching the upstream service. Failed fetches are never
//! cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::feeds::{FeatureCollection, FeatureSource, FeedClient};

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 16,
        }
    }
}

/// A feature source with a response cache in front of it.
pub struct CachedFeedClient<S = FeedClient> {
    source: S,
    collections: MokaCache<String, Arc<FeatureCollection>>,
}

impl<S: FeatureSource> CachedFeedClient<S> {
    /// Create a new cached source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let collections = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            source,
            collections,
        }
    }

    /// Access the underlying source for operations that bypass the cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of cached collections.
    pub fn entry_count(&self) -> u64 {
        self.collections.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.collections.invalidate_all();
    }
}

impl<S: FeatureSource> FeatureSource for CachedFeedClient<S> {
    async fn fetch(&self, url: &str) -> Option<Arc<FeatureCollection>> {
        if let Some(cached) = self.collections.get(url).await {
            trace!(url, "feed cache hit");
            return Some(cached);
        }

        let fetched = self.source.fetch(url).await?;
        self.collections
            .insert(url.to_string(), fetched.clone())
            .await;
        Some(fetched)
    }
}
