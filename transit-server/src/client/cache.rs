//! Caching layer for route backend responses.
//!
//! Route answers change only when the backend's network data does, so a
//! short TTL keeps repeated lookups of popular pairs off the backend.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::RouteSearchResult;

use super::client::RouteClient;
use super::error::ClientError;

/// Cache key: lowercased (origin, destination).
type RouteKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

fn route_key(origin: &str, destination: &str) -> RouteKey {
    (origin.trim().to_lowercase(), destination.trim().to_lowercase())
}

/// Route client with caching.
///
/// Wraps a [`RouteClient`]. Failures are never cached.
pub struct CachedRouteClient {
    client: RouteClient,
    routes: MokaCache<RouteKey, Arc<RouteSearchResult>>,
}

impl CachedRouteClient {
    /// Create a new cached client.
    pub fn new(client: RouteClient, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, routes }
    }

    /// Find routes, using the cache if available.
    pub async fn find_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Arc<RouteSearchResult>, ClientError> {
        let key = route_key(origin, destination);

        if let Some(cached) = self.routes.get(&key).await {
            debug!(origin, destination, "route cache hit");
            return Ok(cached);
        }

        debug!(origin, destination, cached = self.cache_entry_count(), "route cache miss");
        let result = Arc::new(self.client.find_route(origin, destination).await?);
        self.routes.insert(key, Arc::clone(&result)).await;

        Ok(result)
    }

    /// Approximate number of cached route answers.
    pub fn cache_entry_count(&self) -> u64 {
        self.routes.entry_count()
    }
}
