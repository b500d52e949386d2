//! Caching layer for stop-detail responses.
//!
//! Stop lists come from the static schedule, so the same trip's stops are
//! identical every time a rider reopens it. Only successful responses are
//! cached; a failed lookup is retried on the next selection.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{DetailRequest, StopDetail};

use super::config::DetailCacheConfig;
use super::error::PlannerError;
use super::source::StopDetailSource;

/// Cached stop list.
type StopsEntry = Arc<Vec<StopDetail>>;

/// Stop-detail source with caching.
///
/// Wraps any [`StopDetailSource`]; the cache key is the full request, since
/// the detail service may trim the stop list to the requested segment.
pub struct CachedDetailSource<S> {
    source: S,
    cache: MokaCache<DetailRequest, StopsEntry>,
}

impl<S: StopDetailSource + Sync> CachedDetailSource<S> {
    /// Create a new cached source.
    pub fn new(source: S, config: &DetailCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { source, cache }
    }
}

impl<S: StopDetailSource + Sync> StopDetailSource for CachedDetailSource<S> {
    async fn stops(&self, request: &DetailRequest) -> Result<Vec<StopDetail>, PlannerError> {
        if let Some(cached) = self.cache.get(request).await {
            trace!(trip_id = %request.trip_id, "detail cache hit");
            return Ok(cached.as_ref().clone());
        }

        let stops = self.source.stops(request).await?;
        self.cache
            .insert(request.clone(), Arc::new(stops.clone()))
            .await;

        Ok(stops)
    }
}
