//! Configuration for the plan and detail service client.

use std::time::Duration;

/// Default base URL of the trip planning backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default maximum concurrent requests per endpoint. Must allow both legs of
/// a detail request to be in flight together.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for [`PlannerClient`](super::PlannerClient).
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Base URL; `/api/plan` and `/api/details` are appended
    pub base_url: String,
    /// Maximum concurrent requests to each endpoint; plan and detail
    /// requests draw from separate pools of this size
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlannerConfig {
    /// Create a config for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set maximum concurrent requests. Values below 2 are raised to 2.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(2);
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Configuration for the stop-detail cache.
#[derive(Debug, Clone)]
pub struct DetailCacheConfig {
    /// TTL for cached stop lists.
    pub ttl: Duration,

    /// Maximum number of cached stop lists.
    pub max_capacity: u64,
}

impl Default for DetailCacheConfig {
    fn default() -> Self {
        Self {
            // Stop lists come from the static schedule.
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn config_builder() {
        let config = PlannerConfig::new("http://planner.local/")
            .with_max_concurrent(8)
            .with_timeout(5);
        assert_eq!(config.base_url, "http://planner.local");
        assert_eq!(config.max_concurrent, 8);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn concurrency_floor_keeps_legs_parallel() {
        assert_eq!(PlannerConfig::default().with_max_concurrent(1).max_concurrent, 2);
    }

    #[test]
    fn detail_cache_defaults() {
        let config = DetailCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 1000);
    }
}
