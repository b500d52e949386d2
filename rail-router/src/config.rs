//! Process configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::planner::PlannerConfig;
use crate::stations::{DirectoryClientConfig, StationCacheConfig};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub planner: PlannerConfig,
    pub directory: DirectoryClientConfig,
    pub bind_addr: SocketAddr,

    /// Where to keep the on-disk station snapshot, if anywhere
    pub station_cache: Option<StationCacheConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            planner: PlannerConfig::default(),
            directory: DirectoryClientConfig::default(),
            bind_addr: default_bind_addr(),
            station_cache: None,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

impl AppConfig {
    /// Read `RAILROAD_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        match get("RAILROAD_PLANNER_URL") {
            Some(url) => config.planner = PlannerConfig::new(url),
            None => warn!(
                default = %config.planner.base_url,
                "RAILROAD_PLANNER_URL not set, using default"
            ),
        }

        if let Some(url) = get("RAILROAD_DIRECTORY_URL") {
            config.directory = config.directory.with_base_url(url);
        }

        if let Some(addr) = get("RAILROAD_BIND_ADDR") {
            match addr.trim().parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => warn!(
                    value = %addr,
                    error = %e,
                    default = DEFAULT_BIND_ADDR,
                    "invalid RAILROAD_BIND_ADDR, using default"
                ),
            }
        }

        config.station_cache =
            get("RAILROAD_STATION_CACHE").map(|path| StationCacheConfig::new(PathBuf::from(path)));

        config
    }
}
