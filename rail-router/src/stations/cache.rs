//! Disk snapshot of the station directory.
//!
//! Lets the directory come up populated when the directory service is
//! unreachable at startup, as long as a recent snapshot exists.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::client::DirectoryPayload;
use super::error::StationError;

/// Default snapshot TTL: 7 days. Station coordinates rarely change.
const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Snapshot file contents.
#[derive(Debug, Serialize, Deserialize)]
struct CachedDirectory {
    /// Unix timestamp when the snapshot was written.
    cached_at_secs: u64,
    /// The directory payload, as fetched.
    stations: DirectoryPayload,
}

/// Configuration for the directory snapshot.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    /// Path to the snapshot file.
    pub path: PathBuf,
    /// How long a snapshot remains usable.
    pub ttl: Duration,
}

impl StationCacheConfig {
    /// Create a config with the given path and default TTL.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self::new("stations_snapshot.json")
    }
}

/// Disk snapshot of the station directory.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    /// Create a snapshot store with the given config.
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// Load the snapshot.
    ///
    /// Returns `None` if it doesn't exist, is invalid, or has expired.
    pub fn load(&self) -> Option<DirectoryPayload> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedDirectory = serde_json::from_str(&contents).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        let age_secs = now.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(cached.stations)
    }

    /// Write the snapshot, creating parent directories as needed.
    pub fn save(&self, stations: &DirectoryPayload) -> Result<(), StationError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| StationError::Cache {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let cached = CachedDirectory {
            cached_at_secs: now,
            stations: stations.clone(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StationError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string(&cached).map_err(|e| StationError::Cache {
            message: format!("failed to serialize snapshot: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| StationError::Cache {
            message: format!("failed to write snapshot file: {}", e),
        })?;

        Ok(())
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
