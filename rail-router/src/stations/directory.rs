//! In-memory station directory.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{LatLon, StationCode};

use super::cache::StationCache;
use super::client::{DirectoryPayload, DirectorySource, StationDto};
use super::error::StationError;

/// A long-haul station with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub code: StationCode,
    pub name: String,
    pub city: String,
    pub state: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl StationRecord {
    fn from_dto(code: StationCode, dto: StationDto) -> Self {
        Self {
            code,
            name: dto.name,
            city: dto.city,
            state: dto.state,
            lat: dto.lat,
            lon: dto.lon,
        }
    }

    /// Map position, if both coordinates are known.
    pub fn position(&self) -> Option<LatLon> {
        Some([self.lat?, self.lon?])
    }

    /// Marker popup text: "name, city, state".
    pub fn popup_label(&self) -> String {
        format!("{}, {}, {}", self.name, self.city, self.state)
    }
}

/// One immutable version of the directory.
///
/// Never mutated after construction; a refresh builds a new snapshot with a
/// higher generation and swaps it in.
#[derive(Debug, Default)]
pub struct DirectorySnapshot {
    stations: HashMap<StationCode, StationRecord>,
    generation: u64,
}

impl DirectorySnapshot {
    /// Build a snapshot from a directory payload.
    ///
    /// Each record is keyed by its own `code` when it has one, otherwise by
    /// the key the service filed it under. The record's `code` is backfilled
    /// to match, so `get(record.code)` always finds it. If two records claim
    /// the same code, the one under the lexically smallest service key wins.
    pub fn from_payload(payload: DirectoryPayload, generation: u64) -> Self {
        let mut entries: Vec<(String, StationDto)> = payload.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut stations = HashMap::with_capacity(entries.len());
        for (key, mut dto) in entries {
            let code = dto
                .code
                .take()
                .map(StationCode::new)
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| StationCode::new(key));
            if code.is_empty() {
                continue;
            }
            stations
                .entry(code.clone())
                .or_insert_with(|| StationRecord::from_dto(code, dto));
        }

        Self {
            stations,
            generation,
        }
    }

    /// Look up a station by code.
    pub fn get(&self, code: &StationCode) -> Option<&StationRecord> {
        self.stations.get(code)
    }

    /// All stations, ordered by code.
    pub fn all(&self) -> Vec<&StationRecord> {
        let mut all: Vec<_> = self.stations.values().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        all
    }

    /// Stations that can be drawn on the map, ordered by code.
    pub fn markers(&self) -> Vec<&StationRecord> {
        let mut markers = self.all();
        markers.retain(|s| s.position().is_some());
        markers
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True when nothing has been loaded (or the directory was empty).
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// How many times the directory has been replaced. Zero before the
    /// first load.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Session-wide station directory, loaded from a [`DirectorySource`].
///
/// Readers take a cheap `Arc` snapshot and never hold the lock across I/O.
/// An empty directory means "not yet available", never "no stations".
pub struct StationDirectory<S> {
    inner: Arc<RwLock<Arc<DirectorySnapshot>>>,
    source: Arc<S>,
    snapshot_cache: Option<StationCache>,
}

impl<S> Clone for StationDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            source: self.source.clone(),
            snapshot_cache: self.snapshot_cache.clone(),
        }
    }
}

impl<S: DirectorySource> StationDirectory<S> {
    /// Create an empty directory backed by `source`.
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(DirectorySnapshot::default()))),
            source: Arc::new(source),
            snapshot_cache: None,
        }
    }

    /// Persist each successful fetch to disk and fall back to it when the
    /// service is unavailable.
    pub fn with_snapshot_cache(mut self, cache: StationCache) -> Self {
        self.snapshot_cache = Some(cache);
        self
    }

    /// Load the directory unless it is already populated.
    pub async fn load(&self) -> Result<usize, StationError> {
        let current = self.snapshot().await;
        if !current.is_empty() {
            return Ok(current.len());
        }
        self.refresh().await
    }

    /// Fetch the directory and replace the current snapshot.
    ///
    /// On failure the current snapshot is kept. If it is empty and a disk
    /// snapshot is available, that is used instead and the fetch error is
    /// only logged.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        match self.source.fetch_all().await {
            Ok(payload) => {
                if let Some(cache) = &self.snapshot_cache
                    && let Err(e) = cache.save(&payload)
                {
                    warn!(path = %cache.path().display(), error = %e, "failed to write station snapshot");
                }
                let count = self.replace(payload).await;
                info!(stations = count, "station directory loaded");
                Ok(count)
            }
            Err(e) => {
                let current = self.snapshot().await;
                if current.is_empty()
                    && let Some(payload) = self.snapshot_cache.as_ref().and_then(StationCache::load)
                {
                    warn!(error = %e, "station directory unavailable, using disk snapshot");
                    return Ok(self.replace(payload).await);
                }
                Err(e)
            }
        }
    }

    async fn replace(&self, payload: DirectoryPayload) -> usize {
        let mut guard = self.inner.write().await;
        let snapshot = DirectorySnapshot::from_payload(payload, guard.generation + 1);
        let count = snapshot.len();
        *guard = Arc::new(snapshot);
        count
    }
}

impl<S> StationDirectory<S> {
    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<DirectorySnapshot> {
        self.inner.read().await.clone()
    }

    /// Look up a station by code.
    pub async fn get(&self, code: &StationCode) -> Option<StationRecord> {
        self.snapshot().await.get(code).cloned()
    }

    /// All stations, ordered by code.
    pub async fn all(&self) -> Vec<StationRecord> {
        self.snapshot().await.all().into_iter().cloned().collect()
    }

    /// Whether a non-empty directory has been loaded.
    pub async fn is_loaded(&self) -> bool {
        !self.snapshot().await.is_empty()
    }
}
