use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rail_router::config::AppConfig;
use rail_router::itinerary::ItineraryAssembler;
use rail_router::planner::{CachedDetailSource, DetailCacheConfig, PlannerClient};
use rail_router::stations::{DirectoryClient, NameTable, StationCache, StationDirectory};
use rail_router::web::{AppState, create_router};

/// How often to refresh the station directory (24 hours).
const STATION_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    // Plan and detail service, with cached stop lists
    let planner =
        PlannerClient::new(config.planner.clone()).expect("Failed to create planner client");
    let details = CachedDetailSource::new(planner.clone(), &DetailCacheConfig::default());
    let assembler = ItineraryAssembler::new(planner, details);

    // Station directory; loads in the background
    let directory_client = DirectoryClient::new(config.directory.clone())
        .expect("Failed to create directory client");
    let mut directory = StationDirectory::new(directory_client);
    if let Some(cache_config) = config.station_cache.clone() {
        directory = directory.with_snapshot_cache(StationCache::new(cache_config));
    }

    let directory_refresh = directory.clone();
    tokio::spawn(async move {
        if let Err(e) = directory_refresh.load().await {
            warn!(error = %e, "station directory unavailable, map will stay empty");
        }
        let mut interval = tokio::time::interval(STATION_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            if let Err(e) = directory_refresh.refresh().await {
                warn!(error = %e, "failed to refresh station directory");
            }
        }
    });

    let state = AppState::new(directory, assembler, NameTable::builtin());
    let app = create_router(state);

    let addr = config.bind_addr;
    info!(%addr, planner = %config.planner.base_url, "rail router listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
