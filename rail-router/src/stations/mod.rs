//! Station names and the long-haul station directory.
//!
//! Names come from a compiled-in prefix table and cover both networks.
//! Locations come from the external directory service, fetched at startup
//! and held in memory for the life of the process.

mod cache;
mod client;
mod directory;
mod error;
mod names;

pub use cache::{StationCache, StationCacheConfig};
pub use client::{
    DirectoryClient, DirectoryClientConfig, DirectoryPayload, DirectorySource, StationDto,
};
pub use directory::{DirectorySnapshot, StationDirectory, StationRecord};
pub use error::StationError;
pub use names::{NameTable, StationOption, long_haul_options, regional_options};
