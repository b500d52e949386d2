//! Client side of the trip planning backend.
//!
//! The backend owns the connection search and the schedule database. This
//! crate only consumes it: itinerary search through [`TripPlanner`] and
//! per-trip stop lists through [`StopDetailSource`].

mod cache;
mod client;
mod config;
mod error;
mod source;

pub use cache::CachedDetailSource;
pub use client::PlannerClient;
pub use config::{DEFAULT_BASE_URL, DetailCacheConfig, PlannerConfig};
pub use error::PlannerError;
pub use source::{StopDetailSource, TripPlanner};
