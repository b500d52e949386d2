//! Application state for the web layer.

use std::sync::Arc;

use crate::itinerary::{ItineraryAssembler, RiderSession};
use crate::planner::{CachedDetailSource, PlannerClient};
use crate::stations::{DirectoryClient, NameTable, StationDirectory};

/// Station directory backed by the live directory service.
pub type Directory = StationDirectory<DirectoryClient>;

/// Assembler backed by the plan service, with cached stop details.
pub type Assembler = ItineraryAssembler<PlannerClient, CachedDetailSource<PlannerClient>>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Long-haul station directory
    pub directory: Directory,

    /// Trip search and itinerary expansion
    pub assembler: Arc<Assembler>,

    /// The rider's search, selection and route
    pub session: Arc<RiderSession>,

    /// Stop id to display name
    pub names: NameTable,
}

impl AppState {
    /// Create a new app state with an idle session.
    pub fn new(directory: Directory, assembler: Assembler, names: NameTable) -> Self {
        Self {
            directory,
            assembler: Arc::new(assembler),
            session: Arc::new(RiderSession::new()),
            names,
        }
    }
}
