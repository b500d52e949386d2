//! Domain types for the rail router.
//!
//! Station codes, carriers, rider search criteria and the itinerary shapes
//! exchanged with the plan and detail services. Upstream payloads are
//! loosely typed; the types here give them an explicit shape once, at the
//! deserialization boundary.

mod criteria;
mod de;
mod error;
mod itinerary;
mod station;
mod time;

pub use criteria::{SearchCriteria, SearchType};
pub use error::{SummaryShapeError, ValidationError};
pub use itinerary::{
    AMTRAK_FIRST, Connection, DetailRequest, ItineraryDetail, ItinerarySummary,
    PrimaryTrip, StopDetail,
};
pub use station::{Agency, HUB, LatLon, StationCode};
pub use time::{MISSING_TIME, ScheduleTime, TimeError, display_or_placeholder};

pub(crate) use de::opt_coordinate;
