//! Trip search, itinerary expansion and the rider session that holds them.

mod assembler;
mod error;
mod session;

pub use assembler::{ItineraryAssembler, REVEAL_SETTLE_DELAY, derive_legs};
pub use error::{AssemblyError, PLAN_SERVICE_UNAVAILABLE, PlanError, SelectionError};
pub use session::{
    DetailState, RiderSession, SearchState, SearchTicket, Selection, SelectionTicket,
    SessionSnapshot,
};
