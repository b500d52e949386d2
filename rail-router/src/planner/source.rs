//! Service boundaries consumed by the itinerary assembler.
//!
//! These abstractions let the assembler be tested with in-memory data.

use std::future::Future;

use crate::domain::{DetailRequest, ItinerarySummary, SearchCriteria, StopDetail};

use super::error::PlannerError;

/// The external trip planner.
pub trait TripPlanner {
    /// Candidate itineraries for already-validated criteria.
    fn plan(
        &self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<Vec<ItinerarySummary>, PlannerError>> + Send;
}

/// The external stop-detail service.
pub trait StopDetailSource {
    /// Ordered stops of one leg.
    fn stops(
        &self,
        request: &DetailRequest,
    ) -> impl Future<Output = Result<Vec<StopDetail>, PlannerError>> + Send;
}
