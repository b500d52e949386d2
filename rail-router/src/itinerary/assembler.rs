//! Trip search and itinerary expansion.
//!
//! Every itinerary changes carrier at the hub, so a selected summary
//! expands into exactly two stop-detail requests: origin to hub on the
//! primary carrier and hub to destination on the other one. Both are
//! fetched at the same time and a failure on one leg never hides the other.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::{
    DetailRequest, ItineraryDetail, ItinerarySummary, SearchCriteria, StationCode, StopDetail,
};
use crate::planner::{StopDetailSource, TripPlanner};

use super::error::{AssemblyError, PlanError};

/// How long the presentation layer waits after a detail arrives before
/// scrolling it into view, so layout has settled.
pub const REVEAL_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Compute the two stop-detail requests for a summary.
///
/// The primary leg runs from `origin` to the hub on the summary's primary
/// carrier. The secondary leg runs from the hub to `destination` on the
/// other carrier, using the first connection.
pub fn derive_legs(
    summary: &ItinerarySummary,
    origin: &StationCode,
    destination: &StationCode,
) -> Result<(DetailRequest, DetailRequest), AssemblyError> {
    let connection = summary
        .first_connection()
        .ok_or(AssemblyError::NoConnections)?;

    let primary_agency = summary.primary_agency();
    let secondary_agency = summary.secondary_agency();

    let primary_id = summary
        .primary_trip()
        .identifier()
        .ok_or(AssemblyError::MissingTripId {
            agency: primary_agency,
        })?;
    let secondary_id = connection.identifier().ok_or(AssemblyError::MissingTripId {
        agency: secondary_agency,
    })?;

    let primary = DetailRequest {
        trip_id: primary_id.to_string(),
        agency: primary_agency,
        origin: origin.clone(),
        destination: StationCode::hub(),
    };
    let secondary = DetailRequest {
        trip_id: secondary_id.to_string(),
        agency: secondary_agency,
        origin: StationCode::hub(),
        destination: destination.clone(),
    };

    Ok((primary, secondary))
}

/// Runs trip searches and expands selected itineraries.
pub struct ItineraryAssembler<P, D> {
    planner: P,
    details: D,
}

impl<P, D> ItineraryAssembler<P, D>
where
    P: TripPlanner + Sync,
    D: StopDetailSource + Sync,
{
    /// Create an assembler over a planner and a stop-detail source.
    pub fn new(planner: P, details: D) -> Self {
        Self { planner, details }
    }

    /// The stop-detail source.
    pub fn details(&self) -> &D {
        &self.details
    }

    /// Validate `criteria` and ask the planner for itineraries.
    ///
    /// Invalid criteria never reach the planner. An empty list is a
    /// successful search with no connections.
    pub async fn plan_trip(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<ItinerarySummary>, PlanError> {
        criteria.validate()?;

        let itineraries = self.planner.plan(criteria).await.map_err(|e| {
            warn!(
                origin = %criteria.origin,
                destination = %criteria.destination,
                error = %e,
                "trip planning failed"
            );
            PlanError::Service(e)
        })?;

        info!(
            origin = %criteria.origin,
            destination = %criteria.destination,
            itineraries = itineraries.len(),
            "trip planned"
        );
        Ok(itineraries)
    }

    /// Expand `summary` into a stop-by-stop detail.
    ///
    /// A leg whose stops cannot be fetched is shown without stops.
    pub async fn assemble_detail(
        &self,
        summary: &ItinerarySummary,
        origin: &StationCode,
        destination: &StationCode,
    ) -> Result<ItineraryDetail, AssemblyError> {
        let (primary, secondary) =
            derive_legs(summary, origin, destination).inspect_err(|e| {
                error!(error = %e, "cannot expand itinerary");
            })?;
        let connection_info = summary
            .first_connection()
            .cloned()
            .ok_or(AssemblyError::NoConnections)?;

        let (primary_stops, secondary_stops) =
            tokio::join!(self.leg_stops(&primary), self.leg_stops(&secondary));

        Ok(ItineraryDetail {
            trip_info: summary.clone(),
            primary_agency: primary.agency,
            secondary_agency: secondary.agency,
            primary_stops,
            secondary_stops,
            connection_info,
        })
    }

    async fn leg_stops(&self, request: &DetailRequest) -> Vec<StopDetail> {
        match self.details.stops(request).await {
            Ok(stops) => stops,
            Err(e) => {
                warn!(
                    trip_id = %request.trip_id,
                    agency = %request.agency,
                    error = %e,
                    "stop details unavailable, leg shown without stops"
                );
                Vec::new()
            }
        }
    }
}
