//! The rider's session: current search, results, selected itinerary, route.
//!
//! State is published as immutable [`SessionSnapshot`]s that are replaced
//! wholesale. Plan and detail requests are tagged with tickets carrying a
//! monotonic sequence number; a response whose ticket has been superseded
//! is dropped instead of overwriting newer state.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{ItineraryDetail, ItinerarySummary, SearchCriteria, StationCode};
use crate::map::{MapView, RouteCoords, RouteTracker, Viewport};
use crate::stations::DirectorySnapshot;

use super::error::{AssemblyError, PlanError, SelectionError};

/// Progress of the current trip search.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// No search submitted yet.
    #[default]
    Idle,
    Loading,
    /// Planner answered; the list may be empty.
    Ready(Vec<ItinerarySummary>),
    /// Planner unavailable.
    Failed(String),
    /// Criteria rejected before submission.
    Invalid(String),
}

impl SearchState {
    /// Current results, if the last search succeeded.
    pub fn results(&self) -> Option<&[ItinerarySummary]> {
        match self {
            SearchState::Ready(results) => Some(results),
            _ => None,
        }
    }

    /// User-facing error text, if the last search failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchState::Failed(message) | SearchState::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// Progress of the selected itinerary's detail.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Hidden,
    Loading,
    Ready(ItineraryDetail),
}

impl DetailState {
    pub fn detail(&self) -> Option<&ItineraryDetail> {
        match self {
            DetailState::Ready(detail) => Some(detail),
            _ => None,
        }
    }
}

/// One immutable view of the session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    /// Criteria of the latest search
    pub criteria: Option<SearchCriteria>,
    pub search: SearchState,
    pub detail: DetailState,
    /// Hub to destination line, or empty
    pub route: RouteCoords,
    pub viewport: Viewport,
}

/// Tag on a plan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
}

/// Tag on a detail request.
///
/// Also records which search it belongs to, so a new search invalidates
/// any selection in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    search_seq: u64,
    seq: u64,
}

/// What a selection needs to expand the chosen itinerary.
#[derive(Debug, Clone)]
pub struct Selection {
    pub ticket: SelectionTicket,
    pub summary: ItinerarySummary,
    pub origin: StationCode,
    pub destination: StationCode,
}

#[derive(Default)]
struct SessionInner {
    search_seq: u64,
    selection_seq: u64,
    route: RouteTracker,
    map: MapView,
    snapshot: Arc<SessionSnapshot>,
}

impl SessionInner {
    /// Publish a new snapshot built from the current one.
    fn publish(&mut self, edit: impl FnOnce(&mut SessionSnapshot)) {
        let mut next = SessionSnapshot::clone(&self.snapshot);
        edit(&mut next);
        self.snapshot = Arc::new(next);
    }
}

/// Session context shared by the request handlers.
#[derive(Default)]
pub struct RiderSession {
    inner: RwLock<SessionInner>,
}

impl RiderSession {
    /// An idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.inner.read().await.snapshot.clone()
    }

    /// Start a search, clearing previous results and detail.
    pub async fn begin_search(&self, criteria: SearchCriteria) -> SearchTicket {
        let mut inner = self.inner.write().await;
        inner.search_seq += 1;
        let ticket = SearchTicket {
            seq: inner.search_seq,
        };
        inner.publish(|s| {
            s.criteria = Some(criteria);
            s.search = SearchState::Loading;
            s.detail = DetailState::Hidden;
        });
        ticket
    }

    /// Apply a plan outcome unless a newer search has started.
    ///
    /// Returns true if the outcome was applied.
    pub async fn finish_search(
        &self,
        ticket: SearchTicket,
        outcome: &Result<Vec<ItinerarySummary>, PlanError>,
    ) -> bool {
        let mut inner = self.inner.write().await;
        if ticket.seq != inner.search_seq {
            debug!(
                ticket = ticket.seq,
                latest = inner.search_seq,
                "discarding stale plan response"
            );
            return false;
        }
        let search = match outcome {
            Ok(results) => SearchState::Ready(results.clone()),
            Err(e @ PlanError::Invalid(_)) => SearchState::Invalid(e.user_message()),
            Err(e @ PlanError::Service(_)) => SearchState::Failed(e.user_message()),
        };
        inner.publish(|s| s.search = search);
        true
    }

    /// Start expanding the result at `index`.
    pub async fn begin_selection(&self, index: usize) -> Result<Selection, SelectionError> {
        let mut inner = self.inner.write().await;

        let snapshot = inner.snapshot.clone();
        let results = snapshot
            .search
            .results()
            .ok_or(SelectionError::NoResults)?;
        let summary = results
            .get(index)
            .cloned()
            .ok_or(SelectionError::UnknownIndex { index })?;
        let criteria = snapshot
            .criteria
            .as_ref()
            .ok_or(SelectionError::NoResults)?;

        inner.selection_seq += 1;
        let ticket = SelectionTicket {
            search_seq: inner.search_seq,
            seq: inner.selection_seq,
        };
        inner.publish(|s| s.detail = DetailState::Loading);

        Ok(Selection {
            ticket,
            summary,
            origin: criteria.origin.clone(),
            destination: criteria.destination.clone(),
        })
    }

    /// Apply an assembled detail unless a newer search or selection has
    /// started. A failed assembly hides the detail.
    ///
    /// Returns true if the outcome was applied.
    pub async fn finish_selection(
        &self,
        ticket: SelectionTicket,
        outcome: &Result<ItineraryDetail, AssemblyError>,
    ) -> bool {
        let mut inner = self.inner.write().await;
        if ticket.search_seq != inner.search_seq || ticket.seq != inner.selection_seq {
            debug!(
                ticket = ticket.seq,
                latest = inner.selection_seq,
                "discarding stale detail response"
            );
            return false;
        }
        let detail = match outcome {
            Ok(detail) => DetailState::Ready(detail.clone()),
            Err(_) => DetailState::Hidden,
        };
        inner.publish(|s| s.detail = detail);
        true
    }

    /// Re-derive the route for `destination` against `directory`.
    ///
    /// Returns true if the route was recomputed.
    pub async fn update_route(
        &self,
        destination: Option<&StationCode>,
        directory: &DirectorySnapshot,
    ) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.route.update(destination, directory) {
            return false;
        }
        let route = inner.route.route().clone();
        inner.map.apply_route(&route);
        let viewport = inner.map.viewport().clone();
        inner.publish(|s| {
            s.route = route;
            s.viewport = viewport;
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Agency, Connection, PrimaryTrip, ValidationError};
    use crate::planner::PlannerError;
    use crate::stations::DirectoryPayload;

    fn criteria(origin: &str, destination: &str) -> SearchCriteria {
        SearchCriteria::new(origin, destination, "2024-06-01", "08:00", 30)
    }

    fn summary(train_num: &str) -> ItinerarySummary {
        ItinerarySummary::LirrFirst {
            leg_type: "lirr_first".to_string(),
            lirr_trip: PrimaryTrip {
                trip_id: Some("T".to_string()),
                train_num: None,
                departure: "08:12".to_string(),
                arrival: "09:31".to_string(),
                status: None,
            },
            connections: vec![Connection {
                trip_id: None,
                train_num: Some(train_num.to_string()),
                departure: "10:05".to_string(),
                arrival: "13:40".to_string(),
                status: None,
                destination: None,
            }],
        }
    }

    fn detail(summary: &ItinerarySummary) -> ItineraryDetail {
        ItineraryDetail {
            trip_info: summary.clone(),
            primary_agency: Agency::Lirr,
            secondary_agency: Agency::Amtrak,
            primary_stops: Vec::new(),
            secondary_stops: Vec::new(),
            connection_info: summary.first_connection().unwrap().clone(),
        }
    }

    async fn session_with_results(results: Vec<ItinerarySummary>) -> RiderSession {
        let session = RiderSession::new();
        let ticket = session.begin_search(criteria("14", "WAS")).await;
        assert!(session.finish_search(ticket, &Ok(results)).await);
        session
    }

    #[tokio::test]
    async fn starts_idle() {
        let snapshot = RiderSession::new().snapshot().await;
        assert_eq!(snapshot.search, SearchState::Idle);
        assert_eq!(snapshot.detail, DetailState::Hidden);
        assert!(snapshot.route.is_empty());
        assert_eq!(snapshot.viewport, Viewport::default());
    }

    #[tokio::test]
    async fn search_lifecycle() {
        let session = RiderSession::new();
        let ticket = session.begin_search(criteria("14", "WAS")).await;
        assert_eq!(session.snapshot().await.search, SearchState::Loading);

        session.finish_search(ticket, &Ok(vec![summary("125")])).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.search.results().map(<[_]>::len), Some(1));
        assert_eq!(snapshot.criteria, Some(criteria("14", "WAS")));
    }

    #[tokio::test]
    async fn stale_plan_response_is_discarded() {
        let session = RiderSession::new();
        let first = session.begin_search(criteria("14", "WAS")).await;
        let second = session.begin_search(criteria("14", "BOS")).await;

        assert!(session.finish_search(second, &Ok(vec![summary("171")])).await);
        assert!(!session.finish_search(first, &Ok(vec![summary("125")])).await);

        let snapshot = session.snapshot().await;
        let results = snapshot.search.results().unwrap();
        assert_eq!(results[0].first_connection().unwrap().identifier(), Some("171"));
    }

    #[tokio::test]
    async fn failures_clear_results_and_carry_message() {
        let session = session_with_results(vec![summary("125")]).await;

        let ticket = session.begin_search(criteria("14", "WAS")).await;
        session
            .finish_search(ticket, &Err(PlanError::Service(PlannerError::RateLimited)))
            .await;
        let snapshot = session.snapshot().await;
        assert!(snapshot.search.results().is_none());
        assert_eq!(
            snapshot.search.error_message(),
            Some("Could not connect to the trip planning service.")
        );

        let ticket = session.begin_search(criteria("WAS", "WAS")).await;
        session
            .finish_search(ticket, &Err(ValidationError::SameStation.into()))
            .await;
        assert_eq!(
            session.snapshot().await.search,
            SearchState::Invalid("Starting and ending stations cannot be the same.".to_string())
        );
    }

    #[tokio::test]
    async fn selection_lifecycle() {
        let session = session_with_results(vec![summary("125"), summary("171")]).await;

        let selection = session.begin_selection(1).await.unwrap();
        assert_eq!(selection.summary, summary("171"));
        assert_eq!(selection.origin.as_str(), "14");
        assert_eq!(selection.destination.as_str(), "WAS");
        assert_eq!(session.snapshot().await.detail, DetailState::Loading);

        let outcome = Ok(detail(&selection.summary));
        assert!(session.finish_selection(selection.ticket, &outcome).await);
        assert_eq!(
            session.snapshot().await.detail.detail(),
            Some(&detail(&summary("171")))
        );
    }

    #[tokio::test]
    async fn newer_selection_wins() {
        let session = session_with_results(vec![summary("125"), summary("171")]).await;

        let first = session.begin_selection(0).await.unwrap();
        let second = session.begin_selection(1).await.unwrap();

        assert!(
            session
                .finish_selection(second.ticket, &Ok(detail(&second.summary)))
                .await
        );
        assert!(
            !session
                .finish_selection(first.ticket, &Ok(detail(&first.summary)))
                .await
        );
        assert_eq!(
            session.snapshot().await.detail.detail().unwrap().trip_info,
            summary("171")
        );
    }

    #[tokio::test]
    async fn new_search_invalidates_pending_selection() {
        let session = session_with_results(vec![summary("125")]).await;
        let selection = session.begin_selection(0).await.unwrap();

        session.begin_search(criteria("14", "BOS")).await;

        assert!(
            !session
                .finish_selection(selection.ticket, &Ok(detail(&selection.summary)))
                .await
        );
        assert_eq!(session.snapshot().await.detail, DetailState::Hidden);
    }

    #[tokio::test]
    async fn failed_assembly_hides_detail() {
        let session = session_with_results(vec![summary("125")]).await;
        let selection = session.begin_selection(0).await.unwrap();

        session
            .finish_selection(selection.ticket, &Err(AssemblyError::NoConnections))
            .await;
        assert_eq!(session.snapshot().await.detail, DetailState::Hidden);
    }

    #[tokio::test]
    async fn selection_requires_results() {
        let session = RiderSession::new();
        assert_eq!(
            session.begin_selection(0).await.unwrap_err(),
            SelectionError::NoResults
        );

        let session = session_with_results(vec![summary("125")]).await;
        assert_eq!(
            session.begin_selection(3).await.unwrap_err(),
            SelectionError::UnknownIndex { index: 3 }
        );
    }

    #[tokio::test]
    async fn route_follows_destination_and_directory() {
        let session = RiderSession::new();
        let was = StationCode::from("WAS");

        let empty = DirectorySnapshot::default();
        assert!(session.update_route(Some(&was), &empty).await);
        assert!(session.snapshot().await.route.is_empty());
        assert_eq!(session.snapshot().await.viewport, Viewport::default());

        let payload: DirectoryPayload = serde_json::from_value(serde_json::json!({
            "NYP": {"name": "New York Penn Station", "city": "New York", "state": "NY", "lat": 40.75, "lon": -73.99},
            "WAS": {"name": "Washington Union Station", "city": "Washington", "state": "DC", "lat": 38.90, "lon": -77.01}
        }))
        .unwrap();
        let loaded = DirectorySnapshot::from_payload(payload, 1);

        assert!(session.update_route(Some(&was), &loaded).await);
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.route.points(), &[[40.75, -73.99], [38.90, -77.01]]);
        assert!(matches!(snapshot.viewport, Viewport::Fitted { .. }));

        assert!(!session.update_route(Some(&was), &loaded).await);
    }
}
