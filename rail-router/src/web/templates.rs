//! Askama fragments for clients that ask for HTML.

use askama::Template;

use crate::domain::{Agency, Connection, ItineraryDetail, ItinerarySummary, StopDetail};
use crate::itinerary::REVEAL_SETTLE_DELAY;
use crate::stations::NameTable;

// ============================================================================
// Fragment Templates
// ============================================================================

/// Search results fragment.
#[derive(Template)]
#[template(path = "plan_results.html")]
pub struct PlanResultsTemplate {
    pub itineraries: Vec<ItineraryCardView>,
}

/// Expanded itinerary fragment.
#[derive(Template)]
#[template(path = "itinerary_detail.html")]
pub struct ItineraryDetailTemplate {
    pub detail: ItineraryDetailView,
    pub reveal_after_ms: u64,
}

impl ItineraryDetailTemplate {
    pub fn new(detail: &ItineraryDetail, names: &NameTable) -> Self {
        Self {
            detail: ItineraryDetailView::from_detail(detail, names),
            reveal_after_ms: REVEAL_SETTLE_DELAY.as_millis() as u64,
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Card for one candidate itinerary.
#[derive(Debug, Clone)]
pub struct ItineraryCardView {
    pub index: usize,
    pub is_selectable: bool,
    pub is_amtrak_first: bool,

    /// e.g. "LIRR Trip GO103_24_2033" or "Amtrak Train #171"
    pub title: String,
    pub departure: String,
    pub arrival: String,

    /// e.g. "Amtrak Connection Choices"
    pub connections_heading: String,
    pub connections: Vec<ConnectionView>,
}

impl ItineraryCardView {
    pub fn from_summary(index: usize, summary: &ItinerarySummary) -> Self {
        let primary = summary.primary_trip();
        let title = match summary {
            ItinerarySummary::AmtrakFirst { amtrak_trip, .. } => format!(
                "Amtrak Train #{}",
                amtrak_trip.train_num.as_deref().unwrap_or("?")
            ),
            ItinerarySummary::LirrFirst { lirr_trip, .. } => {
                format!("LIRR Trip {}", lirr_trip.identifier().unwrap_or("?"))
            }
        };
        let connections_heading = match summary.secondary_agency() {
            Agency::Amtrak => "Amtrak Connection Choices",
            Agency::Lirr => "LIRR Connection Choices",
        };

        Self {
            index,
            is_selectable: summary.is_selectable(),
            is_amtrak_first: summary.primary_agency() == Agency::Amtrak,
            title,
            departure: primary.departure.clone(),
            arrival: primary.arrival.clone(),
            connections_heading: connections_heading.to_string(),
            connections: summary
                .connections()
                .iter()
                .map(ConnectionView::from_connection)
                .collect(),
        }
    }
}

/// One onward connection on a card.
#[derive(Debug, Clone)]
pub struct ConnectionView {
    /// e.g. "Train #125"
    pub label: String,
    pub departure: String,
    pub arrival: String,
    pub status: String,
    pub is_on_time: bool,
}

impl ConnectionView {
    pub fn from_connection(connection: &Connection) -> Self {
        let number = connection
            .train_num
            .as_deref()
            .or(connection.identifier())
            .unwrap_or("?");
        let status = connection.status.clone().unwrap_or_default();

        Self {
            label: format!("Train #{number}"),
            departure: connection.departure.clone(),
            arrival: connection.arrival.clone(),
            is_on_time: status == "On Time",
            status,
        }
    }

    pub fn has_status(&self) -> bool {
        !self.status.is_empty()
    }
}

/// A leg of the expanded itinerary.
#[derive(Debug, Clone)]
pub struct LegView {
    /// e.g. "Leg 2: AMTRAK Train 125"
    pub heading: String,
    pub stops: Vec<StopView>,
}

/// One stop row: "HH:MM  Station".
#[derive(Debug, Clone)]
pub struct StopView {
    pub time: String,
    pub name: String,
}

impl StopView {
    pub fn from_stop(stop: &StopDetail, names: &NameTable) -> Self {
        Self {
            time: stop.display_time(),
            name: names.resolve(&stop.stop_id),
        }
    }
}

/// Both legs of an expanded itinerary.
#[derive(Debug, Clone)]
pub struct ItineraryDetailView {
    pub primary: LegView,
    pub secondary: LegView,
    pub transfer_label: String,
}

impl ItineraryDetailView {
    pub fn from_detail(detail: &ItineraryDetail, names: &NameTable) -> Self {
        let stops = |stops: &[StopDetail]| -> Vec<StopView> {
            stops.iter().map(|s| StopView::from_stop(s, names)).collect()
        };
        let connection_number = detail
            .connection_info
            .train_num
            .as_deref()
            .or(detail.connection_info.identifier())
            .unwrap_or_default();

        Self {
            primary: LegView {
                heading: format!("Leg 1: {}", detail.primary_agency.label()),
                stops: stops(&detail.primary_stops),
            },
            secondary: LegView {
                heading: format!(
                    "Leg 2: {} Train {}",
                    detail.secondary_agency.label(),
                    connection_number
                )
                .trim_end()
                .to_string(),
                stops: stops(&detail.secondary_stops),
            },
            transfer_label: format!("Transfer at {}", names.resolve(crate::domain::HUB)),
        }
    }
}
