//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ItineraryDetail, ItinerarySummary};
use crate::itinerary::REVEAL_SETTLE_DELAY;
use crate::map::{RouteCoords, Viewport};
use crate::stations::{StationOption, StationRecord};

/// Query for the route endpoint.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Destination code; defaults to the current search's destination
    pub destination: Option<String>,
}

/// Request to expand one itinerary of the current results.
#[derive(Debug, Deserialize)]
pub struct SelectItineraryRequest {
    /// Position in the latest result list
    pub index: usize,
}

/// A plottable station.
#[derive(Debug, Serialize)]
pub struct StationMarker {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,

    /// Popup text, "name, city, state"
    pub label: String,
}

impl StationMarker {
    /// Marker for `record`, if it has a position.
    pub fn from_record(record: &StationRecord) -> Option<Self> {
        let [lat, lon] = record.position()?;
        Some(Self {
            code: record.code.to_string(),
            name: record.name.clone(),
            lat,
            lon,
            label: record.popup_label(),
        })
    }
}

/// Response for the station marker list.
#[derive(Debug, Serialize)]
pub struct StationMarkersResponse {
    /// False until the directory has loaded
    pub loaded: bool,
    pub stations: Vec<StationMarker>,
}

/// One selectable station.
#[derive(Debug, Serialize)]
pub struct StationOptionResult {
    pub code: &'static str,
    pub label: &'static str,
}

impl From<StationOption> for StationOptionResult {
    fn from(option: StationOption) -> Self {
        Self {
            code: option.code,
            label: option.label,
        }
    }
}

/// Stations offered in the search form.
#[derive(Debug, Serialize)]
pub struct StationOptionsResponse {
    pub regional: Vec<StationOptionResult>,
    pub long_haul: Vec<StationOptionResult>,
}

/// Display name for a station code.
#[derive(Debug, Serialize)]
pub struct StationNameResponse {
    pub id: String,
    pub name: String,
}

/// Route line and the viewport that frames it.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub destination: Option<String>,
    pub route: RouteCoords,
    pub viewport: Viewport,
}

/// Response for a trip search.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub itineraries: Vec<ItinerarySummary>,
}

/// Response for an expanded itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryDetailResponse {
    #[serde(flatten)]
    pub detail: ItineraryDetail,

    /// Delay before scrolling the detail into view
    pub reveal_after_ms: u64,
}

impl ItineraryDetailResponse {
    pub fn new(detail: ItineraryDetail) -> Self {
        Self {
            detail,
            reveal_after_ms: REVEAL_SETTLE_DELAY.as_millis() as u64,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
