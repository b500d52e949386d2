//! Itinerary shapes exchanged with the plan and detail services.

use serde::{Deserialize, Serialize};

use super::de::opt_string_or_number;
use super::error::SummaryShapeError;
use super::station::{Agency, StationCode};
use super::time::display_or_placeholder;

/// `leg_type` value marking an itinerary that starts on the long-haul carrier.
pub const AMTRAK_FIRST: &str = "amtrak_first";

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// The leg an itinerary starts with, from the rider's origin to the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryTrip {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_string_or_number")]
    pub trip_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_string_or_number")]
    pub train_num: Option<String>,
    #[serde(default)]
    pub departure: String,
    #[serde(default)]
    pub arrival: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PrimaryTrip {
    /// Identifier to send to the detail service.
    ///
    /// Regional trips are keyed by `trip_id`; long-haul trips are usually
    /// only known by `train_num`, which the detail service also accepts.
    pub fn identifier(&self) -> Option<&str> {
        non_empty(&self.trip_id).or_else(|| non_empty(&self.train_num))
    }
}

/// A candidate onward leg from the hub to the rider's destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_string_or_number")]
    pub trip_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_string_or_number")]
    pub train_num: Option<String>,
    #[serde(default)]
    pub departure: String,
    #[serde(default)]
    pub arrival: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl Connection {
    /// Identifier to send to the detail service: `trip_id`, else `train_num`.
    pub fn identifier(&self) -> Option<&str> {
        non_empty(&self.trip_id).or_else(|| non_empty(&self.train_num))
    }
}

/// Wire form of [`ItinerarySummary`]: one loose record for both variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSummary {
    #[serde(default)]
    leg_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amtrak_trip: Option<PrimaryTrip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lirr_trip: Option<PrimaryTrip>,
    #[serde(default)]
    connections: Vec<Connection>,
}

/// The planner's description of one candidate itinerary.
///
/// The planner tags its records with a `leg_type` string. Only
/// `"amtrak_first"` is special; every other value is a regional-first
/// itinerary, and the original string is kept for round-tripping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSummary", into = "RawSummary")]
pub enum ItinerarySummary {
    /// Long-haul to the hub, then regional.
    AmtrakFirst {
        amtrak_trip: PrimaryTrip,
        connections: Vec<Connection>,
    },
    /// Regional to the hub, then long-haul.
    LirrFirst {
        leg_type: String,
        lirr_trip: PrimaryTrip,
        connections: Vec<Connection>,
    },
}

impl TryFrom<RawSummary> for ItinerarySummary {
    type Error = SummaryShapeError;

    fn try_from(raw: RawSummary) -> Result<Self, Self::Error> {
        if raw.leg_type == AMTRAK_FIRST {
            let amtrak_trip = raw
                .amtrak_trip
                .ok_or(SummaryShapeError("amtrak_first summary without amtrak_trip"))?;
            Ok(ItinerarySummary::AmtrakFirst {
                amtrak_trip,
                connections: raw.connections,
            })
        } else {
            let lirr_trip = raw
                .lirr_trip
                .ok_or(SummaryShapeError("regional-first summary without lirr_trip"))?;
            Ok(ItinerarySummary::LirrFirst {
                leg_type: raw.leg_type,
                lirr_trip,
                connections: raw.connections,
            })
        }
    }
}

impl From<ItinerarySummary> for RawSummary {
    fn from(summary: ItinerarySummary) -> Self {
        match summary {
            ItinerarySummary::AmtrakFirst {
                amtrak_trip,
                connections,
            } => RawSummary {
                leg_type: AMTRAK_FIRST.to_string(),
                amtrak_trip: Some(amtrak_trip),
                lirr_trip: None,
                connections,
            },
            ItinerarySummary::LirrFirst {
                leg_type,
                lirr_trip,
                connections,
            } => RawSummary {
                leg_type,
                amtrak_trip: None,
                lirr_trip: Some(lirr_trip),
                connections,
            },
        }
    }
}

impl ItinerarySummary {
    /// Carrier of the leg into the hub.
    pub fn primary_agency(&self) -> Agency {
        match self {
            ItinerarySummary::AmtrakFirst { .. } => Agency::Amtrak,
            ItinerarySummary::LirrFirst { .. } => Agency::Lirr,
        }
    }

    /// Carrier of the leg out of the hub.
    pub fn secondary_agency(&self) -> Agency {
        self.primary_agency().complement()
    }

    /// The leg into the hub.
    pub fn primary_trip(&self) -> &PrimaryTrip {
        match self {
            ItinerarySummary::AmtrakFirst { amtrak_trip, .. } => amtrak_trip,
            ItinerarySummary::LirrFirst { lirr_trip, .. } => lirr_trip,
        }
    }

    /// Candidate legs out of the hub.
    pub fn connections(&self) -> &[Connection] {
        match self {
            ItinerarySummary::AmtrakFirst { connections, .. }
            | ItinerarySummary::LirrFirst { connections, .. } => connections,
        }
    }

    /// The default onward leg: the first connection.
    pub fn first_connection(&self) -> Option<&Connection> {
        self.connections().first()
    }

    /// Whether the rider can pick this itinerary.
    pub fn is_selectable(&self) -> bool {
        !self.connections().is_empty()
    }
}

/// One scheduled stop of a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopDetail {
    pub stop_id: StationCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

impl StopDetail {
    /// Arrival as "HH:MM", or "--:--" when unknown.
    pub fn display_time(&self) -> String {
        display_or_placeholder(self.arrival_time.as_deref())
    }
}

/// Body of a stop-detail request for one leg.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailRequest {
    pub trip_id: String,
    pub agency: Agency,
    pub origin: StationCode,
    pub destination: StationCode,
}

/// The fully expanded view of a selected itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryDetail {
    pub trip_info: ItinerarySummary,
    pub primary_agency: Agency,
    pub secondary_agency: Agency,
    pub primary_stops: Vec<StopDetail>,
    pub secondary_stops: Vec<StopDetail>,
    pub connection_info: Connection,
}
