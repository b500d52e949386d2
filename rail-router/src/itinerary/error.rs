//! Errors from planning a trip and assembling its detail.

use thiserror::Error;

use crate::domain::{Agency, ValidationError};
use crate::planner::PlannerError;

/// Message shown to the rider whenever the plan service cannot be used.
pub const PLAN_SERVICE_UNAVAILABLE: &str = "Could not connect to the trip planning service.";

/// A trip search that produced no result list.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Criteria rejected locally; the planner was never called.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Transport failure, non-success status or undecodable body.
    #[error("Could not connect to the trip planning service.")]
    Service(#[source] PlannerError),
}

impl PlanError {
    /// Text to show the rider.
    pub fn user_message(&self) -> String {
        match self {
            PlanError::Invalid(e) => e.to_string(),
            PlanError::Service(_) => PLAN_SERVICE_UNAVAILABLE.to_string(),
        }
    }
}

/// A selected itinerary that cannot be expanded into detail requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("itinerary has no onward connection")]
    NoConnections,

    #[error("{agency} leg has no trip identifier")]
    MissingTripId { agency: Agency },
}

/// A selection that does not refer to a current result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No search results to choose from.")]
    NoResults,

    #[error("No itinerary at position {index}.")]
    UnknownIndex { index: usize },
}
