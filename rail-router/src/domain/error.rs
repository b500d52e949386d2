//! Domain error types.
//!
//! These errors represent invalid rider input and malformed upstream data.
//! They are distinct from transport errors, which live with the clients.

/// Search criteria rejected before anything is sent to the planner.
///
/// The `Display` text is shown to the rider as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Origin was not chosen
    #[error("Please choose a starting station.")]
    MissingOrigin,

    /// Destination was not chosen
    #[error("Please choose a destination station.")]
    MissingDestination,

    /// Origin and destination are the same station
    #[error("Starting and ending stations cannot be the same.")]
    SameStation,

    /// Travel date missing or not YYYY-MM-DD
    #[error("Please enter a valid travel date.")]
    InvalidDate,

    /// Departure time missing or not HH:MM
    #[error("Please enter a valid departure time.")]
    InvalidTime,

    /// Transfer buffer missing
    #[error("Please enter a transfer buffer in minutes.")]
    MissingTransitionTime,

    /// Transfer buffer below zero
    #[error("The transfer buffer cannot be negative.")]
    NegativeTransitionTime,
}

/// An itinerary summary whose shape does not match its `leg_type`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed itinerary summary: {0}")]
pub struct SummaryShapeError(pub &'static str);
