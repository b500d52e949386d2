//! Rider search criteria.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::station::StationCode;

/// How the requested time is interpreted by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Leave at or after the requested time.
    #[default]
    DepartBy,
}

/// A rider's trip search, as submitted by the search form and forwarded
/// to the plan service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Station the rider starts from
    pub origin: StationCode,

    /// Station the rider is heading to
    pub destination: StationCode,

    /// Interpretation of `time`
    #[serde(default)]
    pub search_type: SearchType,

    /// Travel date, YYYY-MM-DD
    #[serde(default)]
    pub date: String,

    /// Requested time, HH:MM
    #[serde(default)]
    pub time: String,

    /// Minimum transfer buffer at the hub, in minutes
    #[serde(rename = "transition_time", default)]
    pub transition_time_minutes: Option<i64>,
}

impl SearchCriteria {
    /// Create criteria for a depart-by search.
    pub fn new(
        origin: impl Into<StationCode>,
        destination: impl Into<StationCode>,
        date: impl Into<String>,
        time: impl Into<String>,
        transition_time_minutes: i64,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            search_type: SearchType::DepartBy,
            date: date.into(),
            time: time.into(),
            transition_time_minutes: Some(transition_time_minutes),
        }
    }

    /// Check the criteria before submission.
    ///
    /// Criteria that fail here must never reach the plan service.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.origin.is_empty() {
            return Err(ValidationError::MissingOrigin);
        }
        if self.destination.is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        if self.origin == self.destination {
            return Err(ValidationError::SameStation);
        }

        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate)?;

        // %H:%M alone would also accept "8:5"; require the padded form.
        let time = self.time.trim();
        if time.len() != 5 {
            return Err(ValidationError::InvalidTime);
        }
        NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| ValidationError::InvalidTime)?;

        match self.transition_time_minutes {
            None => Err(ValidationError::MissingTransitionTime),
            Some(mins) if mins < 0 => Err(ValidationError::NegativeTransitionTime),
            Some(_) => Ok(()),
        }
    }
}
