//! Schedule time handling.
//!
//! Stop times come from GTFS feeds as "HH:MM:SS" strings. Trips running past
//! midnight keep counting hours upwards ("25:10:00"), so these are not
//! wall-clock times and cannot be parsed with `NaiveTime`.

use std::fmt;

/// Placeholder shown when a stop has no usable arrival time.
pub const MISSING_TIME: &str = "--:--";

/// Latest hour accepted in a schedule time (a trip may run into the
/// second service day).
const MAX_HOUR: u32 = 47;

/// Error returned when parsing an invalid schedule time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid schedule time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A scheduled time of day, in minutes after the start of the service day.
///
/// # Examples
///
/// ```
/// use rail_router::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse("25:10:00").unwrap();
/// assert_eq!(t.to_string(), "25:10");
/// assert!(ScheduleTime::parse("8:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleTime {
    minutes: u32,
}

impl ScheduleTime {
    /// Parse "HH:MM" or "HH:MM:SS". Seconds are validated then dropped.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
        }
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > MAX_HOUR {
            return Err(TimeError::new("hour out of range"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        if bytes.len() == 8 {
            if bytes[5] != b':' {
                return Err(TimeError::new("expected colon at position 5"));
            }
            let second = parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new("invalid second digits"))?;
            if second > 59 {
                return Err(TimeError::new("second must be 0-59"));
            }
        }

        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Minutes after the start of the service day.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// Render an optional raw time as "HH:MM", or the placeholder.
pub fn display_or_placeholder(raw: Option<&str>) -> String {
    raw.and_then(|s| ScheduleTime::parse(s.trim()).ok())
        .map(|t| t.to_string())
        .unwrap_or_else(|| MISSING_TIME.to_string())
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
