//! Station code and carrier types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Code of the transfer hub shared by both carriers (New York Penn Station).
///
/// Every itinerary changes carrier here, and the map route is anchored here.
pub const HUB: &str = "NYP";

/// A `[latitude, longitude]` pair in degrees, in the order map libraries
/// expect.
pub type LatLon = [f64; 2];

/// An opaque station identifier.
///
/// Regional stations use short numeric codes (`"102"`), long-haul stations
/// use 2-4 letter alphabetic codes (`"WAS"`). No structural validation is
/// performed; codes are compared by string equality or prefix.
///
/// # Examples
///
/// ```
/// use rail_router::domain::StationCode;
///
/// let code = StationCode::new(" WAS ");
/// assert_eq!(code.as_str(), "WAS");
/// assert!(StationCode::hub().is_hub());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct StationCode(String);

impl StationCode {
    /// Create a code, trimming surrounding whitespace.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() == code.len() {
            Self(code)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The transfer hub.
    pub fn hub() -> Self {
        Self(HUB.to_string())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty code (an unset form field).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if this is the transfer hub.
    pub fn is_hub(&self) -> bool {
        self.0 == HUB
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StationCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for StationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The detail service stores regional stop ids as integers.
        super::de::string_or_number(deserializer).map(Self::new)
    }
}

/// One of the two carriers an itinerary combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agency {
    /// Long-haul intercity carrier.
    Amtrak,
    /// Regional commuter carrier.
    Lirr,
}

impl Agency {
    /// The other carrier.
    pub fn complement(self) -> Self {
        match self {
            Agency::Amtrak => Agency::Lirr,
            Agency::Lirr => Agency::Amtrak,
        }
    }

    /// Wire name, as sent to the detail service.
    pub fn as_str(self) -> &'static str {
        match self {
            Agency::Amtrak => "amtrak",
            Agency::Lirr => "lirr",
        }
    }

    /// Upper-case label used in leg headings.
    pub fn label(self) -> &'static str {
        match self {
            Agency::Amtrak => "AMTRAK",
            Agency::Lirr => "LIRR",
        }
    }
}

impl fmt::Display for Agency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        assert_eq!(StationCode::new("  14 ").as_str(), "14");
        assert_eq!(StationCode::new("WAS").as_str(), "WAS");
    }

    #[test]
    fn hub_is_nyp() {
        assert_eq!(StationCode::hub().as_str(), "NYP");
        assert!(StationCode::from("NYP").is_hub());
        assert!(!StationCode::from("WAS").is_hub());
    }

    #[test]
    fn empty_code() {
        assert!(StationCode::new("   ").is_empty());
        assert!(StationCode::default().is_empty());
    }

    #[test]
    fn deserialize_from_string_or_integer() {
        let text: StationCode = serde_json::from_str("\"105\"").unwrap();
        let number: StationCode = serde_json::from_str("105").unwrap();
        assert_eq!(text, number);
        assert_eq!(number.as_str(), "105");
    }

    #[test]
    fn serialize_as_plain_string() {
        let json = serde_json::to_string(&StationCode::from("WAS")).unwrap();
        assert_eq!(json, "\"WAS\"");
    }

    #[test]
    fn debug_and_display() {
        let code = StationCode::from("BOS");
        assert_eq!(format!("{code}"), "BOS");
        assert_eq!(format!("{code:?}"), "StationCode(BOS)");
    }

    #[test]
    fn agency_complement() {
        assert_eq!(Agency::Amtrak.complement(), Agency::Lirr);
        assert_eq!(Agency::Lirr.complement(), Agency::Amtrak);
    }

    #[test]
    fn agency_wire_names() {
        assert_eq!(serde_json::to_string(&Agency::Amtrak).unwrap(), "\"amtrak\"");
        assert_eq!(serde_json::to_string(&Agency::Lirr).unwrap(), "\"lirr\"");
        let parsed: Agency = serde_json::from_str("\"lirr\"").unwrap();
        assert_eq!(parsed, Agency::Lirr);
        assert_eq!(Agency::Lirr.label(), "LIRR");
    }
}
