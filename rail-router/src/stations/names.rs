//! Station display names.
//!
//! Stop identifiers coming back from the detail service are raw GTFS ids.
//! Regional ids are sometimes suffixed (platform or track variants of the
//! same station), so lookup is by prefix rather than exact match.

use std::fmt::Display;

/// Prefix → display name. Regional GTFS ids first, then long-haul codes.
static STATION_NAMES: &[(&str, &str)] = &[
    // Transfer hubs and terminals
    ("105", "Penn Station"),
    ("237", "Penn Station"),
    ("NYP", "New York Penn Station"),
    ("102", "Jamaica"),
    ("214", "Woodside"),
    ("54", "Woodside"),
    ("55", "Forest Hills"),
    ("56", "Forest Hills"),
    ("107", "Kew Gardens"),
    // Port Jefferson and Ronkonkoma shared stops
    ("132", "Mineola"),
    ("39", "Carle Place"),
    ("213", "Westbury"),
    ("92", "Hicksville"),
    // Port Jefferson branch
    ("205", "Syosset"),
    ("40", "Cold Spring Harbor"),
    ("91", "Huntington"),
    ("78", "Greenlawn"),
    ("153", "Northport"),
    ("111", "Kings Park"),
    ("202", "Smithtown"),
    ("193", "St. James"),
    ("14", "Stony Brook"),
    ("164", "Port Jefferson"),
    // Ronkonkoma branch
    ("20", "Bethpage"),
    ("59", "Farmingdale"),
    ("165", "Pinelawn"),
    ("220", "Wyandanch"),
    ("44", "Deer Park"),
    ("29", "Brentwood"),
    ("33", "Central Islip"),
    ("179", "Ronkonkoma"),
    // Northeast Regional, Boston to Washington
    ("BOS", "Boston South Station"),
    ("BBY", "Boston Back Bay"),
    ("RTE", "Route 128"),
    ("PVD", "Providence"),
    ("KIN", "Kingston"),
    ("WLY", "Westerly"),
    ("MYS", "Mystic"),
    ("NLC", "New London"),
    ("OSW", "Old Saybrook"),
    ("NHV", "New Haven Union Station"),
    ("BDP", "Bridgeport"),
    ("STM", "Stamford"),
    ("NRO", "New Rochelle"),
    ("NWK", "Newark Penn Station"),
    ("EWR", "Newark Airport"),
    ("MET", "Metropark"),
    ("NBK", "New Brunswick"),
    ("PNC", "Princeton Junction"),
    ("TRE", "Trenton"),
    ("PHL", "Philadelphia 30th Street"),
    ("WIL", "Wilmington"),
    ("NWB", "Newark (DE)"),
    ("ABD", "Aberdeen"),
    ("BAL", "Baltimore Penn Station"),
    ("BWI", "BWI Marshall Airport"),
    ("NCR", "New Carrollton"),
    ("WAS", "Washington DC Union"),
];

/// Regional stations offered as search endpoints.
static REGIONAL_OPTIONS: &[(&str, &str)] = &[
    ("40", "Cold Spring Harbor"),
    ("92", "Hicksville"),
    ("91", "Huntington"),
    ("102", "Jamaica"),
    ("179", "Ronkonkoma"),
    ("14", "Stony Brook"),
    ("205", "Syosset"),
];

/// Long-haul stations offered as search endpoints.
static LONG_HAUL_OPTIONS: &[(&str, &str)] = &[
    ("BAL", "Baltimore Penn Station"),
    ("BBY", "Boston Back Bay"),
    ("BOS", "Boston South Station"),
    ("BDP", "Bridgeport"),
    ("BWI", "BWI Marshall Airport"),
    ("MET", "Metropark"),
    ("NBK", "New Brunswick"),
    ("NCR", "New Carrollton"),
    ("NHV", "New Haven Union Station"),
    ("NWK", "Newark Penn Station"),
    ("PHL", "Philadelphia 30th Street"),
    ("PVD", "Providence"),
    ("TRE", "Trenton"),
    ("WAS", "Washington DC Union"),
    ("WIL", "Wilmington"),
];

/// A station the rider can pick in the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// Prefix table mapping raw stop ids to display names.
#[derive(Debug, Clone, Copy)]
pub struct NameTable {
    entries: &'static [(&'static str, &'static str)],
}

impl Default for NameTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NameTable {
    /// The compiled-in table.
    pub fn builtin() -> Self {
        Self {
            entries: STATION_NAMES,
        }
    }

    /// A table over custom entries.
    pub fn from_static(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Look up the name for a raw id.
    ///
    /// When several keys are prefixes of the id, the longest key wins, so
    /// "205" is Syosset rather than the "20" Bethpage entry. Equal-length
    /// matches are impossible for distinct keys.
    pub fn lookup(&self, raw: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .filter(|(key, _)| raw.starts_with(key))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, name)| *name)
    }

    /// Display name for a raw id, or a synthetic "Station Code: …" label.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_router::stations::NameTable;
    ///
    /// let names = NameTable::builtin();
    /// assert_eq!(names.resolve("10599"), "Penn Station");
    /// assert_eq!(names.resolve(4242), "Station Code: 4242");
    /// ```
    pub fn resolve(&self, raw: impl Display) -> String {
        let raw = raw.to_string();
        match self.lookup(&raw) {
            Some(name) => name.to_string(),
            None => format!("Station Code: {raw}"),
        }
    }
}

/// Regional stations offered in the search form.
pub fn regional_options() -> impl Iterator<Item = StationOption> {
    REGIONAL_OPTIONS
        .iter()
        .map(|&(code, label)| StationOption { code, label })
}

/// Long-haul stations offered in the search form.
pub fn long_haul_options() -> impl Iterator<Item = StationOption> {
    LONG_HAUL_OPTIONS
        .iter()
        .map(|&(code, label)| StationOption { code, label })
}
