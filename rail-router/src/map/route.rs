//! Route geometry: the line drawn from the hub to the chosen destination.
//!
//! The route is orientation only. It is not checked against the legs the
//! rider will actually travel.

use serde::Serialize;
use tracing::trace;

use crate::domain::{LatLon, StationCode};
use crate::stations::DirectorySnapshot;

/// Route endpoints: either empty or exactly `[hub, destination]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RouteCoords(Vec<LatLon>);

impl RouteCoords {
    /// No route.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    fn between(from: LatLon, to: LatLon) -> Self {
        Self(vec![from, to])
    }

    /// The endpoints, in drawing order.
    pub fn points(&self) -> &[LatLon] {
        &self.0
    }

    /// True if nothing should be drawn.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Derive the route from the hub to `destination`.
///
/// Empty when the destination is unset, the directory has not loaded, or
/// either endpoint is unknown or lacks coordinates. Partial routes are
/// never produced.
pub fn derive_route(
    destination: Option<&StationCode>,
    directory: &DirectorySnapshot,
) -> RouteCoords {
    let Some(destination) = destination.filter(|d| !d.is_empty()) else {
        return RouteCoords::empty();
    };

    let hub = directory
        .get(&StationCode::hub())
        .and_then(|s| s.position());
    let dest = directory.get(destination).and_then(|s| s.position());

    match (hub, dest) {
        (Some(hub), Some(dest)) => RouteCoords::between(hub, dest),
        _ => {
            trace!(%destination, generation = directory.generation(), "route not resolvable");
            RouteCoords::empty()
        }
    }
}

/// Re-derives the route only when its inputs change.
///
/// Inputs are the destination and the directory generation, so a
/// directory that loads after the destination was picked triggers a
/// recomputation on the next update.
#[derive(Debug, Clone, Default)]
pub struct RouteTracker {
    inputs: Option<(Option<StationCode>, u64)>,
    route: RouteCoords,
}

impl RouteTracker {
    /// A tracker with no route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute if the inputs differ from the last call.
    ///
    /// Returns true if the route was recomputed.
    pub fn update(
        &mut self,
        destination: Option<&StationCode>,
        directory: &DirectorySnapshot,
    ) -> bool {
        let inputs = (destination.cloned(), directory.generation());
        if self.inputs.as_ref() == Some(&inputs) {
            return false;
        }
        self.route = derive_route(destination, directory);
        self.inputs = Some(inputs);
        true
    }

    /// The current route.
    pub fn route(&self) -> &RouteCoords {
        &self.route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::DirectoryPayload;

    fn directory(json: serde_json::Value, generation: u64) -> DirectorySnapshot {
        let payload: DirectoryPayload = serde_json::from_value(json).unwrap();
        DirectorySnapshot::from_payload(payload, generation)
    }

    fn nyp_and_was() -> DirectorySnapshot {
        directory(
            serde_json::json!({
                "NYP": {"name": "New York Penn Station", "lat": "40.75", "lon": "-73.99"},
                "WAS": {"code": "WAS", "name": "Washington DC Union", "lat": "38.90", "lon": "-77.01"}
            }),
            1,
        )
    }

    fn was() -> StationCode {
        StationCode::from("WAS")
    }

    #[test]
    fn hub_to_destination() {
        let route = derive_route(Some(&was()), &nyp_and_was());
        assert_eq!(route.points(), &[[40.75, -73.99], [38.90, -77.01]]);
    }

    #[test]
    fn serializes_as_nested_pairs() {
        let route = derive_route(Some(&was()), &nyp_and_was());
        assert_eq!(
            serde_json::to_value(&route).unwrap(),
            serde_json::json!([[40.75, -73.99], [38.90, -77.01]])
        );
    }

    #[test]
    fn empty_directory_gives_no_route() {
        assert!(derive_route(Some(&was()), &DirectorySnapshot::default()).is_empty());
    }

    #[test]
    fn unset_destination_gives_no_route() {
        assert!(derive_route(None, &nyp_and_was()).is_empty());
        assert!(derive_route(Some(&StationCode::default()), &nyp_and_was()).is_empty());
    }

    #[test]
    fn unknown_destination_gives_no_route() {
        assert!(derive_route(Some(&StationCode::from("BOS")), &nyp_and_was()).is_empty());
    }

    #[test]
    fn missing_coordinates_give_no_route() {
        let dir = directory(
            serde_json::json!({
                "NYP": {"name": "New York Penn Station", "lat": "40.75", "lon": "-73.99"},
                "WAS": {"name": "Washington DC Union"}
            }),
            1,
        );
        assert!(derive_route(Some(&was()), &dir).is_empty());

        let dir = directory(
            serde_json::json!({
                "NYP": {"name": "New York Penn Station"},
                "WAS": {"name": "Washington DC Union", "lat": 38.9, "lon": -77.01}
            }),
            1,
        );
        assert!(derive_route(Some(&was()), &dir).is_empty());
    }

    #[test]
    fn tracker_recomputes_only_on_change() {
        let dir = nyp_and_was();
        let mut tracker = RouteTracker::new();

        assert!(tracker.update(Some(&was()), &dir));
        assert_eq!(tracker.route().points().len(), 2);
        assert!(!tracker.update(Some(&was()), &dir));

        assert!(tracker.update(None, &dir));
        assert!(tracker.route().is_empty());
    }

    #[test]
    fn tracker_picks_up_late_directory() {
        let mut tracker = RouteTracker::new();
        assert!(tracker.update(Some(&was()), &DirectorySnapshot::default()));
        assert!(tracker.route().is_empty());

        assert!(tracker.update(Some(&was()), &nyp_and_was()));
        assert_eq!(tracker.route().points()[0], [40.75, -73.99]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::stations::{DirectoryPayload, StationDto};
    use proptest::prelude::*;

    fn station(lat: Option<f64>, lon: Option<f64>) -> StationDto {
        StationDto {
            code: None,
            name: String::new(),
            city: String::new(),
            state: String::new(),
            lat,
            lon,
        }
    }

    fn coord() -> impl Strategy<Value = Option<f64>> {
        proptest::option::of(-90.0f64..90.0)
    }

    proptest! {
        /// Routes are all-or-nothing, and start at the hub when drawn.
        #[test]
        fn zero_or_two_points(
            hub in proptest::option::of((coord(), coord())),
            dest in proptest::option::of((coord(), coord())),
        ) {
            let mut payload = DirectoryPayload::new();
            if let Some((lat, lon)) = hub {
                payload.insert("NYP".to_string(), station(lat, lon));
            }
            if let Some((lat, lon)) = dest {
                payload.insert("PHL".to_string(), station(lat, lon));
            }
            let dir = DirectorySnapshot::from_payload(payload, 1);

            let route = derive_route(Some(&StationCode::from("PHL")), &dir);
            let complete = matches!(hub, Some((Some(_), Some(_))))
                && matches!(dest, Some((Some(_), Some(_))));

            if complete {
                prop_assert_eq!(route.points().len(), 2);
                let hub_pos = dir.get(&StationCode::hub()).and_then(|s| s.position());
                prop_assert_eq!(Some(route.points()[0]), hub_pos);
            } else {
                prop_assert!(route.is_empty());
            }
        }
    }
}
