//! Map viewport state.

use serde::Serialize;

use crate::domain::LatLon;

use super::route::RouteCoords;

/// Initial map center (Manhattan, near the hub).
pub const DEFAULT_CENTER: LatLon = [40.7506, -73.9935];

/// Initial zoom level.
pub const DEFAULT_ZOOM: u8 = 12;

/// Margin kept around a fitted route, in pixels.
pub const FIT_PADDING_PX: u32 = 50;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for no points.
    pub fn around(points: &[LatLon]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds {
            south_west: *first,
            north_east: *first,
        };
        for [lat, lon] in rest {
            bounds.south_west = [bounds.south_west[0].min(*lat), bounds.south_west[1].min(*lon)];
            bounds.north_east = [bounds.north_east[0].max(*lat), bounds.north_east[1].max(*lon)];
        }
        Some(bounds)
    }

    /// Whether `point` lies inside the box (edges included).
    pub fn contains(&self, [lat, lon]: LatLon) -> bool {
        (self.south_west[0]..=self.north_east[0]).contains(&lat)
            && (self.south_west[1]..=self.north_east[1]).contains(&lon)
    }
}

/// What the map should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Viewport {
    /// Fixed center and zoom.
    Centered { center: LatLon, zoom: u8 },
    /// Animate to fit the bounds, keeping a padding margin.
    Fitted {
        bounds: Bounds,
        padding_px: u32,
        animate: bool,
    },
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::Centered {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Viewport that follows the route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapView {
    viewport: Viewport,
}

impl MapView {
    /// A view at the default center.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit to a newly derived route.
    ///
    /// An empty route leaves the viewport where it is. Returns true if the
    /// viewport changed.
    pub fn apply_route(&mut self, route: &RouteCoords) -> bool {
        let Some(bounds) = Bounds::around(route.points()) else {
            return false;
        };
        let fitted = Viewport::Fitted {
            bounds,
            padding_px: FIT_PADDING_PX,
            animate: true,
        };
        if self.viewport == fitted {
            return false;
        }
        self.viewport = fitted;
        true
    }

    /// The current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
