//! Map geometry for the itinerary view.
//!
//! The map shows every plottable long-haul station as a marker and a
//! straight line from the hub to the selected destination. Whenever a line
//! can be drawn the viewport is fitted to it.

mod route;
mod viewport;

pub use route::{RouteCoords, RouteTracker, derive_route};
pub use viewport::{
    Bounds, DEFAULT_CENTER, DEFAULT_ZOOM, FIT_PADDING_PX, MapView, Viewport,
};
