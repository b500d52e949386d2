//! Rail itinerary server.
//!
//! Composes two-carrier trips through New York Penn Station: a regional leg
//! and a long-haul leg, planned by an external service and expanded into
//! stop-by-stop detail, with a map route from the hub to the destination.

pub mod config;
pub mod domain;
pub mod itinerary;
pub mod map;
pub mod planner;
pub mod stations;
pub mod web;

#[cfg(test)]
mod test_support;
