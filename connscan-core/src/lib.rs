//! Earliest-arrival journey planning over multi-operator timetables.
//!
//! The crate turns stops, routes and trips into a time-sorted sequence of
//! connections plus per-stop walking transfers, then answers queries with the
//! Connection Scan Algorithm.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod spatial;
pub mod time;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Error, PlannerError};
pub use loading::{NetworkConfig, TransitModelConfig, build_network, create_transit_network};
pub use model::{Connection, Route, RouteMode, Stop, StopTime, TransitNetwork, Trip, WalkEdge};
pub use routing::{Itinerary, JourneyLeg, LegStop, ModeFilter};

/// Seconds since midnight of the service day. Values past 86400 are kept as-is
/// for trips running after midnight.
pub type Time = u32;

/// Index of a stop inside [`TransitNetwork::stops`]
pub type StopIdx = usize;

/// Index of a trip inside [`TransitNetwork::trips`]
pub type TripIdx = usize;

/// Index of a route inside [`TransitNetwork::routes`]
pub type RouteIdx = usize;
