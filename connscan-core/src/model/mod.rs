//! Data model for timetable routing
//!
//! Contains the feed entities, the connection and walking-edge records derived
//! from them, and the frozen [`TransitNetwork`] queries run against.

mod connection;
mod network;
mod types;
mod walks;

pub use connection::Connection;
pub use network::TransitNetwork;
pub(crate) use network::normalize_name;
pub use types::{Route, RouteMode, Stop, StopTime, Trip, WalkEdge};
pub use walks::WalkIndex;
