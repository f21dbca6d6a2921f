//! This module is responsible for loading timetable feeds from disk and
//! turning them into a frozen [`crate::TransitNetwork`].

mod builder;
mod config;
mod connections;
pub mod gtfs;
mod transfers;

pub use builder::{build_network, create_transit_network};
pub use config::{NetworkConfig, TransitModelConfig};
pub use connections::build_connections;
pub use transfers::calculate_transfers;
