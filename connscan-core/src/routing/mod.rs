//! Journey planning: the connection scan, mode filtering and itinerary
//! presentation

mod csa;
mod itinerary;
mod mode;

pub use csa::{ArrivalLabels, starting_index};
pub use itinerary::{Itinerary, JourneyLeg, LegStop};
pub use mode::ModeFilter;
