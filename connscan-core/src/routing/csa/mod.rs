//! Connection Scan Algorithm over the time-sorted connection sequence

mod scan;
mod state;


pub use scan::starting_index;
pub use state::ArrivalLabels;
