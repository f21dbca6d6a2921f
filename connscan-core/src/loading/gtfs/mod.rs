//! Reading operator feeds laid out as `stops.csv`, `routes.csv`, `trips.csv`
//! and `stop_times.csv` per directory

mod parser;
mod processor;
mod raw_types;

pub use parser::deserialize_feed_file;
pub use processor::{FeedData, discover_feed_dirs, load_feeds};
pub use raw_types::{FeedRoute, FeedStop, FeedStopTime, FeedTrip};
