// Re-export key components
pub use crate::loading::{NetworkConfig, TransitModelConfig, build_network, create_transit_network};
pub use crate::loading::gtfs::{FeedData, discover_feed_dirs, load_feeds};
pub use crate::model::TransitNetwork;
pub use crate::routing::{ArrivalLabels, Itinerary, JourneyLeg, LegStop, ModeFilter};
pub use crate::spatial::{BallTree, haversine_distance};
pub use crate::time::{format_time, parse_query_time};
pub use crate::{Error, PlannerError};

// Core types for connection scanning
pub use crate::RouteIdx;
pub use crate::StopIdx;
pub use crate::Time; // seconds since midnight
pub use crate::TripIdx;
