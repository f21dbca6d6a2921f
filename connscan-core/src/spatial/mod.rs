//! Geodesic distance and the ball tree used to discover walking transfers

mod ball_tree;
mod haversine;

pub use ball_tree::BallTree;
pub use haversine::{EARTH_RADIUS_M, haversine_distance};
