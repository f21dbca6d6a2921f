//! Frozen network structure and methods to work with it

use geo::Point;
use hashbrown::HashMap;

use super::{Connection, Route, RouteMode, Stop, Trip, WalkEdge, WalkIndex};
use crate::loading::NetworkConfig;
use crate::spatial::BallTree;
use crate::{RouteIdx, StopIdx, TripIdx};

/// Read-only planner handle produced by [`crate::build_network`].
///
/// Nothing in here changes after construction, so a network can be shared by
/// any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    pub(crate) stops: Vec<Stop>,
    pub(crate) routes: Vec<Route>,
    pub(crate) trips: Vec<Trip>,
    /// Route of every trip, `None` when the trip names an unknown route
    pub(crate) trip_routes: Vec<Option<RouteIdx>>,
    pub(crate) stop_index: HashMap<String, StopIdx>,
    pub(crate) route_index: HashMap<String, RouteIdx>,
    pub(crate) trip_index: HashMap<String, TripIdx>,
    /// Normalized display name to every stop carrying it
    pub(crate) name_index: HashMap<String, Vec<StopIdx>>,
    /// Sorted by departure time
    pub(crate) connections: Vec<Connection>,
    pub(crate) walks: WalkIndex,
    pub(crate) ball_tree: BallTree,
    pub(crate) config: NetworkConfig,
}

impl TransitNetwork {
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Scheduled connections ordered by departure time
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn stop(&self, stop: StopIdx) -> Option<&Stop> {
        self.stops.get(stop)
    }

    pub fn stop_idx(&self, stop_id: &str) -> Option<StopIdx> {
        self.stop_index.get(stop_id).copied()
    }

    pub fn stop_by_id(&self, stop_id: &str) -> Option<&Stop> {
        self.stop_idx(stop_id).and_then(|idx| self.stops.get(idx))
    }

    pub fn route_by_id(&self, route_id: &str) -> Option<&Route> {
        self.route_index
            .get(route_id)
            .and_then(|&idx| self.routes.get(idx))
    }

    pub fn trip_idx(&self, trip_id: &str) -> Option<TripIdx> {
        self.trip_index.get(trip_id).copied()
    }

    pub fn trip(&self, trip: TripIdx) -> Option<&Trip> {
        self.trips.get(trip)
    }

    /// Route operating `trip`, `None` if either is unknown
    pub fn route_for_trip(&self, trip: TripIdx) -> Option<&Route> {
        self.trip_routes
            .get(trip)
            .copied()
            .flatten()
            .and_then(|route| self.routes.get(route))
    }

    /// Mode of the vehicle running `trip`
    pub fn trip_mode(&self, trip: TripIdx) -> Option<RouteMode> {
        self.route_for_trip(trip).map(|route| route.mode)
    }

    /// All stops displayed under `name` (case-insensitive)
    pub fn stops_named(&self, name: &str) -> &[StopIdx] {
        self.name_index
            .get(&normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn walks_from(&self, stop: StopIdx) -> &[WalkEdge] {
        self.walks.edges_from(stop)
    }

    pub fn walk_count(&self) -> usize {
        self.walks.len()
    }

    /// Stops within `radius` meters of `point`, nearest first
    pub fn stops_near(&self, point: Point<f64>, radius: f64) -> Vec<(StopIdx, f64)> {
        let mut found = self.ball_tree.range_with_distances(point, radius);
        found.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        found
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "Network with {} stops, {} routes, {} trips, {} connections and {} walking transfers",
            self.stop_count(),
            self.route_count(),
            self.trip_count(),
            self.connection_count(),
            self.walk_count()
        )
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
