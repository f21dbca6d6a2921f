//! Small hand-made networks shared by the unit tests

use crate::{NetworkConfig, Route, RouteMode, Stop, StopTime, Time, TransitNetwork, Trip, build_network};

/// Trip calling at `calls` in order, sequence numbers start at 1
pub(crate) fn trip(trip_id: &str, route_id: &str, calls: &[(&str, Time)]) -> Trip {
    let stop_times = calls
        .iter()
        .zip(1..)
        .map(|(&(stop_id, time), seq)| StopTime::new(time, stop_id, seq))
        .collect();
    Trip::new(trip_id, route_id).with_stop_times(stop_times)
}

pub(crate) fn network(stops: Vec<Stop>, trips: Vec<Trip>, routes: Vec<Route>) -> TransitNetwork {
    build_network(stops, trips, routes, &NetworkConfig::default()).unwrap()
}

/// Five stops along a line of latitude.
///
/// - bus 71: Alpha 08:00, Beta 08:10, Gamma 08:20, and again one hour later
/// - tram 5: Beta 08:15, Echo 08:40
/// - train IC: Alpha 08:30, Echo 08:50
///
/// Delta lies about 100 m north of Gamma and is served by nothing, so it can
/// only be reached on foot. All other stops are kilometres apart.
pub(crate) fn corridor_network() -> TransitNetwork {
    let stops = vec![
        Stop::new("a", "Alpha", 50.0, 4.0),
        Stop::new("b", "Beta", 50.0, 4.05),
        Stop::new("c", "Gamma", 50.0, 4.10),
        Stop::new("d", "Delta", 50.0009, 4.10),
        Stop::new("e", "Echo", 50.0, 4.20),
    ];
    let routes = vec![
        Route::new("r71", "71", "Alpha - Gamma", RouteMode::Bus),
        Route::new("r5", "5", "Beta - Echo", RouteMode::Tram),
        Route::new("ric", "IC", "Alpha - Echo", RouteMode::Train),
    ];
    let trips = vec![
        trip("t71", "r71", &[("a", 28_800), ("b", 29_400), ("c", 30_000)]),
        trip("t5", "r5", &[("b", 29_700), ("e", 31_200)]),
        trip("tic", "ric", &[("a", 30_600), ("e", 31_800)]),
        trip("t71-late", "r71", &[("a", 32_400), ("b", 33_000), ("c", 33_600)]),
    ];
    network(stops, trips, routes)
}
