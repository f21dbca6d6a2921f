use std::time::Instant;

use hashbrown::HashMap;
use log::{info, warn};

use super::config::{NetworkConfig, TransitModelConfig};
use super::connections::build_connections;
use super::gtfs::load_feeds;
use super::transfers::calculate_transfers;
use crate::model::normalize_name;
use crate::spatial::BallTree;
use crate::{Error, Route, RouteIdx, Stop, StopIdx, TransitNetwork, Trip};

/// Creates a network from the feed directories named in `config`
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a feed cannot be read
pub fn create_transit_network(config: &TransitModelConfig) -> Result<TransitNetwork, Error> {
    config.validate()?;

    let started = Instant::now();
    info!("Reading {} feed directories", config.feed_dirs.len());
    let feed = load_feeds(&config.feed_dirs)?;
    info!(
        "Feeds read in {} ms: {} stops, {} routes, {} trips",
        started.elapsed().as_millis(),
        feed.stops.len(),
        feed.routes.len(),
        feed.trips.len()
    );

    let network = build_network(feed.stops, feed.trips, feed.routes, &config.network)?;

    // CSV deserialization allocates a lot of short-lived memory that glibc
    // keeps around; hand the free tail of the heap back to the system.
    //
    // # Safety
    //
    // This call is safe to use on linux with glibc implementation
    // which is checked by the cfg attribute in compile time.
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::debug!("Memory trimming released nothing");
        } else {
            log::debug!("Successfully trimmed unused heap memory");
        }
    }

    Ok(network)
}

/// Builds the read-only planner handle: indexes the entities, derives the
/// sorted connection sequence, the ball tree and the walking transfers.
///
/// When several entities share an id, the first one is kept.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for an invalid `config`
pub fn build_network(
    stops: Vec<Stop>,
    trips: Vec<Trip>,
    routes: Vec<Route>,
    config: &NetworkConfig,
) -> Result<TransitNetwork, Error> {
    config.validate()?;

    let (stops, stop_index) = dedup_by_id(stops, |stop| &stop.stop_id, "stop");
    let (routes, route_index) = dedup_by_id(routes, |route| &route.route_id, "route");
    let (mut trips, trip_index) = dedup_by_id(trips, |trip| &trip.trip_id, "trip");

    let mut name_index: HashMap<String, Vec<StopIdx>> = HashMap::new();
    for (idx, stop) in stops.iter().enumerate() {
        name_index
            .entry(normalize_name(&stop.name))
            .or_default()
            .push(idx);
    }

    for trip in &mut trips {
        trip.sort_stop_times();
    }
    let trip_routes: Vec<Option<RouteIdx>> = trips
        .iter()
        .map(|trip| route_index.get(&trip.route_id).copied())
        .collect();
    let orphan_trips = trip_routes.iter().filter(|route| route.is_none()).count();
    if orphan_trips > 0 {
        warn!("{orphan_trips} trips reference unknown routes, they are excluded by mode filters");
    }

    let started = Instant::now();
    let connections = build_connections(&trips, &stop_index);
    info!(
        "{} connections built and sorted in {} ms",
        connections.len(),
        started.elapsed().as_millis()
    );

    let started = Instant::now();
    let ball_tree = BallTree::new(
        stops.iter().enumerate().map(|(idx, stop)| (idx, stop.geometry)),
        config.leaf_capacity,
    );
    info!(
        "Ball tree over {} stops built in {} ms (depth {})",
        ball_tree.len(),
        started.elapsed().as_millis(),
        ball_tree.depth()
    );

    let started = Instant::now();
    let walks = calculate_transfers(&stops, &ball_tree, config);
    info!(
        "{} walking transfers built in {} ms",
        walks.len(),
        started.elapsed().as_millis()
    );

    Ok(TransitNetwork {
        stops,
        routes,
        trips,
        trip_routes,
        stop_index,
        route_index,
        trip_index,
        name_index,
        connections,
        walks,
        ball_tree,
        config: config.clone(),
    })
}

fn dedup_by_id<T, F>(items: Vec<T>, id: F, kind: &str) -> (Vec<T>, HashMap<String, usize>)
where
    F: Fn(&T) -> &String,
{
    let mut kept = Vec::with_capacity(items.len());
    let mut index = HashMap::with_capacity(items.len());
    let mut duplicates = 0_usize;

    for item in items {
        if index.contains_key(id(&item)) {
            duplicates += 1;
            continue;
        }
        index.insert(id(&item).clone(), kept.len());
        kept.push(item);
    }

    if duplicates > 0 {
        warn!("Ignored {duplicates} {kind} records with an already used id");
    }
    (kept, index)
}
