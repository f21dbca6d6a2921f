use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use log::{debug, info, warn};

use super::{
    parser::deserialize_feed_file,
    raw_types::{FeedRoute, FeedStop, FeedStopTime, FeedTrip},
};
use crate::{Error, Route, RouteMode, Stop, StopTime, Trip, time::parse_feed_time};

/// Entities read from one or more feed directories
#[derive(Debug, Default)]
pub struct FeedData {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
}

/// Lists the feed directories under `root`.
///
/// `root` itself is a feed when it contains `stops.csv`; otherwise every
/// sub-directory holding a `stops.csv` is one, in name order.
pub fn discover_feed_dirs(root: &Path) -> Result<Vec<PathBuf>, Error> {
    if root.join("stops.csv").is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() && path.join("stops.csv").is_file() {
            dirs.push(path);
        }
    }
    dirs.sort();

    if dirs.is_empty() {
        return Err(Error::InvalidData(format!(
            "No feed found under {}",
            root.display()
        )));
    }
    Ok(dirs)
}

/// Reads every directory in `dirs` and merges them into one set of entities.
///
/// Stop times are attached to the trip with the same id in any of the
/// directories and ordered by `stop_sequence`.
pub fn load_feeds(dirs: &[PathBuf]) -> Result<FeedData, Error> {
    let mut feed = FeedData::default();
    let mut stop_times: Vec<FeedStopTime> = Vec::new();

    for dir in dirs {
        info!("Reading feed {}", dir.display());
        let stops: Vec<FeedStop> = deserialize_feed_file(&dir.join("stops.csv"))?;
        let routes: Vec<FeedRoute> = deserialize_feed_file(&dir.join("routes.csv"))?;
        let trips: Vec<FeedTrip> = deserialize_feed_file(&dir.join("trips.csv"))?;
        stop_times.extend(deserialize_feed_file::<FeedStopTime>(
            &dir.join("stop_times.csv"),
        )?);

        feed.stops.extend(stops.into_iter().map(convert_stop));
        feed.routes.extend(routes.into_iter().map(convert_route));
        feed.trips
            .extend(trips.into_iter().map(|trip| Trip::new(trip.trip_id, trip.route_id)));
    }

    attach_stop_times(&mut feed.trips, stop_times);
    Ok(feed)
}

fn attach_stop_times(trips: &mut [Trip], stop_times: Vec<FeedStopTime>) {
    // First trip wins on duplicate ids, matching the network builder
    let mut trip_positions: HashMap<String, usize> = HashMap::with_capacity(trips.len());
    for (idx, trip) in trips.iter().enumerate() {
        trip_positions.entry(trip.trip_id.clone()).or_insert(idx);
    }

    let mut orphans = 0_usize;
    let mut bad_times = 0_usize;
    for stop_time in stop_times {
        let Some(&trip_idx) = trip_positions.get(&stop_time.trip_id) else {
            orphans += 1;
            continue;
        };
        let Some(departure) = parse_feed_time(&stop_time.departure_time) else {
            bad_times += 1;
            continue;
        };
        trips[trip_idx].stop_times.push(StopTime::new(
            departure,
            stop_time.stop_id,
            stop_time.stop_sequence,
        ));
    }

    if orphans > 0 {
        debug!("Dropped {orphans} stop times of unknown trips");
    }
    if bad_times > 0 {
        warn!("Dropped {bad_times} stop times with an unreadable departure time");
    }

    for trip in trips.iter_mut() {
        trip.sort_stop_times();
    }
}

fn convert_stop(feed_stop: FeedStop) -> Stop {
    Stop::new(
        feed_stop.stop_id,
        feed_stop.stop_name,
        feed_stop.stop_lat,
        feed_stop.stop_lon,
    )
}

fn convert_route(feed_route: FeedRoute) -> Route {
    let mode = RouteMode::from_route_type(&feed_route.route_type);
    Route::new(
        feed_route.route_id,
        feed_route.route_short_name,
        feed_route.route_long_name,
        mode,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_stop_time(trip: &str, time: &str, stop: &str, seq: u32) -> FeedStopTime {
        FeedStopTime {
            trip_id: trip.to_string(),
            departure_time: time.to_string(),
            stop_id: stop.to_string(),
            stop_sequence: seq,
        }
    }

    #[test]
    fn stop_times_are_attached_and_sorted() {
        let mut trips = vec![Trip::new("t1", "r1"), Trip::new("t2", "r1")];
        attach_stop_times(
            &mut trips,
            vec![
                feed_stop_time("t1", "08:10:00", "b", 2),
                feed_stop_time("t1", "08:00:00", "a", 1),
                feed_stop_time("t2", "09:00:00", "a", 1),
                feed_stop_time("ghost", "09:00:00", "a", 1),
                feed_stop_time("t2", "later", "b", 2),
            ],
        );

        assert_eq!(
            trips[0].stop_times,
            vec![StopTime::new(28_800, "a", 1), StopTime::new(29_400, "b", 2)]
        );
        assert_eq!(trips[1].stop_times.len(), 1);
    }

    #[test]
    fn route_types_map_to_modes() {
        let route = convert_route(FeedRoute {
            route_id: "r".into(),
            route_short_name: "IC".into(),
            route_long_name: "Oostende - Eupen".into(),
            route_type: "TRAIN".into(),
        });
        assert_eq!(route.mode, RouteMode::Train);
    }
}
