use hashbrown::HashMap;
use itertools::Itertools;
use log::warn;
use rayon::prelude::*;

use crate::{StopIdx, model::Connection, model::Trip};

/// Expands every trip into consecutive connections and sorts the result by
/// departure time.
///
/// A trip with fewer than two calls contributes nothing. Pairs touching a stop
/// id missing from `stop_index` are skipped. Trips must already be sorted by
/// stop sequence.
pub fn build_connections(trips: &[Trip], stop_index: &HashMap<String, StopIdx>) -> Vec<Connection> {
    let mut connections = Vec::new();
    let mut unresolved = 0_usize;

    for (trip_idx, trip) in trips.iter().enumerate() {
        for (departure, arrival) in trip.stop_times.iter().tuple_windows() {
            match (
                stop_index.get(&departure.stop_id),
                stop_index.get(&arrival.stop_id),
            ) {
                (Some(&from), Some(&to)) => connections.push(Connection::scheduled(
                    trip_idx,
                    from,
                    to,
                    departure.departure,
                    arrival.departure,
                )),
                _ => unresolved += 1,
            }
        }
    }

    if unresolved > 0 {
        warn!("Skipped {unresolved} connections referencing unknown stops");
    }

    // Stable, so equal departures keep trip order
    connections.par_sort_by_key(|connection| connection.departure);
    connections
}
