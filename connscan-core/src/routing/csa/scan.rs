use log::{debug, trace};

use super::state::ArrivalLabels;
use crate::model::normalize_name;
use crate::routing::{Itinerary, ModeFilter};
use crate::time::parse_query_time;
use crate::{Connection, PlannerError, StopIdx, Time, TransitNetwork};

/// Index of the first connection departing at or after `departure`, or
/// `connections.len()` when there is none. `connections` must be sorted by
/// departure time.
pub fn starting_index(connections: &[Connection], departure: Time) -> usize {
    connections.partition_point(|connection| connection.departure < departure)
}

impl TransitNetwork {
    /// Answers a journey query by stop names.
    ///
    /// `departure` is a `HH;MM` or `HH;MM;SS` literal. Every stop carrying
    /// the origin name is a possible start and every stop carrying the
    /// destination name a possible end. `Ok(None)` means no destination stop
    /// can be reached.
    ///
    /// # Errors
    ///
    /// Malformed input yields an error for which
    /// [`PlannerError::is_invalid_input`] holds; broken network data yields
    /// [`PlannerError::StructuralInconsistency`].
    pub fn find_path(
        &self,
        origin: &str,
        destination: &str,
        departure: &str,
        modes: Option<ModeFilter>,
    ) -> Result<Option<Itinerary>, PlannerError> {
        self.check_names(origin, destination)?;
        let departure = parse_query_time(departure)?;
        self.plan(origin, destination, departure, modes)
    }

    /// Same as [`TransitNetwork::find_path`] with an already parsed departure time
    pub fn find_path_at(
        &self,
        origin: &str,
        destination: &str,
        departure: Time,
        modes: Option<ModeFilter>,
    ) -> Result<Option<Itinerary>, PlannerError> {
        self.check_names(origin, destination)?;
        self.plan(origin, destination, departure, modes)
    }

    fn plan(
        &self,
        origin: &str,
        destination: &str,
        departure: Time,
        modes: Option<ModeFilter>,
    ) -> Result<Option<Itinerary>, PlannerError> {
        let origins = self.stops_named(origin);
        if origins.is_empty() {
            return Err(PlannerError::UnknownStop(origin.trim().to_string()));
        }
        let destinations = self.stops_named(destination);
        if destinations.is_empty() {
            return Err(PlannerError::UnknownStop(destination.trim().to_string()));
        }

        let labels = self.earliest_arrival(origins, destinations, departure, modes)?;
        let Some((target, arrival)) = labels.best_destination() else {
            debug!("No path from {origin:?} to {destination:?} after {departure}");
            return Ok(None);
        };
        debug!("Reached stop {target} at {arrival}");

        let path = labels.path_to(target)?;
        Itinerary::from_connections(self, &path, departure).map(Some)
    }

    /// Runs the connection scan from `origins` at `departure` until no
    /// connection can improve the earliest arrival among `destinations`.
    ///
    /// Every improved stop propagates through its walking transfers. With
    /// `modes` set, scheduled connections of other modes are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::StructuralInconsistency`] if a stop index is
    /// out of range.
    pub fn earliest_arrival(
        &self,
        origins: &[StopIdx],
        destinations: &[StopIdx],
        departure: Time,
        modes: Option<ModeFilter>,
    ) -> Result<ArrivalLabels, PlannerError> {
        let mut labels = ArrivalLabels::new(self.stop_count(), origins, destinations, departure)?;

        let start = starting_index(&self.connections, departure);
        trace!(
            "Scan starts at connection {start} of {}",
            self.connections.len()
        );

        for connection in &self.connections[start..] {
            if connection.departure > labels.target_bound() {
                trace!(
                    "Stopping at departure {}, destination reached at {}",
                    connection.departure,
                    labels.target_bound()
                );
                break;
            }
            labels.scanned += 1;

            if !self.connection_allowed(connection, modes) {
                continue;
            }
            if labels.best(connection.from) > connection.departure {
                continue;
            }
            if labels.improve(connection.to, connection.arrival, *connection) {
                self.relax_walks(&mut labels, connection.to);
            }
        }

        debug!(
            "Scanned {} connections from index {start}",
            labels.scanned_connections()
        );
        Ok(labels)
    }

    fn check_names(&self, origin: &str, destination: &str) -> Result<(), PlannerError> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(PlannerError::EmptyStopName);
        }
        if normalize_name(origin) == normalize_name(destination) {
            return Err(PlannerError::SameOriginDestination(origin.trim().to_string()));
        }
        Ok(())
    }

    fn connection_allowed(&self, connection: &Connection, modes: Option<ModeFilter>) -> bool {
        match (modes, connection.trip) {
            (None, _) | (_, None) => true,
            (Some(filter), Some(trip)) => self
                .trip_mode(trip)
                .is_some_and(|mode| filter.contains(mode)),
        }
    }

    /// Propagates walking transfers from a freshly improved `stop`. Stops
    /// improved on foot are relaxed in turn; every improvement lowers a
    /// label, so the worklist drains.
    fn relax_walks(&self, labels: &mut ArrivalLabels, stop: StopIdx) {
        let mut pending = vec![stop];
        while let Some(stop) = pending.pop() {
            let reached = labels.best(stop);
            for edge in self.walks_from(stop) {
                let walk = Connection::walk(stop, edge.target, reached, edge.duration);
                if labels.improve(edge.target, walk.arrival, walk) {
                    pending.push(edge.target);
                }
            }
        }
    }
}
