use fixedbitset::FixedBitSet;

use crate::{Connection, PlannerError, StopIdx, Time};

/// Per-query labels of a connection scan.
///
/// Holds the earliest known arrival at every stop together with the
/// connection that achieved it. Owned by a single query and never shared.
#[derive(Debug, Clone)]
pub struct ArrivalLabels {
    best_arrival: Vec<Time>,
    predecessor: Vec<Option<Connection>>,
    origins: FixedBitSet,
    destinations: FixedBitSet,
    /// Earliest arrival among destination stops, `Time::MAX` until one is reached
    target_bound: Time,
    pub(crate) scanned: usize,
}

impl ArrivalLabels {
    pub(crate) fn new(
        num_stops: usize,
        origins: &[StopIdx],
        destinations: &[StopIdx],
        departure: Time,
    ) -> Result<Self, PlannerError> {
        let mut labels = Self {
            best_arrival: vec![Time::MAX; num_stops],
            predecessor: vec![None; num_stops],
            origins: FixedBitSet::with_capacity(num_stops),
            destinations: FixedBitSet::with_capacity(num_stops),
            target_bound: Time::MAX,
            scanned: 0,
        };

        for &stop in origins.iter().chain(destinations) {
            if stop >= num_stops {
                return Err(PlannerError::StructuralInconsistency(format!(
                    "stop index {stop} is out of range for {num_stops} stops"
                )));
            }
        }

        for &stop in destinations {
            labels.destinations.insert(stop);
        }
        for &stop in origins {
            labels.origins.insert(stop);
            labels.best_arrival[stop] = departure;
            if labels.destinations.contains(stop) {
                labels.target_bound = labels.target_bound.min(departure);
            }
        }
        Ok(labels)
    }

    /// Earliest arrival at `stop`, `None` while unreached
    pub fn arrival(&self, stop: StopIdx) -> Option<Time> {
        self.best_arrival
            .get(stop)
            .copied()
            .filter(|&time| time != Time::MAX)
    }

    /// Connection that produced the label of `stop`
    pub fn predecessor(&self, stop: StopIdx) -> Option<&Connection> {
        self.predecessor.get(stop).and_then(Option::as_ref)
    }

    pub fn is_origin(&self, stop: StopIdx) -> bool {
        self.origins.contains(stop)
    }

    pub fn is_destination(&self, stop: StopIdx) -> bool {
        self.destinations.contains(stop)
    }

    /// Number of connections inspected before the scan ended
    pub fn scanned_connections(&self) -> usize {
        self.scanned
    }

    /// Reached destination stop with the earliest arrival; the lowest index
    /// wins on ties.
    pub fn best_destination(&self) -> Option<(StopIdx, Time)> {
        self.destinations
            .ones()
            .filter_map(|stop| self.arrival(stop).map(|time| (stop, time)))
            .min_by_key(|&(stop, time)| (time, stop))
    }

    pub(crate) fn best(&self, stop: StopIdx) -> Time {
        self.best_arrival[stop]
    }

    pub(crate) fn target_bound(&self) -> Time {
        self.target_bound
    }

    /// Lowers the label of `stop` to `arrival` if that is an improvement,
    /// remembering `via` as the way there.
    pub(crate) fn improve(&mut self, stop: StopIdx, arrival: Time, via: Connection) -> bool {
        if arrival >= self.best_arrival[stop] {
            return false;
        }
        self.best_arrival[stop] = arrival;
        self.predecessor[stop] = Some(via);
        if self.destinations.contains(stop) && arrival < self.target_bound {
            self.target_bound = arrival;
        }
        true
    }

    /// Follows predecessors back from `target` to an origin stop.
    ///
    /// The walk is bounded by the stop count, so corrupt labels surface as
    /// an error instead of looping.
    pub fn path_to(&self, target: StopIdx) -> Result<Vec<Connection>, PlannerError> {
        let mut path = Vec::new();
        let mut stop = target;

        while !self.is_origin(stop) {
            let Some(&connection) = self.predecessor(stop) else {
                return Err(PlannerError::StructuralInconsistency(format!(
                    "stop index {stop} was reached without a predecessor"
                )));
            };
            if path.len() >= self.best_arrival.len() {
                return Err(PlannerError::StructuralInconsistency(
                    "predecessor chain does not lead back to an origin".to_string(),
                ));
            }
            path.push(connection);
            stop = connection.from;
        }

        path.reverse();
        Ok(path)
    }
}
