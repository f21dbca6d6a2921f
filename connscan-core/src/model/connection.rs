use crate::{StopIdx, Time, TripIdx};

/// Directed timestamped link between two stops.
///
/// Scheduled legs carry the trip they belong to, pedestrian transfers have
/// `trip == None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub trip: Option<TripIdx>,
    pub from: StopIdx,
    pub to: StopIdx,
    pub departure: Time,
    pub arrival: Time,
}

impl Connection {
    pub fn scheduled(trip: TripIdx, from: StopIdx, to: StopIdx, departure: Time, arrival: Time) -> Self {
        Self {
            trip: Some(trip),
            from,
            to,
            departure,
            arrival,
        }
    }

    pub fn walk(from: StopIdx, to: StopIdx, departure: Time, duration: Time) -> Self {
        Self {
            trip: None,
            from,
            to,
            departure,
            arrival: departure.saturating_add(duration),
        }
    }

    pub fn is_walk(&self) -> bool {
        self.trip.is_none()
    }

    pub fn duration(&self) -> Time {
        self.arrival.saturating_sub(self.departure)
    }
}
