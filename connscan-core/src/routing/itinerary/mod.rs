//! Human readable journeys built from a reconstructed connection path

mod to_geojson;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::time::format_time;
use crate::{Connection, PlannerError, RouteMode, StopIdx, Time, TransitNetwork, TripIdx};

/// A stop together with the time the traveller is there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegStop {
    #[serde(skip)]
    pub stop: StopIdx,
    pub stop_id: String,
    pub name: String,
    #[serde(serialize_with = "serialize_clock")]
    pub time: Time,
}

impl LegStop {
    fn resolve(network: &TransitNetwork, stop: StopIdx, time: Time) -> Result<Self, PlannerError> {
        let data = network.stop(stop).ok_or_else(|| {
            PlannerError::StructuralInconsistency(format!("connection references unknown stop {stop}"))
        })?;
        Ok(Self {
            stop,
            stop_id: data.stop_id.clone(),
            name: data.name.clone(),
            time,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JourneyLeg {
    /// Consecutive connections of one trip
    Ride {
        #[serde(skip)]
        trip: TripIdx,
        trip_id: String,
        route_id: String,
        route_short_name: String,
        mode: RouteMode,
        board: LegStop,
        alight: LegStop,
        /// Every stop served between boarding and alighting, both included
        #[serde(skip)]
        stops: Vec<StopIdx>,
    },
    Walk {
        from: LegStop,
        to: LegStop,
        #[serde(rename = "duration_s")]
        duration: Time,
    },
}

impl JourneyLeg {
    pub fn departure(&self) -> Time {
        match self {
            JourneyLeg::Ride { board, .. } => board.time,
            JourneyLeg::Walk { from, .. } => from.time,
        }
    }

    pub fn arrival(&self) -> Time {
        match self {
            JourneyLeg::Ride { alight, .. } => alight.time,
            JourneyLeg::Walk { to, .. } => to.time,
        }
    }

    pub fn is_ride(&self) -> bool {
        matches!(self, JourneyLeg::Ride { .. })
    }

    fn ride(network: &TransitNetwork, trip: TripIdx, connection: &Connection) -> Result<Self, PlannerError> {
        let trip_data = network.trip(trip).ok_or_else(|| {
            PlannerError::StructuralInconsistency(format!("connection references unknown trip {trip}"))
        })?;
        let route = network.route_for_trip(trip).ok_or_else(|| {
            PlannerError::StructuralInconsistency(format!(
                "trip {} references unknown route {}",
                trip_data.trip_id, trip_data.route_id
            ))
        })?;

        Ok(JourneyLeg::Ride {
            trip,
            trip_id: trip_data.trip_id.clone(),
            route_id: route.route_id.clone(),
            route_short_name: route.short_name.clone(),
            mode: route.mode,
            board: LegStop::resolve(network, connection.from, connection.departure)?,
            alight: LegStop::resolve(network, connection.to, connection.arrival)?,
            stops: vec![connection.from, connection.to],
        })
    }
}

impl fmt::Display for JourneyLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyLeg::Ride {
                route_short_name,
                mode,
                board,
                alight,
                ..
            } => write!(
                f,
                "Take {mode} {route_short_name} from {} ({}) to {} ({})",
                board.name,
                format_time(board.time),
                alight.name,
                format_time(alight.time)
            ),
            JourneyLeg::Walk { from, to, .. } => write!(
                f,
                "Walk from {} ({}) to {} ({})",
                from.name,
                format_time(from.time),
                to.name,
                format_time(to.time)
            ),
        }
    }
}

/// Journey from an origin stop to a destination stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub legs: Vec<JourneyLeg>,
    #[serde(serialize_with = "serialize_clock")]
    pub departure_time: Time,
    #[serde(serialize_with = "serialize_clock")]
    pub arrival_time: Time,
}

impl Itinerary {
    /// Groups a reconstructed connection path into legs.
    ///
    /// Consecutive connections of one trip become a single ride. Walks from a
    /// stop to itself and walks of zero duration are left out.
    pub(crate) fn from_connections(
        network: &TransitNetwork,
        connections: &[Connection],
        requested_departure: Time,
    ) -> Result<Self, PlannerError> {
        let mut legs: Vec<JourneyLeg> = Vec::new();

        for connection in connections {
            let Some(trip) = connection.trip else {
                if connection.from == connection.to || connection.duration() == 0 {
                    continue;
                }
                legs.push(JourneyLeg::Walk {
                    from: LegStop::resolve(network, connection.from, connection.departure)?,
                    to: LegStop::resolve(network, connection.to, connection.arrival)?,
                    duration: connection.duration(),
                });
                continue;
            };

            if let Some(JourneyLeg::Ride {
                trip: current,
                alight,
                stops,
                ..
            }) = legs.last_mut()
                && *current == trip
                && alight.stop == connection.from
            {
                *alight = LegStop::resolve(network, connection.to, connection.arrival)?;
                stops.push(connection.to);
                continue;
            }
            legs.push(JourneyLeg::ride(network, trip, connection)?);
        }

        Ok(Self {
            legs,
            departure_time: connections
                .first()
                .map_or(requested_departure, |c| c.departure),
            arrival_time: connections
                .last()
                .map_or(requested_departure, |c| c.arrival),
        })
    }

    /// Time between leaving the first stop and reaching the last one
    pub fn duration(&self) -> Time {
        self.arrival_time.saturating_sub(self.departure_time)
    }

    pub fn ride_count(&self) -> usize {
        self.legs.iter().filter(|leg| leg.is_ride()).count()
    }

    pub fn to_json_string(&self) -> Result<String, crate::Error> {
        serde_json::to_string_pretty(self).map_err(|e| crate::Error::InvalidData(e.to_string()))
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, leg) in self.legs.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{leg}")?;
        }
        Ok(())
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_clock<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_time(*time))
}
