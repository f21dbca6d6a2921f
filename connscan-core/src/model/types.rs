use std::fmt;

use geo::Point;
use serde::Serialize;

use crate::{StopIdx, Time};

/// A physical stop or platform. Several stops may share the same `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub stop_id: String,
    pub name: String,
    /// `x` = longitude, `y` = latitude, degrees
    pub geometry: Point<f64>,
}

impl Stop {
    pub fn new(stop_id: impl Into<String>, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            stop_id: stop_id.into(),
            name: name.into(),
            geometry: Point::new(lon, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }
}

/// Vehicle type serving a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    Bus,
    Train,
    Tram,
    Metro,
    Other,
}

impl RouteMode {
    pub const FILTERABLE: [RouteMode; 4] = [
        RouteMode::Bus,
        RouteMode::Train,
        RouteMode::Tram,
        RouteMode::Metro,
    ];

    /// Maps a feed `route_type` value, either a name (`"BUS"`, `"train"`)
    /// or a basic GTFS code (`0` tram, `1` metro, `2` rail, `3` bus).
    pub fn from_route_type(route_type: &str) -> Self {
        match route_type.trim().to_ascii_lowercase().as_str() {
            "bus" | "3" => RouteMode::Bus,
            "train" | "rail" | "2" => RouteMode::Train,
            "tram" | "0" => RouteMode::Tram,
            "metro" | "subway" | "1" => RouteMode::Metro,
            _ => RouteMode::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteMode::Bus => "bus",
            RouteMode::Train => "train",
            RouteMode::Tram => "tram",
            RouteMode::Metro => "metro",
            RouteMode::Other => "other",
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub route_id: String,
    pub short_name: String,
    pub long_name: String,
    pub mode: RouteMode,
}

impl Route {
    pub fn new(
        route_id: impl Into<String>,
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        mode: RouteMode,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            short_name: short_name.into(),
            long_name: long_name.into(),
            mode,
        }
    }
}

/// One scheduled call of a trip at a stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub departure: Time,
    pub stop_id: String,
    pub sequence: u32,
}

impl StopTime {
    pub fn new(departure: Time, stop_id: impl Into<String>, sequence: u32) -> Self {
        Self {
            departure,
            stop_id: stop_id.into(),
            sequence,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub trip_id: String,
    pub route_id: String,
    pub stop_times: Vec<StopTime>,
}

impl Trip {
    pub fn new(trip_id: impl Into<String>, route_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            route_id: route_id.into(),
            stop_times: Vec::new(),
        }
    }

    pub fn with_stop_times(mut self, stop_times: Vec<StopTime>) -> Self {
        self.stop_times = stop_times;
        self.sort_stop_times();
        self
    }

    /// Orders the calls by `sequence`; calls with equal sequence keep their
    /// relative order.
    pub fn sort_stop_times(&mut self) {
        self.stop_times.sort_by_key(|stop_time| stop_time.sequence);
    }
}

/// Pedestrian transfer leaving a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkEdge {
    pub target: StopIdx,
    /// Walking time in whole seconds
    pub duration: Time,
}
