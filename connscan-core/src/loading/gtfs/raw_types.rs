use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FeedStop {
    pub stop_id: String,
    #[serde(default)]
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedRoute {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: String,
    #[serde(default)]
    pub route_long_name: String,
    #[serde(default)]
    pub route_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedTrip {
    pub trip_id: String,
    pub route_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedStopTime {
    pub trip_id: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: u32,
}
