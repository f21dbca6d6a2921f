use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::{Itinerary, JourneyLeg};
use crate::{Error, PlannerError, StopIdx, TransitNetwork};

impl Itinerary {
    /// Converts the journey to a `GeoJSON` `FeatureCollection` with one
    /// `LineString` feature per leg.
    pub fn to_geojson(&self, network: &TransitNetwork) -> Result<FeatureCollection, Error> {
        let features = self
            .legs
            .iter()
            .enumerate()
            .map(|(idx, leg)| leg_feature(network, idx, leg))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, network: &TransitNetwork) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(network)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn leg_feature(network: &TransitNetwork, leg_idx: usize, leg: &JourneyLeg) -> Result<Feature, Error> {
    let value = match leg {
        JourneyLeg::Ride {
            trip_id,
            route_id,
            route_short_name,
            mode,
            board,
            alight,
            stops,
            ..
        } => json!({
            "type": "Feature",
            "geometry": line_through(network, stops)?,
            "properties": {
                "leg_type": "ride",
                "leg_index": leg_idx,
                "mode": mode,
                "route_id": route_id,
                "route_short_name": route_short_name,
                "trip_id": trip_id,
                "from_name": board.name,
                "to_name": alight.name,
                "departure_time": board.time,
                "arrival_time": alight.time,
                "duration": alight.time.saturating_sub(board.time),
                "num_stops": stops.len(),
            }
        }),
        JourneyLeg::Walk { from, to, duration } => json!({
            "type": "Feature",
            "geometry": line_through(network, &[from.stop, to.stop])?,
            "properties": {
                "leg_type": "walk",
                "leg_index": leg_idx,
                "from_name": from.name,
                "to_name": to.name,
                "departure_time": from.time,
                "arrival_time": to.time,
                "duration": duration,
            }
        }),
    };

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn line_through(network: &TransitNetwork, stops: &[StopIdx]) -> Result<Geometry, Error> {
    let coords = stops
        .iter()
        .map(|&stop| {
            network
                .stop(stop)
                .map(|data| Coord::from(data.geometry))
                .ok_or_else(|| {
                    PlannerError::StructuralInconsistency(format!(
                        "leg references unknown stop {stop}"
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Geometry::new(GeoJsonValue::from(&LineString::new(coords))))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_utils::corridor_network;

    #[test]
    fn one_feature_per_leg() {
        let network = corridor_network();
        let itinerary = network
            .find_path("Alpha", "Delta", "07;50", None)
            .unwrap()
            .unwrap();

        let collection = itinerary.to_geojson(&network).unwrap();
        assert_eq!(collection.features.len(), 2);

        let ride = &collection.features[0];
        assert_eq!(ride.property("leg_type"), Some(&json!("ride")));
        assert_eq!(ride.property("mode"), Some(&json!("bus")));
        assert_eq!(ride.property("num_stops"), Some(&json!(3)));
        let walk = &collection.features[1];
        assert_eq!(walk.property("leg_type"), Some(&json!("walk")));
        assert_eq!(walk.property("to_name"), Some(&json!("Delta")));
    }

    #[test]
    fn string_output_is_a_feature_collection() {
        let network = corridor_network();
        let itinerary = network
            .find_path("Alpha", "Gamma", "07;50", None)
            .unwrap()
            .unwrap();

        let text = itinerary.to_geojson_string(&network).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(
            value["features"][0]["geometry"]["coordinates"][0],
            json!([4.0, 50.0])
        );
    }
}
