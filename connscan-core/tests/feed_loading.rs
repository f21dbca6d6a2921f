use std::fs;
use std::path::Path;

use connscan_core::loading::gtfs::discover_feed_dirs;
use connscan_core::{Error, JourneyLeg, NetworkConfig, TransitModelConfig, create_transit_network};
use tempfile::TempDir;

fn write_feed(dir: &Path, stops: &str, routes: &str, trips: &str, stop_times: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("stops.csv"), stops).unwrap();
    fs::write(dir.join("routes.csv"), routes).unwrap();
    fs::write(dir.join("trips.csv"), trips).unwrap();
    fs::write(dir.join("stop_times.csv"), stop_times).unwrap();
}

/// Two operators: a train line into Bruxelles-Central and a metro line
/// starting at Gare Centrale, about 100 m away.
fn two_operator_root() -> TempDir {
    let root = TempDir::new().unwrap();
    write_feed(
        &root.path().join("sncb"),
        "stop_id,stop_name,stop_lat,stop_lon\n\
         8813003,Bruxelles-Central,50.8453,4.3571\n\
         8892007,Gent-Sint-Pieters,51.0357,3.7107\n\
         broken,Nowhere,not-a-latitude,4.0\n",
        "route_id,route_short_name,route_long_name,route_type\n\
         ic1,IC,Gent - Bruxelles,TRAIN\n",
        "trip_id,route_id\n\
         ic1-0800,ic1\n\
         ic1-late,ic1\n",
        "trip_id,departure_time,stop_id,stop_sequence\n\
         ic1-0800,08:35:00,8813003,2\n\
         ic1-0800,08:00:00,8892007,1\n\
         ic1-0800,later,8813003,3\n\
         ic1-late,24:10:00,8892007,1\n\
         ic1-late,24:45:00,8813003,2\n",
    );
    write_feed(
        &root.path().join("stib"),
        "stop_id,stop_name,stop_lat,stop_lon\n\
         1234,Gare Centrale,50.8462,4.3571\n\
         5678,De Brouckere,50.8510,4.3525\n\
         8813003,Duplicate,0.0,0.0\n",
        "route_id,route_short_name,route_long_name,route_type\n\
         m1,1,Metro 1,METRO\n",
        "trip_id,route_id\n\
         m1-a,m1\n",
        "trip_id,departure_time,stop_id,stop_sequence\n\
         m1-a,08:40:00,1234,1\n\
         m1-a,08:44:00,5678,2\n\
         ghost,08:00:00,1234,1\n",
    );
    root
}

fn config_for(root: &Path) -> TransitModelConfig {
    TransitModelConfig {
        feed_dirs: discover_feed_dirs(root).unwrap(),
        network: NetworkConfig::default(),
    }
}

#[test]
fn discovers_operator_directories_in_order() {
    let root = two_operator_root();
    let dirs = discover_feed_dirs(root.path()).unwrap();
    assert_eq!(dirs, vec![root.path().join("sncb"), root.path().join("stib")]);

    let single = discover_feed_dirs(&root.path().join("stib")).unwrap();
    assert_eq!(single, vec![root.path().join("stib")]);
}

#[test]
fn empty_root_has_no_feeds() {
    let root = TempDir::new().unwrap();
    assert!(matches!(
        discover_feed_dirs(root.path()),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn loads_and_merges_operators() {
    let root = two_operator_root();
    let network = create_transit_network(&config_for(root.path())).unwrap();

    assert_eq!(network.stop_count(), 4);
    assert_eq!(network.route_count(), 2);
    assert_eq!(network.trip_count(), 3);
    assert_eq!(network.connection_count(), 3);
    assert_eq!(
        network.stop_by_id("8813003").unwrap().name,
        "Bruxelles-Central"
    );

    let central = network.stop_idx("8813003").unwrap();
    let gare = network.stop_idx("1234").unwrap();
    assert_eq!(network.walks_from(central).len(), 1);
    assert_eq!(network.walks_from(central)[0].target, gare);
}

#[test]
fn plans_across_operators_with_a_walk() {
    let root = two_operator_root();
    let network = create_transit_network(&config_for(root.path())).unwrap();

    let itinerary = network
        .find_path("gent-sint-pieters", "De Brouckere", "07;45", None)
        .unwrap()
        .unwrap();

    assert_eq!(itinerary.legs.len(), 3);
    assert!(matches!(itinerary.legs[1], JourneyLeg::Walk { .. }));
    assert_eq!(itinerary.arrival_time, 8 * 3600 + 44 * 60);
    assert_eq!(
        itinerary.to_string().lines().last(),
        Some("Take metro 1 from Gare Centrale (08:40:00) to De Brouckere (08:44:00)")
    );
}

#[test]
fn keeps_times_past_midnight() {
    let root = two_operator_root();
    let network = create_transit_network(&config_for(root.path())).unwrap();

    let itinerary = network
        .find_path("Gent-Sint-Pieters", "Bruxelles-Central", "24;00", None)
        .unwrap()
        .unwrap();
    assert_eq!(
        itinerary.to_string(),
        "Take train IC from Gent-Sint-Pieters (24:10:00) to Bruxelles-Central (24:45:00)"
    );
}

#[test]
fn rejects_missing_and_empty_feed_lists() {
    let missing = TransitModelConfig {
        feed_dirs: vec!["/definitely/not/here".into()],
        network: NetworkConfig::default(),
    };
    assert!(matches!(
        create_transit_network(&missing),
        Err(Error::IoError(_))
    ));
    assert!(matches!(
        create_transit_network(&TransitModelConfig::default()),
        Err(Error::InvalidConfig(_))
    ));
}
