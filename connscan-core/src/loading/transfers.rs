use log::info;
use rayon::prelude::*;

use crate::{
    StopIdx, Time,
    loading::NetworkConfig,
    model::{Stop, WalkEdge, WalkIndex},
    spatial::BallTree,
};

/// Calculate walking transfers between stops using the ball tree.
///
/// Returns a fresh index instead of touching the stops, so calling it twice
/// never duplicates edges.
pub fn calculate_transfers(stops: &[Stop], tree: &BallTree, config: &NetworkConfig) -> WalkIndex {
    info!(
        "Calculating walking transfers between {} stops (max {} m)",
        stops.len(),
        config.max_foot_distance
    );

    let per_stop: Vec<Vec<WalkEdge>> = stops
        .par_iter()
        .enumerate()
        .map(|(source_idx, source)| find_transfers_from_stop(tree, source_idx, source, config))
        .collect();

    WalkIndex::from_lists(per_stop)
}

/// Find all walking transfers leaving a single stop
fn find_transfers_from_stop(
    tree: &BallTree,
    source_idx: StopIdx,
    source: &Stop,
    config: &NetworkConfig,
) -> Vec<WalkEdge> {
    let mut edges: Vec<WalkEdge> = tree
        .range_with_distances(source.geometry, config.max_foot_distance)
        .into_iter()
        // Skip self-transfers
        .filter(|&(target, _)| target != source_idx)
        .map(|(target, distance)| WalkEdge {
            target,
            duration: walking_duration(distance, config.walking_speed),
        })
        .collect();

    edges.sort_unstable_by_key(|edge| (edge.duration, edge.target));
    edges
}

/// Whole seconds needed to walk `distance` meters, truncated
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn walking_duration(distance: f64, walking_speed: f64) -> Time {
    (distance / walking_speed) as Time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::haversine_distance;
    use proptest::prelude::*;

    fn tree_for(stops: &[Stop], leaf_capacity: usize) -> BallTree {
        BallTree::new(
            stops.iter().enumerate().map(|(idx, stop)| (idx, stop.geometry)),
            leaf_capacity,
        )
    }

    fn config(max_foot_distance: f64, walking_speed: f64) -> NetworkConfig {
        NetworkConfig {
            max_foot_distance,
            walking_speed,
            leaf_capacity: 2,
        }
    }

    #[test]
    fn close_stops_get_walks_both_ways() {
        // 100 m apart along a meridian, the third one ~11 km away
        let stops = vec![
            Stop::new("a", "Alpha", 50.0, 4.0),
            Stop::new("b", "Beta", 50.0 + 100.0 / 111_194.93, 4.0),
            Stop::new("c", "Gamma", 50.1, 4.0),
        ];
        let walks = calculate_transfers(&stops, &tree_for(&stops, 1), &config(500.0, 1.0));

        assert_eq!(walks.len(), 2);
        let from_a = walks.edges_from(0);
        assert_eq!(from_a.len(), 1);
        assert_eq!(from_a[0].target, 1);
        assert!((99..=100).contains(&from_a[0].duration));
        assert_eq!(walks.edges_from(1)[0].target, 0);
        assert!(walks.edges_from(2).is_empty());
    }

    #[test]
    fn duration_scales_with_speed() {
        let stops = vec![
            Stop::new("a", "Alpha", 50.0, 4.0),
            Stop::new("b", "Beta", 50.0 + 300.0 / 111_194.93, 4.0),
        ];
        let walks = calculate_transfers(&stops, &tree_for(&stops, 4), &config(500.0, 1.5));
        assert!((199..=200).contains(&walks.edges_from(0)[0].duration));
    }

    #[test]
    fn zero_distance_limit_only_links_coincident_stops() {
        let stops = vec![
            Stop::new("a", "Platform 1", 50.0, 4.0),
            Stop::new("b", "Platform 2", 50.0, 4.0),
            Stop::new("c", "Elsewhere", 50.001, 4.0),
        ];
        let walks = calculate_transfers(&stops, &tree_for(&stops, 1), &config(0.0, 1.0));
        assert_eq!(
            walks.edges_from(0),
            &[WalkEdge {
                target: 1,
                duration: 0
            }]
        );
        assert!(walks.edges_from(2).is_empty());
    }

    #[test]
    fn recomputing_does_not_accumulate() {
        let stops = vec![
            Stop::new("a", "Alpha", 50.0, 4.0),
            Stop::new("b", "Beta", 50.0005, 4.0),
        ];
        let tree = tree_for(&stops, 1);
        let first = calculate_transfers(&stops, &tree, &config(500.0, 1.0));
        let second = calculate_transfers(&stops, &tree, &config(500.0, 1.0));
        assert_eq!(first.len(), second.len());
    }

    proptest! {
        #[test]
        fn larger_radius_only_adds_edges(
            coords in prop::collection::vec((50.80..50.86f64, 4.30..4.40f64), 1..60),
            small in 0.0..600.0f64,
            extra in 0.0..600.0f64,
        ) {
            let stops: Vec<Stop> = coords
                .iter()
                .enumerate()
                .map(|(idx, (lat, lon))| Stop::new(format!("s{idx}"), "S", *lat, *lon))
                .collect();
            let tree = tree_for(&stops, 3);
            let narrow = calculate_transfers(&stops, &tree, &config(small, 1.0));
            let wide = calculate_transfers(&stops, &tree, &config(small + extra, 1.0));

            for stop in 0..stops.len() {
                let wide_edges = wide.edges_from(stop);
                for edge in narrow.edges_from(stop) {
                    prop_assert!(wide_edges.contains(edge));
                }
                for edge in wide_edges {
                    let distance = haversine_distance(stops[stop].geometry, stops[edge.target].geometry);
                    prop_assert!(distance <= small + extra);
                }
            }
        }
    }
}
