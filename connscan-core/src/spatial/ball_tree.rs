//! Ball tree over stop coordinates.
//!
//! Every internal node bounds its subtree with a ball (centroid + radius), so
//! a range query can drop a whole subtree when the query point is farther
//! than `radius + max_distance` from the centroid.

use geo::Point;

use super::haversine_distance;
use crate::StopIdx;

type NodeId = usize;

#[derive(Debug, Clone, Copy)]
struct Entry {
    stop: StopIdx,
    location: Point<f64>,
}

#[derive(Debug, Clone)]
enum Node {
    /// Members live in `BallTree::entries[start..end]`
    Leaf { start: usize, end: usize },
    Internal {
        /// Virtual center (mean lat/lon), not a real stop
        center: Point<f64>,
        /// Largest distance from `center` to any member of the subtree
        radius: f64,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
}

/// Spatial index answering "all stops within R meters of P".
///
/// Nodes are stored in an arena and refer to their children by index.
#[derive(Debug, Clone)]
pub struct BallTree {
    nodes: Vec<Node>,
    entries: Vec<Entry>,
    root: Option<NodeId>,
    leaf_capacity: usize,
}

impl BallTree {
    /// Builds the tree. A `leaf_capacity` of zero is treated as one.
    ///
    /// Members that cannot be separated by the two pivots (coincident
    /// coordinates) end up in a single leaf, which may then exceed
    /// `leaf_capacity`.
    pub fn new<I>(points: I, leaf_capacity: usize) -> Self
    where
        I: IntoIterator<Item = (StopIdx, Point<f64>)>,
    {
        let members: Vec<Entry> = points
            .into_iter()
            .map(|(stop, location)| Entry { stop, location })
            .collect();

        let mut tree = BallTree {
            nodes: Vec::new(),
            entries: Vec::with_capacity(members.len()),
            root: None,
            leaf_capacity: leaf_capacity.max(1),
        };
        tree.root = tree.build(members);
        tree
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn leaf_capacity(&self) -> usize {
        self.leaf_capacity
    }

    /// Number of levels, 0 for an empty tree
    pub fn depth(&self) -> usize {
        fn walk(tree: &BallTree, node: Option<NodeId>) -> usize {
            match node.map(|id| &tree.nodes[id]) {
                None => 0,
                Some(Node::Leaf { .. }) => 1,
                Some(Node::Internal { left, right, .. }) => {
                    1 + walk(tree, *left).max(walk(tree, *right))
                }
            }
        }
        walk(self, self.root)
    }

    /// All stops within `max_distance` meters of `query` (bound inclusive)
    pub fn range(&self, query: Point<f64>, max_distance: f64) -> Vec<StopIdx> {
        self.range_with_distances(query, max_distance)
            .into_iter()
            .map(|(stop, _)| stop)
            .collect()
    }

    /// Same as [`BallTree::range`], keeping the distance of every match
    pub fn range_with_distances(&self, query: Point<f64>, max_distance: f64) -> Vec<(StopIdx, f64)> {
        let mut found = Vec::new();
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(node_id) = pending.pop() {
            match &self.nodes[node_id] {
                Node::Leaf { start, end } => {
                    for entry in &self.entries[*start..*end] {
                        let distance = haversine_distance(query, entry.location);
                        if distance <= max_distance {
                            found.push((entry.stop, distance));
                        }
                    }
                }
                Node::Internal {
                    center,
                    radius,
                    left,
                    right,
                } => {
                    if haversine_distance(query, *center) - radius > max_distance {
                        continue;
                    }
                    pending.extend(right.iter().chain(left.iter()));
                }
            }
        }

        found
    }

    fn build(&mut self, members: Vec<Entry>) -> Option<NodeId> {
        if members.is_empty() {
            return None;
        }
        if members.len() <= self.leaf_capacity {
            return Some(self.push_leaf(members));
        }

        let (pivot_a, pivot_b) = farthest_pair(&members);
        let (left, right): (Vec<Entry>, Vec<Entry>) = members.iter().partition(|entry| {
            haversine_distance(pivot_a, entry.location) < haversine_distance(pivot_b, entry.location)
        });

        if left.is_empty() || right.is_empty() {
            return Some(self.push_leaf(members));
        }

        let center = centroid(&members);
        let radius = members
            .iter()
            .map(|entry| haversine_distance(center, entry.location))
            .fold(0.0_f64, f64::max);

        let left = self.build(left);
        let right = self.build(right);
        self.nodes.push(Node::Internal {
            center,
            radius,
            left,
            right,
        });
        Some(self.nodes.len() - 1)
    }

    fn push_leaf(&mut self, members: Vec<Entry>) -> NodeId {
        let start = self.entries.len();
        self.entries.extend(members);
        self.nodes.push(Node::Leaf {
            start,
            end: self.entries.len(),
        });
        self.nodes.len() - 1
    }
}

/// Two-pass farthest point heuristic: the member farthest from the first one,
/// then the member farthest from that.
fn farthest_pair(members: &[Entry]) -> (Point<f64>, Point<f64>) {
    let farthest_from = |origin: Point<f64>| {
        members
            .iter()
            .fold((origin, 0.0_f64), |(best, best_distance), entry| {
                let distance = haversine_distance(origin, entry.location);
                if distance > best_distance {
                    (entry.location, distance)
                } else {
                    (best, best_distance)
                }
            })
            .0
    };

    let pivot_a = farthest_from(members[0].location);
    let pivot_b = farthest_from(pivot_a);
    (pivot_a, pivot_b)
}

#[allow(clippy::cast_precision_loss)]
fn centroid(members: &[Entry]) -> Point<f64> {
    let count = members.len() as f64;
    let (sum_lon, sum_lat) = members.iter().fold((0.0, 0.0), |(lon, lat), entry| {
        (lon + entry.location.x(), lat + entry.location.y())
    });
    Point::new(sum_lon / count, sum_lat / count)
}
