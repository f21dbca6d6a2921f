use crate::{StopIdx, model::WalkEdge};

/// Outgoing walking edges of every stop, stored contiguously.
///
/// Built once by the transfer builder and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct WalkIndex {
    /// `offsets[s]..offsets[s + 1]` is the edge range of stop `s`
    offsets: Vec<usize>,
    edges: Vec<WalkEdge>,
}

impl WalkIndex {
    /// Flattens per-stop edge lists; `per_stop[s]` holds the edges of stop `s`
    pub fn from_lists(per_stop: Vec<Vec<WalkEdge>>) -> Self {
        let mut offsets = Vec::with_capacity(per_stop.len() + 1);
        let mut edges = Vec::with_capacity(per_stop.iter().map(Vec::len).sum());

        offsets.push(0);
        for list in per_stop {
            edges.extend(list);
            offsets.push(edges.len());
        }

        Self { offsets, edges }
    }

    /// Edges leaving `stop`, empty for unknown stops
    pub fn edges_from(&self, stop: StopIdx) -> &[WalkEdge] {
        match (self.offsets.get(stop), self.offsets.get(stop + 1)) {
            (Some(&start), Some(&end)) => &self.edges[start..end],
            _ => &[],
        }
    }

    /// Total number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn stop_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }
}
