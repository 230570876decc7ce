use super::edge::{EdgeData, EdgeId};
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a wire in the topology store.
    pub struct WireId;
}

/// An edge as used by a wire, possibly traversed end to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedEdge {
    pub edge: EdgeId,
    /// `true` when the wire runs from the edge's start to its end.
    pub forward: bool,
}

impl OrientedEdge {
    #[must_use]
    pub fn new(edge: EdgeId, forward: bool) -> Self {
        Self { edge, forward }
    }

    /// First and last vertex in traversal order.
    #[must_use]
    pub fn vertices(&self, data: &EdgeData) -> (VertexId, VertexId) {
        if self.forward {
            (data.start, data.end)
        } else {
            (data.end, data.start)
        }
    }

    /// Curve parameters at the first and last point in traversal order.
    #[must_use]
    pub fn parameter_range(&self, data: &EdgeData) -> (f64, f64) {
        if self.forward {
            (data.t_start, data.t_end)
        } else {
            (data.t_end, data.t_start)
        }
    }
}

/// A connected chain of oriented edges.
#[derive(Debug, Clone)]
pub struct WireData {
    pub edges: Vec<OrientedEdge>,
    /// Whether the last edge ends where the first one starts.
    pub is_closed: bool,
}

impl WireData {
    #[must_use]
    pub fn new(edges: Vec<OrientedEdge>, is_closed: bool) -> Self {
        Self { edges, is_closed }
    }
}
