use crate::error::{Result, TopologyError};
use crate::geometry::curve::Line;
use crate::math::{Point3, TOLERANCE};
use crate::topology::{
    EdgeCurve, EdgeData, OrientedEdge, TopologyStore, VertexData, VertexId, WireData, WireId,
};

enum WireSource {
    Points { points: Vec<Point3>, close: bool },
    Edges(Vec<OrientedEdge>),
}

/// Creates a wire, either as a polyline through points or from existing edges.
pub struct MakeWire {
    source: WireSource,
}

impl MakeWire {
    /// Creates a polyline wire through `points`, closed back to the first
    /// point when `close` is set.
    #[must_use]
    pub fn new(points: Vec<Point3>, close: bool) -> Self {
        Self {
            source: WireSource::Points { points, close },
        }
    }

    /// Creates a wire from a chain of oriented edges.
    ///
    /// The wire is closed when the chain ends where it starts.
    #[must_use]
    pub fn from_edges(edges: Vec<OrientedEdge>) -> Self {
        Self {
            source: WireSource::Edges(edges),
        }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are given, two consecutive
    /// points coincide, or the edges do not form a connected chain.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        match &self.source {
            WireSource::Points { points, close } => polyline(store, points, *close),
            WireSource::Edges(edges) => chain(store, edges.clone()),
        }
    }
}

fn polyline(store: &mut TopologyStore, points: &[Point3], close: bool) -> Result<WireId> {
    if points.len() < 2 {
        return Err(TopologyError::InvalidTopology("a wire needs at least two points".into()).into());
    }

    let vertices: Vec<VertexId> = points
        .iter()
        .map(|p| store.add_vertex(VertexData::new(*p)))
        .collect();

    let mut pairs: Vec<(usize, usize)> = (0..points.len() - 1).map(|i| (i, i + 1)).collect();
    if close {
        pairs.push((points.len() - 1, 0));
    }

    let mut edges = Vec::with_capacity(pairs.len());
    for (i, j) in pairs {
        let line = Line::new(points[i], points[j] - points[i])?;
        let edge = store.add_edge(EdgeData {
            start: vertices[i],
            end: vertices[j],
            curve: EdgeCurve::Line(line),
            t_start: 0.0,
            t_end: (points[j] - points[i]).norm(),
        });
        edges.push(OrientedEdge::new(edge, true));
    }

    Ok(store.add_wire(WireData::new(edges, close)))
}

fn chain(store: &mut TopologyStore, edges: Vec<OrientedEdge>) -> Result<WireId> {
    if edges.is_empty() {
        return Err(TopologyError::InvalidTopology("a wire needs at least one edge".into()).into());
    }

    let mut ends = Vec::with_capacity(edges.len());
    for oe in &edges {
        let edge = store.edge(oe.edge)?;
        let (first, last) = oe.vertices(edge);
        ends.push((store.vertex(first)?.point, store.vertex(last)?.point));
    }

    for (i, pair) in ends.windows(2).enumerate() {
        if (pair[0].1 - pair[1].0).norm() > TOLERANCE {
            return Err(TopologyError::InvalidTopology(format!(
                "edge {} does not start where edge {i} ends",
                i + 1
            ))
            .into());
        }
    }

    let is_closed = match (ends.first(), ends.last()) {
        (Some(first), Some(last)) => (last.1 - first.0).norm() < TOLERANCE,
        _ => false,
    };

    Ok(store.add_wire(WireData::new(edges, is_closed)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Circle;
    use crate::operations::creation::MakeEdge;
    use crate::math::Vector3;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn closed_polyline_shares_vertices() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)], true)
            .execute(&mut store)
            .unwrap();
        let data = store.wire(wire).unwrap();
        assert!(data.is_closed);
        assert_eq!(data.edges.len(), 3);
        let first = store.edge(data.edges[0].edge).unwrap();
        let last = store.edge(data.edges[2].edge).unwrap();
        assert_eq!(last.end, first.start);
    }

    #[test]
    fn open_polyline() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)], false)
            .execute(&mut store)
            .unwrap();
        let data = store.wire(wire).unwrap();
        assert!(!data.is_closed);
        assert_eq!(data.edges.len(), 2);
    }

    #[test]
    fn single_point_fails() {
        let mut store = TopologyStore::new();
        assert!(MakeWire::new(vec![p(0.0, 0.0)], false).execute(&mut store).is_err());
    }

    #[test]
    fn chain_of_arcs_closes() {
        let mut store = TopologyStore::new();
        let circle = Circle::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap();
        let upper = MakeEdge::arc(circle.clone(), 0.0, PI).execute(&mut store).unwrap();
        let lower = MakeEdge::arc(circle, PI, 2.0 * PI).execute(&mut store).unwrap();
        let wire = MakeWire::from_edges(vec![
            OrientedEdge::new(upper, true),
            OrientedEdge::new(lower, true),
        ])
        .execute(&mut store)
        .unwrap();
        assert!(store.wire(wire).unwrap().is_closed);
    }

    #[test]
    fn disconnected_chain_fails() {
        let mut store = TopologyStore::new();
        let a = MakeEdge::segment(p(0.0, 0.0), p(1.0, 0.0)).execute(&mut store).unwrap();
        let b = MakeEdge::segment(p(5.0, 0.0), p(6.0, 0.0)).execute(&mut store).unwrap();
        let result = MakeWire::from_edges(vec![OrientedEdge::new(a, true), OrientedEdge::new(b, true)])
            .execute(&mut store);
        assert!(result.is_err());
    }
}
