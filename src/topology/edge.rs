use crate::geometry::curve::{BSplineCurve, Circle, Curve, Ellipse, Line};

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// The geometric curve associated with an edge.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeCurve {
    /// A straight line, parameterized by arc length.
    Line(Line),
    /// A circle; arcs are expressed by the edge parameter range.
    Circle(Circle),
    /// An ellipse; arcs are expressed by the edge parameter range.
    Ellipse(Ellipse),
    /// A free-form B-spline curve.
    BSpline(BSplineCurve),
}

impl EdgeCurve {
    /// Returns the curve as a trait object for generic evaluation.
    #[must_use]
    pub fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Line(c) => c,
            Self::Circle(c) => c,
            Self::Ellipse(c) => c,
            Self::BSpline(c) => c,
        }
    }

    /// Returns a short name of the curve type, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Circle(_) => "circle",
            Self::Ellipse(_) => "ellipse",
            Self::BSpline(_) => "B-spline",
        }
    }
}

/// Data associated with a topological edge.
///
/// An edge connects two vertices and carries a geometric curve
/// that defines the shape of the edge between them.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// The geometric curve defining this edge's shape.
    pub curve: EdgeCurve,
    /// Parameter on the curve corresponding to the start vertex.
    pub t_start: f64,
    /// Parameter on the curve corresponding to the end vertex.
    pub t_end: f64,
}
