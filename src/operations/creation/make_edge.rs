use crate::error::{OperationError, Result};
use crate::geometry::curve::{BSplineCurve, Circle, Ellipse, Line};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{EdgeCurve, EdgeData, EdgeId, TopologyStore, VertexData};

enum EdgeSpec {
    Segment(Point3, Point3),
    Curve {
        curve: EdgeCurve,
        range: Option<(f64, f64)>,
    },
}

/// Creates an edge, with its end vertices, from a curve.
pub struct MakeEdge {
    spec: EdgeSpec,
}

impl MakeEdge {
    /// A straight segment between two points.
    #[must_use]
    pub fn segment(start: Point3, end: Point3) -> Self {
        Self {
            spec: EdgeSpec::Segment(start, end),
        }
    }

    /// A full circle.
    #[must_use]
    pub fn circle(circle: Circle) -> Self {
        Self::curve(EdgeCurve::Circle(circle), None)
    }

    /// A circular arc over the angle range `[t_start, t_end]`.
    #[must_use]
    pub fn arc(circle: Circle, t_start: f64, t_end: f64) -> Self {
        Self::curve(EdgeCurve::Circle(circle), Some((t_start, t_end)))
    }

    /// A full ellipse.
    #[must_use]
    pub fn ellipse(ellipse: Ellipse) -> Self {
        Self::curve(EdgeCurve::Ellipse(ellipse), None)
    }

    /// An elliptical arc over the angle range `[t_start, t_end]`.
    #[must_use]
    pub fn elliptic_arc(ellipse: Ellipse, t_start: f64, t_end: f64) -> Self {
        Self::curve(EdgeCurve::Ellipse(ellipse), Some((t_start, t_end)))
    }

    /// A B-spline over its whole domain.
    #[must_use]
    pub fn bspline(curve: BSplineCurve) -> Self {
        Self::curve(EdgeCurve::BSpline(curve), None)
    }

    fn curve(curve: EdgeCurve, range: Option<(f64, f64)>) -> Self {
        Self {
            spec: EdgeSpec::Curve { curve, range },
        }
    }

    /// Executes the operation, creating the edge in the topology store.
    ///
    /// Closed curves used over their whole range get a single vertex shared
    /// by both ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is degenerate or the parameter range
    /// is empty or leaves the curve domain.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<EdgeId> {
        let (curve, t_start, t_end) = match &self.spec {
            EdgeSpec::Segment(start, end) => {
                let length = (end - start).norm();
                let line = Line::new(*start, end - start)?;
                (EdgeCurve::Line(line), 0.0, length)
            }
            EdgeSpec::Curve { curve, range } => {
                let domain = curve.as_curve().domain();
                let (t_start, t_end) = range.unwrap_or((domain.t_min, domain.t_max));
                if !domain.contains(t_start) || !domain.contains(t_end) {
                    return Err(OperationError::InvalidInput(format!(
                        "edge range [{t_start}, {t_end}] leaves the curve domain [{}, {}]",
                        domain.t_min, domain.t_max
                    ))
                    .into());
                }
                (curve.clone(), t_start, t_end)
            }
        };
        if t_end - t_start < TOLERANCE {
            return Err(OperationError::InvalidInput("edge parameter range is empty".into()).into());
        }

        let start_point = curve.as_curve().evaluate(t_start)?;
        let end_point = curve.as_curve().evaluate(t_end)?;
        let start = store.add_vertex(VertexData::new(start_point));
        let end = if (end_point - start_point).norm() < TOLERANCE {
            start
        } else {
            store.add_vertex(VertexData::new(end_point))
        };

        Ok(store.add_edge(EdgeData {
            start,
            end,
            curve,
            t_start,
            t_end,
        }))
    }
}
