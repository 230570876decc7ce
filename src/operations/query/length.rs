use crate::error::Result;
use crate::math::quadrature::adaptive_simpson;
use crate::topology::{EdgeCurve, EdgeId, TopologyStore};

/// Absolute integration tolerance used for arc length.
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 1e-6;

/// Computes the length of a curve (edge).
pub struct Length {
    edge: EdgeId,
    tolerance: f64,
}

impl Length {
    /// Creates a new `Length` query.
    #[must_use]
    pub fn new(edge: EdgeId) -> Self {
        Self {
            edge,
            tolerance: DEFAULT_LENGTH_TOLERANCE,
        }
    }

    /// Sets the absolute integration tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query, returning the curve length.
    ///
    /// Lines and circles have closed forms. Other curves integrate the
    /// parametric speed `|C'(t)|` over the edge range.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found or the integration fails.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let edge = store.edge(self.edge)?;
        match &edge.curve {
            // Line is parameterized by arc length
            EdgeCurve::Line(_) => Ok((edge.t_end - edge.t_start).abs()),
            EdgeCurve::Circle(circle) => Ok(circle.radius() * (edge.t_end - edge.t_start).abs()),
            curve @ (EdgeCurve::Ellipse(_) | EdgeCurve::BSpline(_)) => {
                let curve = curve.as_curve();
                let length = adaptive_simpson(
                    |t| Ok(curve.derivative(t)?.norm()),
                    edge.t_start,
                    edge.t_end,
                    self.tolerance,
                )?;
                Ok(length.abs())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{BSplineCurve, Circle, Ellipse};
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::{MakeEdge, MakeWire};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn line_length_3_4_5() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();
        let edge_id = store.wire(wire).unwrap().edges[0].edge;

        let len = Length::new(edge_id).execute(&store).unwrap();
        assert_abs_diff_eq!(len, 5.0, epsilon = 1e-10);
    }

    #[test]
    fn half_circle_length() {
        let mut store = TopologyStore::new();
        let circle = Circle::new(Point3::origin(), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let edge = MakeEdge::arc(circle, 0.0, PI).execute(&mut store).unwrap();
        let len = Length::new(edge).execute(&store).unwrap();
        assert_abs_diff_eq!(len, 2.0 * PI, epsilon = 1e-10);
    }

    #[test]
    fn circular_ellipse_matches_circumference() {
        let mut store = TopologyStore::new();
        let ellipse =
            Ellipse::new(Point3::origin(), 3.0, 3.0, Vector3::z(), Vector3::x()).unwrap();
        let edge = MakeEdge::ellipse(ellipse).execute(&mut store).unwrap();
        let len = Length::new(edge).execute(&store).unwrap();
        assert_abs_diff_eq!(len, 6.0 * PI, epsilon = 1e-6);
    }

    #[test]
    fn ellipse_perimeter() {
        let mut store = TopologyStore::new();
        let ellipse =
            Ellipse::new(Point3::origin(), 2.0, 1.0, Vector3::z(), Vector3::x()).unwrap();
        let edge = MakeEdge::ellipse(ellipse).execute(&mut store).unwrap();
        let len = Length::new(edge).execute(&store).unwrap();
        // Reference value of the complete elliptic integral, 4 * a * E(e)
        assert_abs_diff_eq!(len, 9.688_448_220_547_675, epsilon = 1e-5);
    }

    #[test]
    fn straight_bspline_length() {
        let mut store = TopologyStore::new();
        let spline = BSplineCurve::clamped(
            2,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
            ],
        )
        .unwrap();
        let edge = MakeEdge::bspline(spline).execute(&mut store).unwrap();
        let len = Length::new(edge).execute(&store).unwrap();
        assert_abs_diff_eq!(len, 4.0, epsilon = 1e-6);
    }
}
