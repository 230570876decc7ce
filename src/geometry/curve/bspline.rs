use crate::error::{GeometryError, Result};
use crate::math::{Placement, Point3, Vector3, TOLERANCE};

use super::{check_parameter, Curve, CurveDomain};

/// A non-rational B-spline curve in 3D space.
///
/// Evaluated with de Boor's algorithm. The derivative is evaluated on the
/// hodograph (the degree `p - 1` B-spline of scaled control point deltas).
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineCurve {
    degree: usize,
    control_points: Vec<Point3>,
    knots: Vec<f64>,
}

impl BSplineCurve {
    /// Creates a B-spline from its degree, control points and full knot vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the degree is zero, there are fewer than
    /// `degree + 1` control points, the knot vector length is not
    /// `control_points + degree + 1`, or the knots decrease.
    pub fn new(degree: usize, control_points: Vec<Point3>, knots: Vec<f64>) -> Result<Self> {
        if degree == 0 {
            return Err(GeometryError::Degenerate("B-spline degree must be positive".into()).into());
        }
        if control_points.len() < degree + 1 {
            return Err(GeometryError::Degenerate(format!(
                "degree {degree} B-spline needs at least {} control points",
                degree + 1
            ))
            .into());
        }
        if knots.len() != control_points.len() + degree + 1 {
            return Err(GeometryError::Degenerate(format!(
                "expected {} knots, got {}",
                control_points.len() + degree + 1,
                knots.len()
            ))
            .into());
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(GeometryError::Degenerate("knots must be non-decreasing".into()).into());
        }
        if knots[control_points.len()] - knots[degree] < TOLERANCE {
            return Err(GeometryError::Degenerate("B-spline domain is empty".into()).into());
        }

        Ok(Self {
            degree,
            control_points,
            knots,
        })
    }

    /// Creates a clamped B-spline with uniform interior knots on `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`BSplineCurve::new`].
    pub fn clamped(degree: usize, control_points: Vec<Point3>) -> Result<Self> {
        let n = control_points.len();
        if n < degree + 1 {
            return Err(GeometryError::Degenerate(format!(
                "degree {degree} B-spline needs at least {} control points",
                degree + 1
            ))
            .into());
        }
        let interior = n - degree - 1;
        let mut knots = Vec::with_capacity(n + degree + 1);
        knots.extend(std::iter::repeat(0.0).take(degree + 1));
        for i in 1..=interior {
            #[allow(clippy::cast_precision_loss)]
            knots.push(i as f64 / (interior + 1) as f64);
        }
        knots.extend(std::iter::repeat(1.0).take(degree + 1));
        Self::new(degree, control_points, knots)
    }

    /// Returns the polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Returns this curve moved by a rigid placement.
    #[must_use]
    pub fn transformed(&self, placement: &Placement) -> Self {
        Self {
            degree: self.degree,
            control_points: self.control_points.iter().map(|p| placement * p).collect(),
            knots: self.knots.clone(),
        }
    }
}

impl Curve for BSplineCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        check_parameter(self.domain(), t)?;
        let coords: Vec<Vector3> = self.control_points.iter().map(|p| p.coords).collect();
        Ok(Point3::from(de_boor(self.degree, &self.knots, &coords, t)))
    }

    fn derivative(&self, t: f64) -> Result<Vector3> {
        check_parameter(self.domain(), t)?;
        let p = self.degree;
        #[allow(clippy::cast_precision_loss)]
        let scale = p as f64;
        let hodograph: Vec<Vector3> = self
            .control_points
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let span = self.knots[i + p + 1] - self.knots[i + 1];
                if span < TOLERANCE {
                    Vector3::zeros()
                } else {
                    (w[1] - w[0]) * (scale / span)
                }
            })
            .collect();
        let knots = &self.knots[1..self.knots.len() - 1];
        Ok(de_boor(p - 1, knots, &hodograph, t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(
            self.knots[self.degree],
            self.knots[self.control_points.len()],
        )
    }

    fn is_closed(&self) -> bool {
        match (self.control_points.first(), self.control_points.last()) {
            (Some(first), Some(last)) => (last - first).norm() < TOLERANCE,
            _ => false,
        }
    }
}

/// Finds the knot span index `k` with `knots[k] <= t < knots[k + 1]`.
fn find_span(degree: usize, knots: &[f64], count: usize, t: f64) -> usize {
    let n = count - 1;
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }
    let (mut low, mut high) = (degree, n + 1);
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Evaluates a B-spline given as coordinate vectors with de Boor's algorithm.
fn de_boor(degree: usize, knots: &[f64], control: &[Vector3], t: f64) -> Vector3 {
    let k = find_span(degree, knots, control.len(), t);
    let mut d: Vec<Vector3> = (0..=degree).map(|j| control[j + k - degree]).collect();
    for r in 1..=degree {
        for j in (r..=degree).rev() {
            let left = knots[j + k - degree];
            let right = knots[j + 1 + k - r];
            let denom = right - left;
            let alpha = if denom.abs() < TOLERANCE {
                0.0
            } else {
                (t - left) / denom
            };
            d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
        }
    }
    d[degree]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn linear_bspline_is_a_segment() {
        let c = BSplineCurve::clamped(1, vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0)]).unwrap();
        let mid = c.evaluate(0.5).unwrap();
        assert!((mid - p(2.0, 0.0, 0.0)).norm() < 1e-12);
        let d = c.derivative(0.3).unwrap();
        assert!((d - Vector3::new(4.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn quadratic_bezier_midpoint() {
        let c = BSplineCurve::clamped(
            2,
            vec![p(0.0, 0.0, 0.0), p(1.0, 2.0, 0.0), p(2.0, 0.0, 0.0)],
        )
        .unwrap();
        // Bezier midpoint: 0.25 * P0 + 0.5 * P1 + 0.25 * P2
        let mid = c.evaluate(0.5).unwrap();
        assert!((mid - p(1.0, 1.0, 0.0)).norm() < 1e-12);
        // Tangent at the middle is horizontal
        let d = c.derivative(0.5).unwrap();
        assert!(d.y.abs() < 1e-12);
        assert!((d.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn endpoints_are_interpolated() {
        let c = BSplineCurve::clamped(
            3,
            vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(2.0, -1.0, 0.0),
                p(3.0, 1.0, 0.0),
                p(4.0, 0.0, 1.0),
            ],
        )
        .unwrap();
        assert!((c.evaluate(0.0).unwrap() - p(0.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((c.evaluate(1.0).unwrap() - p(4.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn out_of_domain_is_rejected() {
        let c = BSplineCurve::clamped(1, vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]).unwrap();
        assert!(c.evaluate(1.5).is_err());
    }

    #[test]
    fn wrong_knot_count_is_rejected() {
        let r = BSplineCurve::new(1, vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], vec![0.0, 1.0]);
        assert!(r.is_err());
    }
}
