use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::orthonormal_frame;
use crate::math::{Placement, Point3, Vector3, TOLERANCE};

use super::{Circle, Curve, CurveDomain};

/// A full ellipse in 3D space, parameterized on `[0, 2*pi)`.
///
/// `P(t) = center + a * cos(t) * major_dir + b * sin(t) * minor_dir` with
/// `minor_dir = normal x major_dir`. Arcs are edges using a sub-range.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    center: Point3,
    semi_major: f64,
    semi_minor: f64,
    normal: Vector3,
    major_dir: Vector3,
    minor_dir: Vector3,
}

impl Ellipse {
    /// Creates an ellipse with radii `semi_major >= semi_minor > 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the radii are out of order or not positive, or
    /// if `normal` and `major_dir` do not form a valid frame.
    pub fn new(
        center: Point3,
        semi_major: f64,
        semi_minor: f64,
        normal: Vector3,
        major_dir: Vector3,
    ) -> Result<Self> {
        if semi_minor < TOLERANCE || semi_major < semi_minor - TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "ellipse radii must satisfy a >= b > 0, got a = {semi_major}, b = {semi_minor}"
            ))
            .into());
        }
        let (normal, major_dir, minor_dir) = orthonormal_frame(normal, major_dir)?;
        Ok(Self {
            center,
            semi_major,
            semi_minor,
            normal,
            major_dir,
            minor_dir,
        })
    }

    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    #[must_use]
    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    #[must_use]
    pub fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Returns whether both radii agree within `tolerance`.
    #[must_use]
    pub fn is_circular(&self, tolerance: f64) -> bool {
        (self.semi_major - self.semi_minor).abs() < tolerance
    }

    /// Returns the circle in this ellipse's frame with the minor radius.
    ///
    /// Both curves share their parameterization, so edge ranges carry over.
    ///
    /// # Errors
    ///
    /// Returns an error if the circle cannot be built from the frame.
    pub fn to_circle(&self) -> Result<Circle> {
        Circle::new(self.center, self.semi_minor, self.normal, self.major_dir)
    }

    /// Returns this ellipse moved by a rigid placement.
    #[must_use]
    pub fn transformed(&self, placement: &Placement) -> Self {
        Self {
            center: placement * self.center,
            semi_major: self.semi_major,
            semi_minor: self.semi_minor,
            normal: placement * self.normal,
            major_dir: placement * self.major_dir,
            minor_dir: placement * self.minor_dir,
        }
    }
}

impl Curve for Ellipse {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (sin, cos) = t.sin_cos();
        Ok(self.center
            + self.major_dir * (self.semi_major * cos)
            + self.minor_dir * (self.semi_minor * sin))
    }

    fn derivative(&self, t: f64) -> Result<Vector3> {
        let (sin, cos) = t.sin_cos();
        Ok(self.minor_dir * (self.semi_minor * cos) - self.major_dir * (self.semi_major * sin))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::CONFUSION;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn flat(a: f64, b: f64) -> Ellipse {
        Ellipse::new(Point3::origin(), a, b, Vector3::z(), Vector3::x()).unwrap()
    }

    #[test]
    fn vertices_lie_on_both_axes() {
        let e = flat(3.0, 2.0);
        let major = e.evaluate(0.0).unwrap();
        let minor = e.evaluate(FRAC_PI_2).unwrap();
        assert_abs_diff_eq!((major - Point3::new(3.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!((minor - Point3::new(0.0, 2.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn speed_at_major_vertex_is_minor_radius() {
        let d = flat(3.0, 2.0).derivative(0.0).unwrap();
        assert_abs_diff_eq!((d - Vector3::new(0.0, 2.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn equal_radii_recover_the_same_circle() {
        let e = flat(2.0, 2.0);
        assert!(e.is_circular(CONFUSION));
        let c = e.to_circle().unwrap();
        assert_abs_diff_eq!(c.radius(), 2.0);
        for t in [0.0, 0.7, 2.9] {
            let gap = e.evaluate(t).unwrap() - c.evaluate(t).unwrap();
            assert_abs_diff_eq!(gap.norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn circularity_uses_the_given_tolerance() {
        assert!(!flat(3.0, 2.0).is_circular(CONFUSION));
        assert!(!flat(2.0 + 1e-6, 2.0).is_circular(CONFUSION));
        assert!(flat(2.0 + 1e-9, 2.0).is_circular(CONFUSION));
    }

    #[test]
    fn placement_carries_the_minor_axis() {
        let placement = Placement::new(Vector3::new(1.0, 0.0, 0.0), Vector3::z() * FRAC_PI_2);
        let e = flat(3.0, 2.0).transformed(&placement);
        let p = e.evaluate(FRAC_PI_2).unwrap();
        assert_abs_diff_eq!((p - Point3::new(-1.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_radii() {
        assert!(Ellipse::new(Point3::origin(), 1.0, 0.0, Vector3::z(), Vector3::x()).is_err());
        assert!(Ellipse::new(Point3::origin(), 1.0, 2.0, Vector3::z(), Vector3::x()).is_err());
    }
}
