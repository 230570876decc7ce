use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::orthonormal_frame;
use crate::math::{Placement, Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A full circle in 3D space, parameterized on `[0, 2*pi)`.
///
/// `P(t) = center + radius * (cos(t) * x_dir + sin(t) * y_dir)`, where
/// `x_dir` is the zero-angle direction and `y_dir = normal x x_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point3,
    radius: f64,
    normal: Vector3,
    x_dir: Vector3,
    y_dir: Vector3,
}

impl Circle {
    /// Creates a circle around `center` in the plane normal to `normal`.
    ///
    /// `ref_dir` fixes where `t = 0` lies and must be perpendicular to
    /// `normal`. Neither vector needs to be unit length.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the frame vectors
    /// are zero-length or not perpendicular.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()).into());
        }
        let (normal, x_dir, y_dir) = orthonormal_frame(normal, ref_dir)?;
        Ok(Self {
            center,
            radius,
            normal,
            x_dir,
            y_dir,
        })
    }

    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Unit normal of the circle plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Unit direction of the point at `t = 0`.
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.x_dir
    }

    /// Returns this circle moved by a rigid placement.
    #[must_use]
    pub fn transformed(&self, placement: &Placement) -> Self {
        Self {
            center: placement * self.center,
            radius: self.radius,
            normal: placement * self.normal,
            x_dir: placement * self.x_dir,
            y_dir: placement * self.y_dir,
        }
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (sin, cos) = t.sin_cos();
        Ok(self.center + (self.x_dir * cos + self.y_dir * sin) * self.radius)
    }

    fn derivative(&self, t: f64) -> Result<Vector3> {
        let (sin, cos) = t.sin_cos();
        Ok((self.y_dir * cos - self.x_dir * sin) * self.radius)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
