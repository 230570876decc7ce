use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::orthonormal_frame;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// A circular cylinder, infinite along its axis.
///
/// `P(u, v) = center + radius * (cos(u) * ref_dir + sin(u) * binormal) + v * axis`,
/// so `u` is the angle around the axis and `v` the height along it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
    binormal: Vector3,
}

impl Cylinder {
    /// Creates a cylinder around the line through `center` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive, a direction is
    /// zero-length, or `ref_dir` is not perpendicular to `axis`.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("cylinder radius must be positive".into()).into(),
            );
        }
        let (axis, ref_dir, binormal) = orthonormal_frame(axis, ref_dir)?;
        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
            binormal,
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

    /// Returns the unit axis direction.
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    fn radial(&self, u: f64) -> Vector3 {
        let (su, cu) = u.sin_cos();
        self.ref_dir * cu + self.binormal * su
    }
}

impl Surface for Cylinder {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.center + self.radial(u) * self.radius + self.axis * v)
    }

    fn partial_derivatives(&self, u: f64, _v: f64) -> Result<(Vector3, Vector3)> {
        let (su, cu) = u.sin_cos();
        let du = (self.binormal * cu - self.ref_dir * su) * self.radius;
        Ok((du, self.axis))
    }

    fn normal(&self, u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.radial(u))
    }

    fn area_element(&self, _u: f64, _v: f64) -> Result<f64> {
        Ok(self.radius)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, f64::NEG_INFINITY, f64::INFINITY)
    }
}
