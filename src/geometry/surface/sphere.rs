use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{GeometryError, Result};
use crate::geometry::orthonormal_frame;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// A sphere parameterized by longitude `u` in `[0, 2pi]` and latitude `v`
/// in `[-pi/2, pi/2]`, with the poles on `axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
    binormal: Vector3,
}

impl Sphere {
    /// Creates a sphere; `ref_dir` marks longitude zero on the equator.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive, a direction is
    /// zero-length, or `ref_dir` is not perpendicular to `axis`.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("sphere radius must be positive".into()).into(),
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

    /// Unit vector from the center towards `(u, v)`.
    fn direction(&self, u: f64, v: f64) -> Vector3 {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        (self.ref_dir * cu + self.binormal * su) * cv + self.axis * sv
    }
}

impl Surface for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.center + self.direction(u, v) * self.radius)
    }

    fn partial_derivatives(&self, u: f64, v: f64) -> Result<(Vector3, Vector3)> {
        let r = self.radius;
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        let du = (self.binormal * cu - self.ref_dir * su) * (r * cv);
        let dv = (self.ref_dir * cu + self.binormal * su) * (-r * sv) + self.axis * (r * cv);
        Ok((du, dv))
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        Ok(self.direction(u, v))
    }

    fn area_element(&self, _u: f64, v: f64) -> Result<f64> {
        Ok(self.radius * self.radius * v.cos().abs())
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2)
    }
}
