use crate::error::{GeometryError, Result};
use crate::geometry::orthonormal_frame;
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// An unbounded plane with an orthonormal `(u_dir, v_dir, normal)` frame.
///
/// `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane spanned by two directions.
    ///
    /// `u_dir` is kept; `v_dir` only picks the side of the normal and is
    /// re-orthogonalized against `u_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a direction is zero-length or both are parallel.
    pub fn new(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self> {
        let normal = u_dir.cross(&v_dir);
        if normal.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("plane directions are parallel".into()).into());
        }
        let (normal, u_dir, v_dir) = orthonormal_frame(normal, u_dir)?;
        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Creates a plane through `origin` facing `normal`, with an arbitrary
    /// in-plane frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let normal = normal
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        let helper = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let (normal, u_dir, v_dir) = orthonormal_frame(normal, normal.cross(&helper))?;
        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Unit normal, `u_dir x v_dir`.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Point at plane coordinates `(u, v)`.
    #[must_use]
    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin + self.u_dir * u + self.v_dir * v
    }

    /// Plane coordinates `(u, v)` of the orthogonal projection of `p`.
    #[must_use]
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(&self.u_dir), d.dot(&self.v_dir))
    }

    /// Signed distance of `p` along the normal.
    #[must_use]
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(&self.normal)
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.point_at(u, v))
    }

    fn partial_derivatives(&self, _u: f64, _v: f64) -> Result<(Vector3, Vector3)> {
        Ok((self.u_dir, self.v_dir))
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.normal)
    }

    fn area_element(&self, _u: f64, _v: f64) -> Result<f64> {
        Ok(1.0)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY)
    }
}
