mod cylinder;
mod plane;
mod sphere;

pub use cylinder::Cylinder;
pub use plane::Plane;
pub use sphere::Sphere;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// Returns whether all four bounds are finite.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.u_min.is_finite()
            && self.u_max.is_finite()
            && self.v_min.is_finite()
            && self.v_max.is_finite()
    }
}

/// Trait for parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or evaluation fails.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3>;

    /// Computes the partial derivatives `(dP/du, dP/dv)` at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range.
    fn partial_derivatives(&self, u: f64, v: f64) -> Result<(Vector3, Vector3)>;

    /// Computes the unit surface normal at parameters `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or the normal is degenerate.
    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        let (du, dv) = self.partial_derivatives(u, v)?;
        let n = du.cross(&dv);
        let len = n.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(n / len)
    }

    /// Area of the surface patch spanned by unit parameter steps at `(u, v)`,
    /// i.e. `|dP/du x dP/dv|`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range.
    fn area_element(&self, u: f64, v: f64) -> Result<f64> {
        let (du, dv) = self.partial_derivatives(u, v)?;
        Ok(du.cross(&dv).norm())
    }

    /// Returns the parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;
}
