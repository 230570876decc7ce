mod bspline;
mod circle;
mod ellipse;
mod line;

pub use bspline::BSplineCurve;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line::Line;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns whether `t` lies inside the domain (within [`TOLERANCE`]).
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t_min - TOLERANCE && t <= self.t_max + TOLERANCE
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the first derivative `dP/dt` at parameter `t`.
    ///
    /// Not normalized: its length is the parametric speed used for arc length.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn derivative(&self, t: f64) -> Result<Vector3>;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector3> {
        let d = self.derivative(t)?;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}

/// Checks that `t` lies inside `domain`.
pub(crate) fn check_parameter(domain: CurveDomain, t: f64) -> Result<()> {
    if domain.contains(t) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: domain.t_min,
            max: domain.t_max,
        }
        .into())
    }
}
