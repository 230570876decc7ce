pub mod curve;
pub mod surface;

pub use curve::{BSplineCurve, Circle, Curve, CurveDomain, Ellipse, Line};
pub use surface::{Cylinder, Plane, Sphere, Surface, SurfaceDomain};

use crate::error::{GeometryError, Result};
use crate::math::{Vector3, TOLERANCE};

/// Normalizes an axis and a reference direction perpendicular to it.
///
/// Returns `(axis, ref_dir, axis x ref_dir)`.
pub(crate) fn orthonormal_frame(
    axis: Vector3,
    ref_dir: Vector3,
) -> Result<(Vector3, Vector3, Vector3)> {
    let axis = axis
        .try_normalize(TOLERANCE)
        .ok_or(GeometryError::ZeroVector)?;
    let ref_dir = ref_dir
        .try_normalize(TOLERANCE)
        .ok_or(GeometryError::ZeroVector)?;
    if axis.dot(&ref_dir).abs() > TOLERANCE {
        return Err(GeometryError::Degenerate(
            "reference direction must be perpendicular to axis".into(),
        )
        .into());
    }
    Ok((axis, ref_dir, axis.cross(&ref_dir)))
}
