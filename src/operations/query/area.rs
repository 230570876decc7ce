use crate::error::{OperationError, Result};
use crate::math::quadrature::{adaptive_simpson, gauss_legendre_2d};
use crate::math::{Point3, Vector3};
use crate::topology::{EdgeCurve, FaceBounds, FaceId, FaceSurface, TopologyStore, WireId};

/// Absolute integration tolerance for curved boundary edges.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Gauss-Legendre cells per parameter direction for patch faces.
const PATCH_CELLS: u32 = 8;

/// Computes the area of a face.
pub struct Area {
    face: FaceId,
}

impl Area {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query, returning the face area.
    ///
    /// Loop-bounded planar faces use the boundary integral
    /// `1/2 * loop integral of n . (P x P') dt`; hole areas are subtracted
    /// whatever their orientation. Patch faces integrate `|Su x Sv|` over
    /// the parameter rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing, a loop-bounded face is not
    /// planar, or an integration fails.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let face = store.face(self.face)?;
        match (&face.bounds, &face.surface) {
            (FaceBounds::Loops { outer, inner }, FaceSurface::Plane(plane)) => {
                let origin = *plane.origin();
                let normal = *plane.plane_normal();
                let mut area = loop_area(store, *outer, &origin, &normal)?.abs();
                for hole in inner {
                    area -= loop_area(store, *hole, &origin, &normal)?.abs();
                }
                Ok(area.max(0.0))
            }
            (FaceBounds::Loops { .. }, _) => Err(OperationError::InvalidInput(
                "loop-bounded faces must lie on a plane".into(),
            )
            .into()),
            (FaceBounds::Patch(domain), surface) => {
                let surface = surface.as_surface();
                gauss_legendre_2d(
                    |u, v| surface.area_element(u, v),
                    (domain.u_min, domain.u_max),
                    (domain.v_min, domain.v_max),
                    PATCH_CELLS,
                    PATCH_CELLS,
                )
            }
        }
    }
}

/// Signed area enclosed by a wire, positive when counter-clockwise about `normal`.
fn loop_area(store: &TopologyStore, wire: WireId, origin: &Point3, normal: &Vector3) -> Result<f64> {
    let mut twice_area = 0.0;
    for oe in &store.wire(wire)?.edges {
        let edge = store.edge(oe.edge)?;
        let (t0, t1) = oe.parameter_range(edge);
        let curve = edge.curve.as_curve();
        twice_area += match &edge.curve {
            EdgeCurve::Line(_) => {
                let a = curve.evaluate(t0)? - origin;
                let b = curve.evaluate(t1)? - origin;
                normal.dot(&a.cross(&b))
            }
            _ => adaptive_simpson(
                |t| {
                    let p = curve.evaluate(t)? - origin;
                    Ok(normal.dot(&p.cross(&curve.derivative(t)?)))
                },
                t0,
                t1,
                BOUNDARY_TOLERANCE,
            )?,
        };
    }
    Ok(0.5 * twice_area)
}
