use crate::error::{GeometryError, OperationError, Result, TopologyError};
use crate::geometry::surface::{Plane, SurfaceDomain};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::tessellation::{collect_wire_points, TessellationParams};
use crate::topology::{FaceBounds, FaceData, FaceId, FaceSurface, TopologyStore, WireId};

/// Maximum distance of a boundary sample from the fitted plane.
const PLANARITY_TOLERANCE: f64 = 1e-6;

enum FaceSpec {
    Planar {
        outer_wire: WireId,
        inner_wires: Vec<WireId>,
    },
    Patch {
        surface: FaceSurface,
        domain: SurfaceDomain,
    },
}

/// Creates a face, either planar from closed wires or as a parametric patch.
pub struct MakeFace {
    spec: FaceSpec,
}

impl MakeFace {
    /// Creates a planar face bounded by `outer_wire`, with `inner_wires` as holes.
    ///
    /// The face normal follows the outer wire by the right-hand rule.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            spec: FaceSpec::Planar {
                outer_wire,
                inner_wires,
            },
        }
    }

    /// Creates a face covering the rectangle `domain` of a surface's parameter space.
    #[must_use]
    pub fn patch(surface: FaceSurface, domain: SurfaceDomain) -> Self {
        Self {
            spec: FaceSpec::Patch { surface, domain },
        }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if a boundary wire is open, the outer wire encloses
    /// no area, the wires are not coplanar, or the patch domain is unbounded
    /// or empty.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        let data = match &self.spec {
            FaceSpec::Planar {
                outer_wire,
                inner_wires,
            } => planar(store, *outer_wire, inner_wires)?,
            FaceSpec::Patch { surface, domain } => {
                if !domain.is_bounded() {
                    return Err(
                        OperationError::InvalidInput("patch domain must be bounded".into()).into(),
                    );
                }
                if domain.u_max - domain.u_min < TOLERANCE || domain.v_max - domain.v_min < TOLERANCE
                {
                    return Err(
                        OperationError::InvalidInput("patch domain is empty".into()).into(),
                    );
                }
                FaceData {
                    surface: surface.clone(),
                    bounds: FaceBounds::Patch(*domain),
                    same_sense: true,
                }
            }
        };
        Ok(store.add_face(data))
    }
}

fn planar(store: &TopologyStore, outer_wire: WireId, inner_wires: &[WireId]) -> Result<FaceData> {
    let params = TessellationParams::default();
    for &wire in std::iter::once(&outer_wire).chain(inner_wires) {
        if !store.wire(wire)?.is_closed {
            return Err(TopologyError::WireNotClosed.into());
        }
    }

    let outer = collect_wire_points(store, outer_wire, &params)?;
    let normal = newell_normal(&outer);
    if normal.norm() < TOLERANCE {
        return Err(GeometryError::Degenerate("outer wire encloses no area".into()).into());
    }
    let origin = outer.first().copied().unwrap_or_else(Point3::origin);
    let plane = Plane::from_normal(origin, normal)?;

    let mut samples = outer;
    for &wire in inner_wires {
        samples.extend(collect_wire_points(store, wire, &params)?);
    }
    let off_plane = samples
        .iter()
        .map(|p| plane.signed_distance(p).abs())
        .fold(0.0, f64::max);
    if off_plane > PLANARITY_TOLERANCE {
        return Err(OperationError::InvalidInput(format!(
            "face boundary is not planar (deviation {off_plane})"
        ))
        .into());
    }

    Ok(FaceData {
        surface: FaceSurface::Plane(plane),
        bounds: FaceBounds::Loops {
            outer: outer_wire,
            inner: inner_wires.to_vec(),
        },
        same_sense: true,
    })
}

/// Newell's method: a normal whose length is twice the enclosed area.
fn newell_normal(points: &[Point3]) -> Vector3 {
    let mut n = Vector3::zeros();
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        n += a.coords.cross(&b.coords);
    }
    n
}
