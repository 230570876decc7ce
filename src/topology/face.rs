use crate::geometry::surface::{Cylinder, Plane, Sphere, Surface, SurfaceDomain};

use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// The geometric surface associated with a face.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceSurface {
    /// A planar surface.
    Plane(Plane),
    /// A cylindrical surface.
    Cylinder(Cylinder),
    /// A spherical surface.
    Sphere(Sphere),
}

impl FaceSurface {
    /// Returns the surface as a trait object for generic evaluation.
    #[must_use]
    pub fn as_surface(&self) -> &dyn Surface {
        match self {
            Self::Plane(s) => s,
            Self::Cylinder(s) => s,
            Self::Sphere(s) => s,
        }
    }
}

/// How the usable region of a face's surface is delimited.
#[derive(Debug, Clone)]
pub enum FaceBounds {
    /// Closed edge loops lying on a planar surface.
    ///
    /// The outer loop bounds the face; inner loops cut holes.
    Loops {
        /// The outer boundary wire.
        outer: WireId,
        /// Inner boundary wires (holes).
        inner: Vec<WireId>,
    },
    /// A rectangle in the surface's parameter space.
    Patch(SurfaceDomain),
}

/// Data associated with a topological face.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The geometric surface on which this face lies.
    pub surface: FaceSurface,
    /// The region of the surface covered by the face.
    pub bounds: FaceBounds,
    /// If `true`, the face normal agrees with the surface normal.
    pub same_sense: bool,
}
