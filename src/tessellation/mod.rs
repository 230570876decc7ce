mod tessellate_curve;
mod tessellate_face;

pub use tessellate_curve::TessellateCurve;
pub use tessellate_face::TessellateFace;

pub(crate) use tessellate_curve::{collect_wire_points, sample_edge};

use crate::math::{Point3, Vector3};

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum allowed deviation from the true geometry.
    pub tolerance: f64,
    /// Minimum number of segments for curves.
    pub min_segments: usize,
    /// Maximum number of segments for curves.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

impl Polyline {
    /// Iterates over consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Iterates over the triangles as corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.indices.iter().map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Sums the areas of all triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }
}
