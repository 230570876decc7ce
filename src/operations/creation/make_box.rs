use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::geometry::curve::Line;
use crate::math::{Point3, TOLERANCE};
use crate::topology::{
    EdgeCurve, EdgeData, EdgeId, OrientedEdge, ShellData, SolidData, SolidId, TopologyStore,
    VertexData, WireData,
};

use super::MakeFace;

/// Corner indices of each face, counter-clockwise seen from outside.
///
/// Corner `i` sits at `x = bit 0`, `y = bit 1`, `z = bit 2` of `i`.
const FACES: [[usize; 4]; 6] = [
    [0, 2, 3, 1], // -z
    [4, 5, 7, 6], // +z
    [0, 1, 5, 4], // -y
    [2, 6, 7, 3], // +y
    [0, 4, 6, 2], // -x
    [1, 3, 7, 5], // +x
];

/// Creates a box solid from two corner points.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation, creating the box in the topology store.
    ///
    /// The box has eight shared vertices, twelve shared edges and six planar
    /// faces with outward normals, gathered in one closed shell.
    ///
    /// # Errors
    ///
    /// Returns an error if the box has no extent along some axis.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let size = self.max_corner - self.min_corner;
        if size.min() < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "box extents must be positive, got {size:?}"
            ))
            .into());
        }

        let corners: Vec<Point3> = (0..8)
            .map(|i| {
                Point3::new(
                    if i & 1 == 0 { self.min_corner.x } else { self.max_corner.x },
                    if i & 2 == 0 { self.min_corner.y } else { self.max_corner.y },
                    if i & 4 == 0 { self.min_corner.z } else { self.max_corner.z },
                )
            })
            .collect();
        let vertices: Vec<_> = corners
            .iter()
            .map(|p| store.add_vertex(VertexData::new(*p)))
            .collect();

        let mut edges: HashMap<(usize, usize), EdgeId> = HashMap::new();
        let mut faces = Vec::with_capacity(FACES.len());
        for corner_loop in FACES {
            let mut oriented = Vec::with_capacity(4);
            for k in 0..4 {
                let (a, b) = (corner_loop[k], corner_loop[(k + 1) % 4]);
                let key = (a.min(b), a.max(b));
                let edge = if let Some(&edge) = edges.get(&key) {
                    edge
                } else {
                    let (lo, hi) = key;
                    let line = Line::new(corners[lo], corners[hi] - corners[lo])?;
                    let edge = store.add_edge(EdgeData {
                        start: vertices[lo],
                        end: vertices[hi],
                        curve: EdgeCurve::Line(line),
                        t_start: 0.0,
                        t_end: (corners[hi] - corners[lo]).norm(),
                    });
                    edges.insert(key, edge);
                    edge
                };
                oriented.push(OrientedEdge::new(edge, a < b));
            }
            let wire = store.add_wire(WireData::new(oriented, true));
            faces.push(MakeFace::new(wire, vec![]).execute(store)?);
        }

        let shell = store.add_shell(ShellData::new(faces, true));
        Ok(store.add_solid(SolidData::new(shell)))
    }
}
