pub mod edge;
pub mod face;
pub mod shape;
pub mod shell;
pub mod solid;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceBounds, FaceData, FaceId, FaceSurface};
pub use shape::{Shape, ShapeKind, SubShapes};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Arena owning every topological entity of a model.
///
/// Entities refer to each other by typed generational ids. A store is built
/// once and then shared read-only by the measurement layer, so it only
/// offers insertion and lookup.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

/// Generates the insert and lookup pair for one entity arena.
macro_rules! arena {
    ($field:ident, $add:ident, $get:ident, $id:ty, $data:ty, $name:literal) => {
        #[doc = concat!("Inserts a ", $name, " and returns its id.")]
        pub fn $add(&mut self, data: $data) -> $id {
            self.$field.insert(data)
        }

        #[doc = concat!("Looks up a ", $name, ".")]
        ///
        /// # Errors
        ///
        /// Returns [`TopologyError::EntityNotFound`] if the id is stale or
        /// belongs to another store.
        pub fn $get(&self, id: $id) -> Result<&$data, TopologyError> {
            self.$field
                .get(id)
                .ok_or_else(|| TopologyError::EntityNotFound($name.into()))
        }
    };
}

impl TopologyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    arena!(vertices, add_vertex, vertex, VertexId, VertexData, "vertex");
    arena!(edges, add_edge, edge, EdgeId, EdgeData, "edge");
    arena!(wires, add_wire, wire, WireId, WireData, "wire");
    arena!(faces, add_face, face, FaceId, FaceData, "face");
    arena!(shells, add_shell, shell, ShellId, ShellData, "shell");
    arena!(solids, add_solid, solid, SolidId, SolidData, "solid");

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
