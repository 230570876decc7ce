use std::collections::HashSet;

use crate::error::TopologyError;

use super::{
    EdgeId, FaceBounds, FaceId, ShellId, SolidId, TopologyStore, VertexId, WireId,
};

/// Reference to any topological entity of the store.
///
/// This is what a viewer hands out when the user picks a sub-shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Vertex(VertexId),
    Edge(EdgeId),
    Wire(WireId),
    Face(FaceId),
    Shell(ShellId),
    Solid(SolidId),
}

/// The kind of a [`Shape`], without its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Vertex,
    Edge,
    Wire,
    Face,
    Shell,
    Solid,
}

impl Shape {
    /// Returns the kind of this shape.
    #[must_use]
    pub fn kind(self) -> ShapeKind {
        match self {
            Self::Vertex(_) => ShapeKind::Vertex,
            Self::Edge(_) => ShapeKind::Edge,
            Self::Wire(_) => ShapeKind::Wire,
            Self::Face(_) => ShapeKind::Face,
            Self::Shell(_) => ShapeKind::Shell,
            Self::Solid(_) => ShapeKind::Solid,
        }
    }
}

impl From<VertexId> for Shape {
    fn from(id: VertexId) -> Self {
        Self::Vertex(id)
    }
}

impl From<EdgeId> for Shape {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}

impl From<WireId> for Shape {
    fn from(id: WireId) -> Self {
        Self::Wire(id)
    }
}

impl From<FaceId> for Shape {
    fn from(id: FaceId) -> Self {
        Self::Face(id)
    }
}

impl From<ShellId> for Shape {
    fn from(id: ShellId) -> Self {
        Self::Shell(id)
    }
}

impl From<SolidId> for Shape {
    fn from(id: SolidId) -> Self {
        Self::Solid(id)
    }
}

/// Sub-shapes reachable from a shape, each listed once in discovery order.
#[derive(Debug, Clone, Default)]
pub struct SubShapes {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
    pub faces: Vec<FaceId>,
}

impl SubShapes {
    /// Returns `true` if nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.faces.is_empty()
    }
}

impl TopologyStore {
    /// Returns `true` if the shape refers to a live entity of this store.
    #[must_use]
    pub fn contains(&self, shape: Shape) -> bool {
        match shape {
            Shape::Vertex(id) => self.vertex(id).is_ok(),
            Shape::Edge(id) => self.edge(id).is_ok(),
            Shape::Wire(id) => self.wire(id).is_ok(),
            Shape::Face(id) => self.face(id).is_ok(),
            Shape::Shell(id) => self.shell(id).is_ok(),
            Shape::Solid(id) => self.solid(id).is_ok(),
        }
    }

    /// Enumerates the faces, edges and vertices of a shape.
    ///
    /// A shape includes itself: exploring a vertex yields that vertex.
    /// Patch faces have no boundary edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape or any entity it references is missing.
    pub fn explore(&self, shape: Shape) -> Result<SubShapes, TopologyError> {
        let mut explorer = Explorer::new(self);
        match shape {
            Shape::Vertex(id) => explorer.vertex(id)?,
            Shape::Edge(id) => explorer.edge(id)?,
            Shape::Wire(id) => explorer.wire(id)?,
            Shape::Face(id) => explorer.face(id)?,
            Shape::Shell(id) => explorer.shell(id)?,
            Shape::Solid(id) => {
                let solid = self.solid(id)?;
                for shell in solid.shells() {
                    explorer.shell(shell)?;
                }
            }
        }
        Ok(explorer.found)
    }
}

struct Explorer<'a> {
    store: &'a TopologyStore,
    seen_vertices: HashSet<VertexId>,
    seen_edges: HashSet<EdgeId>,
    seen_faces: HashSet<FaceId>,
    found: SubShapes,
}

impl<'a> Explorer<'a> {
    fn new(store: &'a TopologyStore) -> Self {
        Self {
            store,
            seen_vertices: HashSet::new(),
            seen_edges: HashSet::new(),
            seen_faces: HashSet::new(),
            found: SubShapes::default(),
        }
    }

    fn vertex(&mut self, id: VertexId) -> Result<(), TopologyError> {
        self.store.vertex(id)?;
        if self.seen_vertices.insert(id) {
            self.found.vertices.push(id);
        }
        Ok(())
    }

    fn edge(&mut self, id: EdgeId) -> Result<(), TopologyError> {
        let edge = self.store.edge(id)?;
        if self.seen_edges.insert(id) {
            self.found.edges.push(id);
            let (start, end) = (edge.start, edge.end);
            self.vertex(start)?;
            self.vertex(end)?;
        }
        Ok(())
    }

    fn wire(&mut self, id: WireId) -> Result<(), TopologyError> {
        let wire = self.store.wire(id)?;
        for oe in &wire.edges {
            self.edge(oe.edge)?;
        }
        Ok(())
    }

    fn face(&mut self, id: FaceId) -> Result<(), TopologyError> {
        let face = self.store.face(id)?;
        if !self.seen_faces.insert(id) {
            return Ok(());
        }
        self.found.faces.push(id);
        if let FaceBounds::Loops { outer, inner } = &face.bounds {
            self.wire(*outer)?;
            for wire in inner {
                self.wire(*wire)?;
            }
        }
        Ok(())
    }

    fn shell(&mut self, id: ShellId) -> Result<(), TopologyError> {
        let shell = self.store.shell(id)?;
        for face in &shell.faces {
            self.face(*face)?;
        }
        Ok(())
    }
}
