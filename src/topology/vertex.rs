use crate::math::{Placement, Point3};

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// A point of the model, shared by the edges meeting there.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub point: Point3,
}

impl VertexData {
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }

    /// Position of the vertex once its shape is moved by `placement`.
    #[must_use]
    pub fn placed(&self, placement: &Placement) -> Point3 {
        placement * self.point
    }
}
