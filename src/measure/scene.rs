//! The viewport collaborator, seen through the few calls measurement needs.

use std::hash::{Hash, Hasher};

use crate::math::Placement;
use crate::topology::Shape;

use super::overlay::{Overlay, OverlayId};

/// Identity of an object displayed in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// The representation backing a displayed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSource {
    /// A boundary-representation shape of the topology store.
    Brep { root: Shape },
    /// A triangle mesh, which shape drivers cannot measure.
    Mesh,
}

/// An object displayed in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsObject {
    pub id: ObjectId,
    pub source: ObjectSource,
}

/// Which sub-entities of an object the user may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// The whole object.
    Object,
    Vertex,
    Edge,
    Face,
}

/// One user-picked sub-shape of a displayed object, with its placement.
///
/// Two owners are equal when they pick the same sub-shape of the same
/// object; the placement is carried along but not compared.
#[derive(Debug, Clone, Copy)]
pub struct GraphicsOwner {
    pub object: ObjectId,
    pub shape: Shape,
    pub placement: Placement,
}

impl GraphicsOwner {
    #[must_use]
    pub fn new(object: ObjectId, shape: Shape, placement: Placement) -> Self {
        Self {
            object,
            shape,
            placement,
        }
    }
}

impl PartialEq for GraphicsOwner {
    fn eq(&self, other: &Self) -> bool {
        self.object == other.object && self.shape == other.shape
    }
}

impl Eq for GraphicsOwner {}

impl Hash for GraphicsOwner {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.object.hash(state);
        self.shape.hash(state);
    }
}

/// Viewport operations used by the measurement controller.
///
/// Commands are fire-and-forget and must be idempotent. `add_object` with
/// an overlay id already in the scene replaces that overlay.
pub trait GraphicsScene {
    /// Visits every displayed object.
    fn foreach_displayed_object(&self, visitor: &mut dyn FnMut(&GraphicsObject));

    /// Visits the current selection, in selection order.
    fn foreach_selected_owner(&self, visitor: &mut dyn FnMut(&GraphicsOwner));

    fn activate_object_selection(&mut self, object: ObjectId, mode: SelectionMode);

    /// Turns off every selection mode of an object.
    fn deactivate_object_selection(&mut self, object: ObjectId);

    fn clear_selection(&mut self);

    fn add_object(&mut self, overlay: &Overlay);

    fn remove_object(&mut self, overlay: OverlayId);

    fn redraw(&mut self);
}
