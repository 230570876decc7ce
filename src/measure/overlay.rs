//! Graphics primitives a measurement display places in the viewport.

use uuid::Uuid;

use crate::geometry::curve::Circle;
use crate::math::{Point3, Vector3};

/// Identity of an overlay inside the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(Uuid);

impl OverlayId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Rendering layer of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZLayer {
    #[default]
    Default,
    /// Drawn above model geometry.
    Topmost,
}

/// What an overlay draws.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayKind {
    TextLabel { position: Point3, text: String },
    Point { position: Point3 },
    CircleOutline { circle: Circle },
    Line { start: Point3, end: Point3 },
    /// A dimension line between two points, annotated with its value.
    LengthDimension {
        start: Point3,
        end: Point3,
        /// Normal of the plane the dimension is drawn in.
        plane_normal: Vector3,
        text: String,
    },
}

/// A graphics primitive owned by a measurement display.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub id: OverlayId,
    pub layer: ZLayer,
    pub kind: OverlayKind,
}

impl Overlay {
    /// Creates an overlay on the topmost layer with a fresh identity.
    #[must_use]
    pub fn topmost(kind: OverlayKind) -> Self {
        Self {
            id: OverlayId::new(),
            layer: ZLayer::Topmost,
            kind,
        }
    }

    /// Replaces the text of a label or dimension; other kinds are left alone.
    pub fn set_text(&mut self, value: String) {
        match &mut self.kind {
            OverlayKind::TextLabel { text, .. } | OverlayKind::LengthDimension { text, .. } => {
                *text = value;
            }
            OverlayKind::Point { .. } | OverlayKind::CircleOutline { .. } | OverlayKind::Line { .. } => {}
        }
    }

    /// Returns the text of a label or dimension.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            OverlayKind::TextLabel { text, .. } | OverlayKind::LengthDimension { text, .. } => {
                Some(text)
            }
            _ => None,
        }
    }
}
