//! Interactive measurement of picked B-rep entities.
//!
//! A [`MeasureController`] listens to the viewport's selection, asks a
//! [`MeasureDriver`] to compute the active [`MeasureType`] for the picked
//! entities, and shows each result through a [`MeasureDisplay`] made of text
//! and overlay graphics.

pub mod config;
pub mod controller;
pub mod display;
pub mod driver;
pub mod link;
pub mod overlay;
pub mod quantity;
pub mod scene;
pub mod unit;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{MeasureConfig, TextOptions};
pub use controller::MeasureController;
pub use display::MeasureDisplay;
pub use driver::{DriverRegistry, MeasureCircle, MeasureDriver, MinDistanceInfo, ShapeMeasureDriver};
pub use link::{DisplayId, LinkTable};
pub use overlay::{Overlay, OverlayId, OverlayKind, ZLayer};
pub use quantity::{Quantity, QuantityAngle, QuantityArea, QuantityLength};
pub use scene::{GraphicsObject, GraphicsOwner, GraphicsScene, ObjectId, ObjectSource, SelectionMode};
pub use unit::{AngleUnit, AreaUnit, LengthUnit, TranslateResult, UnitSystem};

/// The measurement the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeasureType {
    /// Measurement is disabled.
    #[default]
    None,
    VertexPosition,
    CircleCenter,
    CircleDiameter,
    MinDistance,
    Length,
    Angle,
    SurfaceArea,
}

impl MeasureType {
    /// How many picked entities one measurement consumes.
    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            Self::None => Arity::Unused,
            Self::VertexPosition | Self::CircleCenter | Self::CircleDiameter => Arity::Single,
            Self::MinDistance | Self::Angle => Arity::Pair,
            Self::Length | Self::SurfaceArea => Arity::All,
        }
    }
}

/// Selection policy of a [`MeasureType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No measurement.
    Unused,
    /// One display per picked entity.
    Single,
    /// One display for exactly two picked entities.
    Pair,
    /// One display aggregating the whole selection.
    All,
}
