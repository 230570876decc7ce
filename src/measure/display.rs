//! Presentation of measurement results as text and overlay graphics.

use crate::geometry::curve::Circle;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::config::MeasureConfig;
use super::overlay::{Overlay, OverlayKind};
use super::quantity::{QuantityAngle, QuantityArea, QuantityLength};
use super::unit::UnitSystem;

/// One live measurement shown to the user.
///
/// A display owns a fixed, ordered set of overlays. Its captured geometry
/// never changes; only the text follows the unit configuration.
pub trait MeasureDisplay {
    /// Re-renders the text and relabels the overlays for `config`.
    ///
    /// Idempotent: calling it twice with the same config changes nothing.
    fn update(&mut self, config: &MeasureConfig);

    /// Current summary text; empty means no contribution to the panel.
    fn text(&self) -> &str;

    /// Number of overlays this display owns.
    fn overlay_count(&self) -> usize;

    /// Overlay at `index`, or `None` past the end.
    fn overlay_at(&self, index: usize) -> Option<&Overlay>;
}

fn format_length(length: QuantityLength, config: &MeasureConfig) -> (String, &'static str) {
    let t = UnitSystem::translate_length(length, config.length_unit);
    (config.text.format(t.value), t.unit)
}

fn format_point(point: &Point3, config: &MeasureConfig) -> String {
    let coords: Vec<String> = point
        .iter()
        .map(|&c| format_length(QuantityLength::millimeters(c), config).0)
        .collect();
    format!("({}){}", coords.join(" "), config.length_unit.token())
}

/// Position of a picked vertex.
#[derive(Debug)]
pub struct VertexDisplay {
    point: Point3,
    text: String,
    label: Overlay,
}

impl VertexDisplay {
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            text: String::new(),
            label: Overlay::topmost(OverlayKind::TextLabel {
                position: point,
                text: String::new(),
            }),
        }
    }

    #[must_use]
    pub fn point(&self) -> &Point3 {
        &self.point
    }
}

impl MeasureDisplay for VertexDisplay {
    fn update(&mut self, config: &MeasureConfig) {
        self.text = format_point(&self.point, config);
        self.label.set_text(self.text.clone());
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn overlay_count(&self) -> usize {
        1
    }

    fn overlay_at(&self, index: usize) -> Option<&Overlay> {
        (index == 0).then_some(&self.label)
    }
}

/// Center of a picked circular edge.
#[derive(Debug)]
pub struct CircleCenterDisplay {
    circle: Circle,
    text: String,
    overlays: [Overlay; 3],
}

impl CircleCenterDisplay {
    #[must_use]
    pub fn new(circle: Circle) -> Self {
        let center = *circle.center();
        Self {
            overlays: [
                Overlay::topmost(OverlayKind::Point { position: center }),
                Overlay::topmost(OverlayKind::TextLabel {
                    position: center,
                    text: String::new(),
                }),
                Overlay::topmost(OverlayKind::CircleOutline {
                    circle: circle.clone(),
                }),
            ],
            circle,
            text: String::new(),
        }
    }

    #[must_use]
    pub fn circle(&self) -> &Circle {
        &self.circle
    }
}

impl MeasureDisplay for CircleCenterDisplay {
    fn update(&mut self, config: &MeasureConfig) {
        self.text = format_point(self.circle.center(), config);
        // Leading spaces keep the label clear of the center marker.
        self.overlays[1].set_text(format!("  {}", self.text));
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    fn overlay_at(&self, index: usize) -> Option<&Overlay> {
        self.overlays.get(index)
    }
}

/// Diameter of a picked circular edge, drawn across the circle.
#[derive(Debug)]
pub struct CircleDiameterDisplay {
    circle: Circle,
    anchor: Point3,
    text: String,
    overlays: [Overlay; 3],
}

impl CircleDiameterDisplay {
    /// Creates the display; `anchor` is a point on the circle where the
    /// diameter line starts.
    #[must_use]
    pub fn new(circle: Circle, anchor: Point3) -> Self {
        let center = *circle.center();
        let opposite = anchor + (center - anchor) * 2.0;
        Self {
            overlays: [
                Overlay::topmost(OverlayKind::CircleOutline {
                    circle: circle.clone(),
                }),
                Overlay::topmost(OverlayKind::Line {
                    start: anchor,
                    end: opposite,
                }),
                Overlay::topmost(OverlayKind::TextLabel {
                    position: center,
                    text: String::new(),
                }),
            ],
            circle,
            anchor,
            text: String::new(),
        }
    }

    #[must_use]
    pub fn anchor(&self) -> &Point3 {
        &self.anchor
    }
}

impl MeasureDisplay for CircleDiameterDisplay {
    fn update(&mut self, config: &MeasureConfig) {
        let (value, unit) = format_length(QuantityLength::millimeters(self.circle.diameter()), config);
        self.text = format!("Diameter: {value}{unit}");
        self.overlays[2].set_text(format!("Ø{value}"));
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    fn overlay_at(&self, index: usize) -> Option<&Overlay> {
        self.overlays.get(index)
    }
}

/// Minimum distance between two picked entities.
#[derive(Debug)]
pub struct MinDistanceDisplay {
    distance: QuantityLength,
    text: String,
    dimension: Overlay,
}

impl MinDistanceDisplay {
    #[must_use]
    pub fn new(point_a: Point3, point_b: Point3, distance: QuantityLength) -> Self {
        Self {
            distance,
            text: String::new(),
            dimension: Overlay::topmost(OverlayKind::LengthDimension {
                start: point_a,
                end: point_b,
                plane_normal: dimension_plane_normal(&(point_b - point_a)),
                text: String::new(),
            }),
        }
    }
}

/// Picks a normal for the plane a dimension along `span` is drawn in.
fn dimension_plane_normal(span: &Vector3) -> Vector3 {
    let norm = span.norm();
    if norm < TOLERANCE {
        return Vector3::z();
    }
    let dir = span / norm;
    let axis = if dir.z.abs() < 0.9 { Vector3::z() } else { Vector3::x() };
    let normal = dir.cross(&axis).cross(&dir);
    normal.normalize()
}

impl MeasureDisplay for MinDistanceDisplay {
    fn update(&mut self, config: &MeasureConfig) {
        let (value, unit) = format_length(self.distance, config);
        self.text = format!("Min Distance: {value}{unit}");
        self.dimension.set_text(format!("{value}{unit}"));
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn overlay_count(&self) -> usize {
        1
    }

    fn overlay_at(&self, index: usize) -> Option<&Overlay> {
        (index == 0).then_some(&self.dimension)
    }
}

/// Total length of the picked edges.
#[derive(Debug)]
pub struct LengthDisplay {
    length: QuantityLength,
    text: String,
}

impl LengthDisplay {
    #[must_use]
    pub fn new(length: QuantityLength) -> Self {
        Self {
            length,
            text: String::new(),
        }
    }
}

impl MeasureDisplay for LengthDisplay {
    fn update(&mut self, config: &MeasureConfig) {
        let (value, unit) = format_length(self.length, config);
        self.text = format!("Length: {value}{unit}");
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn overlay_count(&self) -> usize {
        0
    }

    fn overlay_at(&self, _index: usize) -> Option<&Overlay> {
        None
    }
}

/// Angle between two picked linear edges.
#[derive(Debug)]
pub struct AngleDisplay {
    angle: QuantityAngle,
    text: String,
}

impl AngleDisplay {
    #[must_use]
    pub fn new(angle: QuantityAngle) -> Self {
        Self {
            angle,
            text: String::new(),
        }
    }
}

impl MeasureDisplay for AngleDisplay {
    fn update(&mut self, config: &MeasureConfig) {
        let t = UnitSystem::translate_angle(self.angle, config.angle_unit);
        self.text = format!("Angle: {}{}", config.text.format(t.value), t.unit);
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn overlay_count(&self) -> usize {
        0
    }

    fn overlay_at(&self, _index: usize) -> Option<&Overlay> {
        None
    }
}

/// Total area of the picked faces.
#[derive(Debug)]
pub struct SurfaceAreaDisplay {
    area: QuantityArea,
    text: String,
}

impl SurfaceAreaDisplay {
    #[must_use]
    pub fn new(area: QuantityArea) -> Self {
        Self {
            area,
            text: String::new(),
        }
    }
}

impl MeasureDisplay for SurfaceAreaDisplay {
    fn update(&mut self, config: &MeasureConfig) {
        let t = UnitSystem::translate_area(self.area, config.area_unit());
        self.text = format!("Area: {}{}", config.text.format(t.value), t.unit);
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn overlay_count(&self) -> usize {
        0
    }

    fn overlay_at(&self, _index: usize) -> Option<&Overlay> {
        None
    }
}
