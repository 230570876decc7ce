//! Measurement computations over picked entities.

use std::sync::Arc;

use crate::error::{MeasureError, MeasureResult};
use crate::geometry::curve::Circle;
use crate::math::{Point3, Vector3, CONFUSION};
use crate::operations::query::{Area, DistanceShapeShape, Length};
use crate::topology::{EdgeCurve, EdgeData, Shape, TopologyStore};

use super::quantity::{QuantityAngle, QuantityArea, QuantityLength};
use super::scene::{GraphicsObject, GraphicsOwner, ObjectSource, SelectionMode};
use super::MeasureType;

/// A circle recovered from a picked edge.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureCircle {
    /// A point on the circle: the edge's start point.
    pub anchor: Point3,
    pub circle: Circle,
}

/// Closest points between two picked entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinDistanceInfo {
    pub point_a: Point3,
    pub point_b: Point3,
    pub distance: QuantityLength,
}

/// Computes measurements for one kind of scene object.
///
/// Every computation returns a [`MeasureResult`]; none of them panics on
/// unexpected input.
pub trait MeasureDriver {
    /// Sub-entity kinds the user must be able to pick for `measure_type`.
    fn selection_modes(&self, measure_type: MeasureType) -> Vec<SelectionMode>;

    /// Whether this driver understands the representation of `object`.
    fn supports_object(&self, object: &GraphicsObject) -> bool;

    /// Whether this driver implements `measure_type`.
    fn supports_type(&self, measure_type: MeasureType) -> bool;

    /// Position of a picked vertex, in world coordinates.
    ///
    /// # Errors
    ///
    /// Fails if the entity is not a vertex.
    fn vertex_position(&self, owner: &GraphicsOwner) -> MeasureResult<Point3>;

    /// Circle carried by a picked edge, in world coordinates.
    ///
    /// # Errors
    ///
    /// Fails if the edge is not circular.
    fn circle(&self, owner: &GraphicsOwner) -> MeasureResult<MeasureCircle>;

    /// Minimum distance between two picked entities.
    ///
    /// # Errors
    ///
    /// Fails if an entity is not a shape or the distance cannot be computed.
    fn min_distance(&self, a: &GraphicsOwner, b: &GraphicsOwner) -> MeasureResult<MinDistanceInfo>;

    /// Total length of picked edges.
    ///
    /// # Errors
    ///
    /// Fails on the first entity that is not an edge.
    fn length(&self, owners: &[GraphicsOwner]) -> MeasureResult<QuantityLength>;

    /// Angle between two picked linear edges.
    ///
    /// # Errors
    ///
    /// Fails if either entity is not a linear edge.
    fn angle(&self, a: &GraphicsOwner, b: &GraphicsOwner) -> MeasureResult<QuantityAngle>;

    /// Total area of picked faces.
    ///
    /// # Errors
    ///
    /// Fails on the first entity that is not a face.
    fn surface_area(&self, owners: &[GraphicsOwner]) -> MeasureResult<QuantityArea>;
}

/// Driver for objects backed by shapes of a [`TopologyStore`].
pub struct ShapeMeasureDriver {
    store: Arc<TopologyStore>,
}

impl ShapeMeasureDriver {
    #[must_use]
    pub fn new(store: Arc<TopologyStore>) -> Self {
        Self { store }
    }

    fn edge(&self, owner: &GraphicsOwner) -> Option<&EdgeData> {
        match owner.shape {
            Shape::Edge(id) => self.store.edge(id).ok(),
            _ => None,
        }
    }

    fn line_direction(&self, owner: &GraphicsOwner, which: &str) -> MeasureResult<Vector3> {
        let not_linear = || MeasureError::not_applicable(format!("{which} picked entity must be a linear edge"));
        let edge = self.edge(owner).ok_or_else(not_linear)?;
        let EdgeCurve::Line(line) = &edge.curve else {
            return Err(not_linear());
        };
        let direction = if edge.t_end >= edge.t_start {
            *line.direction()
        } else {
            -*line.direction()
        };
        Ok(owner.placement.rotation * direction)
    }
}

impl MeasureDriver for ShapeMeasureDriver {
    fn selection_modes(&self, measure_type: MeasureType) -> Vec<SelectionMode> {
        match measure_type {
            MeasureType::None => Vec::new(),
            MeasureType::VertexPosition => vec![SelectionMode::Vertex],
            MeasureType::CircleCenter
            | MeasureType::CircleDiameter
            | MeasureType::Length
            | MeasureType::Angle => vec![SelectionMode::Edge],
            MeasureType::MinDistance => {
                vec![SelectionMode::Vertex, SelectionMode::Edge, SelectionMode::Face]
            }
            MeasureType::SurfaceArea => vec![SelectionMode::Face],
        }
    }

    fn supports_object(&self, object: &GraphicsObject) -> bool {
        match object.source {
            ObjectSource::Brep { root } => self.store.contains(root),
            ObjectSource::Mesh => false,
        }
    }

    fn supports_type(&self, measure_type: MeasureType) -> bool {
        measure_type != MeasureType::None
    }

    fn vertex_position(&self, owner: &GraphicsOwner) -> MeasureResult<Point3> {
        let vertex = match owner.shape {
            Shape::Vertex(id) => self.store.vertex(id).ok(),
            _ => None,
        }
        .ok_or_else(|| MeasureError::not_applicable("Picked entity must be a vertex"))?;
        Ok(vertex.placed(&owner.placement))
    }

    fn circle(&self, owner: &GraphicsOwner) -> MeasureResult<MeasureCircle> {
        let not_circular = || MeasureError::not_applicable("Picked entity must be a circular edge");
        let edge = self.edge(owner).ok_or_else(not_circular)?;
        let circle = match &edge.curve {
            EdgeCurve::Circle(circle) => circle.clone(),
            EdgeCurve::Ellipse(ellipse) if ellipse.is_circular(CONFUSION) => ellipse
                .to_circle()
                .map_err(|e| MeasureError::computation_failed(e.to_string()))?,
            EdgeCurve::BSpline(_) => {
                return Err(MeasureError::unimplemented(
                    "Circle recovery from B-spline edges is not supported",
                ));
            }
            EdgeCurve::Line(_) | EdgeCurve::Ellipse(_) => return Err(not_circular()),
        };
        let anchor = edge
            .curve
            .as_curve()
            .evaluate(edge.t_start)
            .map_err(|e| MeasureError::computation_failed(e.to_string()))?;
        Ok(MeasureCircle {
            anchor: owner.placement * anchor,
            circle: circle.transformed(&owner.placement),
        })
    }

    fn min_distance(&self, a: &GraphicsOwner, b: &GraphicsOwner) -> MeasureResult<MinDistanceInfo> {
        if !self.store.contains(a.shape) {
            return Err(MeasureError::not_applicable("First picked entity must be a shape(BREP)"));
        }
        if !self.store.contains(b.shape) {
            return Err(MeasureError::not_applicable("Second picked entity must be a shape(BREP)"));
        }
        let result = DistanceShapeShape::new(a.shape, a.placement, b.shape, b.placement)
            .execute(&self.store)
            .map_err(|_| MeasureError::computation_failed("Computation of minimum distance failed"))?;
        Ok(MinDistanceInfo {
            point_a: result.point_a,
            point_b: result.point_b,
            distance: QuantityLength::millimeters(result.distance),
        })
    }

    fn length(&self, owners: &[GraphicsOwner]) -> MeasureResult<QuantityLength> {
        let mut total = QuantityLength::default();
        for owner in owners {
            let Shape::Edge(edge) = owner.shape else {
                return Err(MeasureError::not_applicable("All picked entities must be edges"));
            };
            let length = Length::new(edge)
                .execute(&self.store)
                .map_err(|_| MeasureError::computation_failed("Computation of length failed"))?;
            total = total + QuantityLength::millimeters(length);
        }
        Ok(total)
    }

    fn angle(&self, a: &GraphicsOwner, b: &GraphicsOwner) -> MeasureResult<QuantityAngle> {
        let da = self.line_direction(a, "First")?;
        let db = self.line_direction(b, "Second")?;
        Ok(QuantityAngle::radians(da.cross(&db).norm().atan2(da.dot(&db))))
    }

    fn surface_area(&self, owners: &[GraphicsOwner]) -> MeasureResult<QuantityArea> {
        let mut total = QuantityArea::default();
        for owner in owners {
            let Shape::Face(face) = owner.shape else {
                return Err(MeasureError::not_applicable("All picked entities must be faces"));
            };
            let area = Area::new(face)
                .execute(&self.store)
                .map_err(|_| MeasureError::computation_failed("Computation of surface area failed"))?;
            total = total + QuantityArea::square_millimeters(area);
        }
        Ok(total)
    }
}

/// Ordered set of drivers; the first one that fits wins.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: Vec<Box<dyn MeasureDriver>>,
}

impl DriverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the shape driver for `store`.
    #[must_use]
    pub fn with_shape_driver(store: Arc<TopologyStore>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ShapeMeasureDriver::new(store)));
        registry
    }

    /// Appends a driver after the already registered ones.
    pub fn register(&mut self, driver: Box<dyn MeasureDriver>) {
        self.drivers.push(driver);
    }

    /// Returns the first driver supporting both `object` and `measure_type`.
    #[must_use]
    pub fn find_supporting(
        &self,
        object: &GraphicsObject,
        measure_type: MeasureType,
    ) -> Option<&dyn MeasureDriver> {
        self.position_supporting(object, measure_type)
            .and_then(|index| self.get(index))
    }

    /// Index of the driver serving `measure_type` for a whole scene.
    ///
    /// Objects are visited in order and the first one with a supporting
    /// driver decides; later objects are not consulted.
    #[must_use]
    pub fn first_responder(
        &self,
        objects: &[GraphicsObject],
        measure_type: MeasureType,
    ) -> Option<usize> {
        objects
            .iter()
            .find_map(|object| self.position_supporting(object, measure_type))
    }

    /// Driver at `index`, in registration order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&dyn MeasureDriver> {
        self.drivers.get(index).map(AsRef::as_ref)
    }

    fn position_supporting(&self, object: &GraphicsObject, measure_type: MeasureType) -> Option<usize> {
        self.drivers
            .iter()
            .position(|d| d.supports_type(measure_type) && d.supports_object(object))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}
