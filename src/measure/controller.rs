//! Binds measurement to the viewport's selection.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{MeasureError, MeasureResult};

use super::config::MeasureConfig;
use super::display::{
    AngleDisplay, CircleCenterDisplay, CircleDiameterDisplay, LengthDisplay, MeasureDisplay,
    MinDistanceDisplay, SurfaceAreaDisplay, VertexDisplay,
};
use super::driver::{DriverRegistry, MeasureDriver};
use super::link::LinkTable;
use super::scene::{GraphicsObject, GraphicsOwner, GraphicsScene, SelectionMode};
use super::{Arity, MeasureType};

/// Drives measurements from selection, mode and unit changes.
///
/// The controller owns the displays and their links to picked entities. It
/// pushes overlays to the scene on the topmost layer and keeps one result
/// text: the non-empty display texts joined by newlines.
pub struct MeasureController<S: GraphicsScene> {
    scene: S,
    registry: DriverRegistry,
    driver: Option<usize>,
    links: LinkTable,
    selection: Vec<GraphicsOwner>,
    measure_type: MeasureType,
    measure_on: bool,
    config: MeasureConfig,
    result_text: String,
    last_error: Option<MeasureError>,
    size_handler: Option<Box<dyn FnMut()>>,
}

impl<S: GraphicsScene> MeasureController<S> {
    /// Creates a controller with measurement switched on and no mode.
    #[must_use]
    pub fn new(scene: S, registry: DriverRegistry) -> Self {
        Self {
            scene,
            registry,
            driver: None,
            links: LinkTable::new(),
            selection: Vec::new(),
            measure_type: MeasureType::None,
            measure_on: true,
            config: MeasureConfig::default(),
            result_text: String::new(),
            last_error: None,
            size_handler: None,
        }
    }

    /// Appends a driver; it is consulted after the ones already registered.
    pub fn register_driver(&mut self, driver: Box<dyn MeasureDriver>) {
        self.registry.register(driver);
    }

    /// Sets the callback run whenever the result text may need more room.
    pub fn set_size_handler(&mut self, handler: impl FnMut() + 'static) {
        self.size_handler = Some(Box::new(handler));
    }

    /// Switches measurement on or off.
    ///
    /// Switching on re-arms the current mode. Switching off drops every
    /// display and restores whole-object picking.
    pub fn set_measure_on(&mut self, on: bool) {
        self.measure_on = on;
        self.rearm();
    }

    /// Changes the active measurement.
    ///
    /// The selection and every display are discarded. The first displayed
    /// object with a driver supporting the new mode elects that driver, which
    /// then serves every measurement and chooses which sub-entities of every
    /// displayed object become pickable.
    pub fn on_mode_changed(&mut self, measure_type: MeasureType) {
        debug!(from = ?self.measure_type, to = ?measure_type, "measure mode changed");
        self.measure_type = measure_type;
        self.rearm();
    }

    /// Reacts to a change of the scene's selection.
    pub fn on_selection_changed(&mut self) {
        let mut current = Vec::new();
        self.scene
            .foreach_selected_owner(&mut |owner| current.push(*owner));

        let previous: HashSet<GraphicsOwner> = self.selection.iter().copied().collect();
        let kept: HashSet<GraphicsOwner> = current.iter().copied().collect();
        let deselected: Vec<GraphicsOwner> =
            self.selection.iter().filter(|o| !kept.contains(o)).copied().collect();
        let added: Vec<GraphicsOwner> =
            current.iter().filter(|o| !previous.contains(o)).copied().collect();
        self.selection = current;

        for owner in &deselected {
            for display in self.links.remove_owner(owner) {
                debug!(object = ?owner.object, "display dropped with deselected entity");
                self.retract(display.as_ref());
            }
        }

        self.last_error = None;
        if self.measure_on {
            match self.measure_type.arity() {
                Arity::Unused => {}
                Arity::Single => {
                    for owner in added {
                        let outcome = self.measure(&[owner]);
                        self.accept(outcome, &[owner]);
                    }
                }
                Arity::Pair => {
                    if self.selection.len() == 2 && !added.is_empty() {
                        let pair = [self.selection[0], self.selection[1]];
                        let outcome = self.measure(&pair);
                        self.accept(outcome, &pair);
                    }
                }
                Arity::All => {
                    self.drop_displays();
                    if !self.selection.is_empty() {
                        let owners = self.selection.clone();
                        let outcome = self.measure(&owners);
                        self.accept(outcome, &owners);
                    }
                }
            }
        }

        self.refresh_text();
        self.request_size();
        self.scene.redraw();
    }

    /// Re-renders every display in the new units.
    ///
    /// Links and selection are left untouched.
    pub fn on_unit_config_changed(&mut self, config: MeasureConfig) {
        debug!(?config, "unit configuration changed");
        self.config = config;
        for display in self.links.displays_mut() {
            display.update(&self.config);
            for i in 0..display.overlay_count() {
                if let Some(overlay) = display.overlay_at(i) {
                    self.scene.add_object(overlay);
                }
            }
        }
        self.refresh_text();
        self.request_size();
        self.scene.redraw();
    }

    #[must_use]
    pub fn measure_type(&self) -> MeasureType {
        self.measure_type
    }

    #[must_use]
    pub fn is_measure_on(&self) -> bool {
        self.measure_on
    }

    #[must_use]
    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// The result panel text.
    #[must_use]
    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    /// Diagnostic of the last failed measurement of the latest selection change.
    #[must_use]
    pub fn last_error(&self) -> Option<&MeasureError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    fn displayed_objects(&self) -> Vec<GraphicsObject> {
        let mut objects = Vec::new();
        self.scene
            .foreach_displayed_object(&mut |object| objects.push(*object));
        objects
    }

    fn rearm(&mut self) {
        let objects = self.displayed_objects();
        self.driver = if self.measure_on {
            self.registry.first_responder(&objects, self.measure_type)
        } else {
            None
        };

        self.scene.clear_selection();
        self.selection.clear();
        self.drop_displays();
        self.last_error = None;

        let modes = match (self.measure_on, self.active_driver()) {
            (false, _) => vec![SelectionMode::Object],
            (true, Some(driver)) => driver.selection_modes(self.measure_type),
            (true, None) => {
                if self.measure_type != MeasureType::None {
                    debug!(measure_type = ?self.measure_type, "no driver supports the displayed objects");
                }
                Vec::new()
            }
        };
        for object in &objects {
            self.scene.deactivate_object_selection(object.id);
            for &mode in &modes {
                self.scene.activate_object_selection(object.id, mode);
            }
        }

        self.refresh_text();
        self.request_size();
        self.scene.redraw();
    }

    fn active_driver(&self) -> Option<&dyn MeasureDriver> {
        self.driver.and_then(|index| self.registry.get(index))
    }

    fn request_size(&mut self) {
        if let Some(handler) = self.size_handler.as_mut() {
            handler();
        }
    }

    /// Runs the active measurement on `owners` and builds its display.
    fn measure(&self, owners: &[GraphicsOwner]) -> MeasureResult<Box<dyn MeasureDisplay>> {
        let Some(first) = owners.first() else {
            return Err(MeasureError::not_applicable("Nothing is picked"));
        };
        let driver = self
            .active_driver()
            .ok_or_else(|| MeasureError::not_applicable("No driver supports the displayed objects"))?;
        let second = || {
            owners
                .get(1)
                .ok_or_else(|| MeasureError::not_applicable("Two entities must be picked"))
        };
        let display: Box<dyn MeasureDisplay> = match self.measure_type {
            MeasureType::None => {
                return Err(MeasureError::not_applicable("No measurement is active"));
            }
            MeasureType::VertexPosition => Box::new(VertexDisplay::new(driver.vertex_position(first)?)),
            MeasureType::CircleCenter => Box::new(CircleCenterDisplay::new(driver.circle(first)?.circle)),
            MeasureType::CircleDiameter => {
                let circle = driver.circle(first)?;
                Box::new(CircleDiameterDisplay::new(circle.circle, circle.anchor))
            }
            MeasureType::MinDistance => {
                let info = driver.min_distance(first, second()?)?;
                Box::new(MinDistanceDisplay::new(info.point_a, info.point_b, info.distance))
            }
            MeasureType::Angle => Box::new(AngleDisplay::new(driver.angle(first, second()?)?)),
            MeasureType::Length => Box::new(LengthDisplay::new(driver.length(owners)?)),
            MeasureType::SurfaceArea => Box::new(SurfaceAreaDisplay::new(driver.surface_area(owners)?)),
        };
        Ok(display)
    }

    fn accept(&mut self, outcome: MeasureResult<Box<dyn MeasureDisplay>>, owners: &[GraphicsOwner]) {
        match outcome {
            Ok(mut display) => {
                display.update(&self.config);
                for i in 0..display.overlay_count() {
                    if let Some(overlay) = display.overlay_at(i) {
                        self.scene.add_object(overlay);
                    }
                }
                let id = self.links.insert(display, owners);
                debug!(?id, links = owners.len(), "display created");
            }
            Err(error) => {
                match &error {
                    MeasureError::NotApplicable(message) => {
                        debug!(measure_type = ?self.measure_type, %message, "measurement not applicable");
                    }
                    MeasureError::ComputationFailed(message) => {
                        warn!(measure_type = ?self.measure_type, %message, "measurement failed");
                    }
                    MeasureError::Unimplemented(message) => {
                        info!(measure_type = ?self.measure_type, %message, "measurement not implemented");
                    }
                }
                self.last_error = Some(error);
            }
        }
    }

    fn retract(&mut self, display: &dyn MeasureDisplay) {
        for i in 0..display.overlay_count() {
            if let Some(overlay) = display.overlay_at(i) {
                self.scene.remove_object(overlay.id);
            }
        }
    }

    fn drop_displays(&mut self) {
        for display in self.links.clear() {
            self.retract(display.as_ref());
        }
    }

    fn refresh_text(&mut self) {
        let texts: Vec<&str> = self
            .links
            .displays()
            .map(|(_, d)| d.text())
            .filter(|t| !t.is_empty())
            .collect();
        self.result_text = texts.join("\n");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Circle;
    use crate::math::{Placement, Point3, Vector3};
    use crate::measure::scene::{ObjectId, ObjectSource};
    use crate::measure::test_support::{init_tracing, MeshDriver, RecordingScene};
    use crate::measure::unit::LengthUnit;
    use crate::operations::creation::{MakeBox, MakeEdge};
    use crate::topology::{Shape, TopologyStore, VertexData};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    struct Fixture {
        controller: MeasureController<RecordingScene>,
        vertex: GraphicsOwner,
        vertex_b: GraphicsOwner,
        line: GraphicsOwner,
        other_line: GraphicsOwner,
        arc: GraphicsOwner,
        box_a: GraphicsOwner,
        box_b: GraphicsOwner,
    }

    const PARTS: ObjectId = ObjectId(1);
    const BOX_A: ObjectId = ObjectId(2);
    const BOX_B: ObjectId = ObjectId(3);
    const MESH: ObjectId = ObjectId(4);

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn fixture() -> Fixture {
        init_tracing();
        let mut store = TopologyStore::new();
        let v = store.add_vertex(VertexData::new(p(1.0, 2.0, 3.0)));
        let w = store.add_vertex(VertexData::new(p(4.0, 5.0, 6.0)));
        let line = MakeEdge::segment(p(0.0, 0.0, 0.0), p(3.0, 4.0, 0.0)).execute(&mut store).unwrap();
        let other = MakeEdge::segment(p(0.0, 0.0, 0.0), p(0.0, 0.0, 2.0)).execute(&mut store).unwrap();
        let circle = Circle::new(p(0.0, 0.0, 0.0), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let arc = MakeEdge::circle(circle).execute(&mut store).unwrap();
        let a = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)).execute(&mut store).unwrap();
        let b = MakeBox::new(p(0.0, 0.0, 4.0), p(1.0, 1.0, 5.0)).execute(&mut store).unwrap();

        let scene = RecordingScene::with_objects(vec![
            GraphicsObject {
                id: PARTS,
                source: ObjectSource::Brep { root: Shape::Vertex(v) },
            },
            GraphicsObject {
                id: BOX_A,
                source: ObjectSource::Brep { root: Shape::Solid(a) },
            },
            GraphicsObject {
                id: BOX_B,
                source: ObjectSource::Brep { root: Shape::Solid(b) },
            },
            GraphicsObject {
                id: MESH,
                source: ObjectSource::Mesh,
            },
        ]);
        let registry = DriverRegistry::with_shape_driver(Arc::new(store));
        let owner = |object, shape: Shape| GraphicsOwner::new(object, shape, Placement::identity());
        Fixture {
            controller: MeasureController::new(scene, registry),
            vertex: owner(PARTS, Shape::Vertex(v)),
            vertex_b: owner(PARTS, Shape::Vertex(w)),
            line: owner(PARTS, Shape::Edge(line)),
            other_line: owner(PARTS, Shape::Edge(other)),
            arc: owner(PARTS, Shape::Edge(arc)),
            box_a: owner(BOX_A, Shape::Solid(a)),
            box_b: owner(BOX_B, Shape::Solid(b)),
        }
    }

    fn select(controller: &mut MeasureController<RecordingScene>, owner: GraphicsOwner) {
        controller.scene_mut().select(owner);
        controller.on_selection_changed();
    }

    fn deselect(controller: &mut MeasureController<RecordingScene>, owner: &GraphicsOwner) {
        controller.scene_mut().deselect(owner);
        controller.on_selection_changed();
    }

    #[test]
    fn mode_change_programs_selection_filters() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::MinDistance);
        let scene = f.controller.scene();
        let all = [SelectionMode::Vertex, SelectionMode::Edge, SelectionMode::Face];
        assert_eq!(scene.modes_of(BOX_A), &all);
        // The elected driver programs every displayed object alike.
        assert_eq!(scene.modes_of(MESH), &all);

        f.controller.on_mode_changed(MeasureType::SurfaceArea);
        assert_eq!(f.controller.scene().modes_of(BOX_A), &[SelectionMode::Face]);

        f.controller.on_mode_changed(MeasureType::None);
        assert!(f.controller.scene().modes_of(BOX_A).is_empty());
    }

    #[test]
    fn vertex_position_in_millimeters() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::VertexPosition);
        select(&mut f.controller, f.vertex);
        assert_eq!(f.controller.result_text(), "(1 2 3)mm");
        assert_eq!(f.controller.scene().overlay_texts(), vec!["(1 2 3)mm".to_string()]);
        assert_eq!(f.controller.links().link_count(), 1);
    }

    #[test]
    fn min_distance_between_solids() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::MinDistance);
        select(&mut f.controller, f.box_a);
        assert_eq!(f.controller.result_text(), "");
        select(&mut f.controller, f.box_b);
        assert_eq!(f.controller.result_text(), "Min Distance: 3mm");
        assert_eq!(f.controller.links().display_count(), 1);
        assert_eq!(f.controller.links().link_count(), 2);
        assert_eq!(f.controller.scene().overlays.len(), 1);
    }

    #[test]
    fn deselecting_either_entity_drops_min_distance() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::MinDistance);
        select(&mut f.controller, f.box_a);
        select(&mut f.controller, f.box_b);
        deselect(&mut f.controller, &f.box_a);
        assert!(f.controller.links().is_empty());
        assert_eq!(f.controller.links().link_count(), 0);
        assert!(f.controller.scene().overlays.is_empty());
        assert_eq!(f.controller.result_text(), "");
    }

    #[test]
    fn pair_needs_exactly_two_entities() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::MinDistance);
        select(&mut f.controller, f.box_a);
        select(&mut f.controller, f.box_b);
        select(&mut f.controller, f.vertex);
        assert_eq!(f.controller.links().display_count(), 1);
        assert_eq!(f.controller.result_text(), "Min Distance: 3mm");
    }

    #[test]
    fn unit_change_keeps_links_and_rescales_text() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::VertexPosition);
        select(&mut f.controller, f.vertex);
        let links_before = f.controller.links().link_count();
        let cm = MeasureConfig {
            length_unit: LengthUnit::Centimeter,
            ..MeasureConfig::default()
        };
        f.controller.on_unit_config_changed(cm);
        assert_eq!(f.controller.links().link_count(), links_before);
        assert_eq!(f.controller.links().display_count(), 1);
        assert_eq!(f.controller.result_text(), "(0.1 0.2 0.3)cm");
        assert_eq!(f.controller.scene().overlay_texts(), vec!["(0.1 0.2 0.3)cm".to_string()]);
    }

    #[test]
    fn one_display_per_selected_entity() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::CircleDiameter);
        select(&mut f.controller, f.arc);
        assert_eq!(f.controller.result_text(), "Diameter: 4mm");
        assert_eq!(f.controller.scene().overlays.len(), 3);
        deselect(&mut f.controller, &f.arc);
        assert!(f.controller.scene().overlays.is_empty());
    }

    #[test]
    fn not_applicable_input_creates_no_display() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::CircleCenter);
        select(&mut f.controller, f.line);
        assert!(f.controller.links().is_empty());
        assert_eq!(
            f.controller.last_error(),
            Some(&MeasureError::not_applicable("Picked entity must be a circular edge"))
        );
        select(&mut f.controller, f.arc);
        assert!(f.controller.last_error().is_none());
        assert_eq!(f.controller.result_text(), "(0 0 0)mm");
    }

    #[test]
    fn length_aggregates_whole_selection() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::Length);
        select(&mut f.controller, f.line);
        assert_eq!(f.controller.result_text(), "Length: 5mm");
        select(&mut f.controller, f.other_line);
        assert_eq!(f.controller.result_text(), "Length: 7mm");
        assert_eq!(f.controller.links().display_count(), 1);
        assert_eq!(f.controller.links().link_count(), 2);
        deselect(&mut f.controller, &f.line);
        assert_eq!(f.controller.result_text(), "Length: 2mm");
        assert_eq!(f.controller.links().link_count(), 1);
    }

    #[test]
    fn batch_with_non_edge_fails_whole() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::Length);
        select(&mut f.controller, f.line);
        select(&mut f.controller, f.vertex);
        assert!(f.controller.links().is_empty());
        assert_eq!(f.controller.result_text(), "");
        assert!(matches!(f.controller.last_error(), Some(MeasureError::NotApplicable(_))));
    }

    #[test]
    fn angle_between_two_lines() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::Angle);
        select(&mut f.controller, f.line);
        select(&mut f.controller, f.other_line);
        assert_eq!(f.controller.result_text(), "Angle: 90deg");
    }

    #[test]
    fn texts_join_with_newlines() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::VertexPosition);
        select(&mut f.controller, f.vertex);
        select(&mut f.controller, f.vertex_b);
        assert_eq!(f.controller.result_text(), "(1 2 3)mm\n(4 5 6)mm");
        select(&mut f.controller, f.box_a);
        assert_eq!(f.controller.result_text(), "(1 2 3)mm\n(4 5 6)mm");
        deselect(&mut f.controller, &f.vertex);
        assert_eq!(f.controller.result_text(), "(4 5 6)mm");
    }

    #[test]
    fn mode_change_discards_selection_and_displays() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::VertexPosition);
        select(&mut f.controller, f.vertex);
        f.controller.on_mode_changed(MeasureType::Length);
        assert!(f.controller.scene().selected.is_empty());
        assert!(f.controller.scene().overlays.is_empty());
        assert!(f.controller.links().is_empty());
        assert_eq!(f.controller.result_text(), "");
    }

    #[test]
    fn switching_off_restores_object_picking() {
        let mut f = fixture();
        f.controller.on_mode_changed(MeasureType::Length);
        select(&mut f.controller, f.line);
        f.controller.set_measure_on(false);
        assert!(!f.controller.is_measure_on());
        assert_eq!(f.controller.scene().modes_of(BOX_A), &[SelectionMode::Object]);
        assert!(f.controller.links().is_empty());

        f.controller.scene_mut().select(f.line);
        f.controller.on_selection_changed();
        assert!(f.controller.links().is_empty());

        f.controller.set_measure_on(true);
        assert_eq!(f.controller.scene().modes_of(BOX_A), &[SelectionMode::Edge]);
    }

    #[test]
    fn size_handler_runs_on_mode_and_selection_changes() {
        let mut f = fixture();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        f.controller.set_size_handler(move || counter.set(counter.get() + 1));
        f.controller.on_mode_changed(MeasureType::VertexPosition);
        assert_eq!(calls.get(), 1);
        select(&mut f.controller, f.vertex);
        deselect(&mut f.controller, &f.vertex);
        assert_eq!(calls.get(), 3);
        f.controller.set_measure_on(false);
        assert_eq!(calls.get(), 4);
        let redraws = f.controller.scene().redraws;
        assert!(redraws >= 4);
    }

    fn mesh_object() -> GraphicsObject {
        GraphicsObject {
            id: MESH,
            source: ObjectSource::Mesh,
        }
    }

    #[test]
    fn scene_without_supported_objects_has_no_driver() {
        init_tracing();
        let scene = RecordingScene::with_objects(vec![mesh_object()]);
        let registry = DriverRegistry::with_shape_driver(Arc::new(TopologyStore::new()));
        let mut controller = MeasureController::new(scene, registry);
        controller.on_mode_changed(MeasureType::VertexPosition);
        assert!(controller.scene().modes_of(MESH).is_empty());

        let f = fixture();
        select(&mut controller, f.vertex);
        assert!(controller.links().is_empty());
        assert_eq!(
            controller.last_error().map(MeasureError::message),
            Some("No driver supports the displayed objects")
        );
    }

    #[test]
    fn first_object_with_a_driver_elects_it_for_the_whole_scene() {
        let mut f = fixture();
        f.controller.register_driver(Box::new(MeshDriver));
        f.controller.on_mode_changed(MeasureType::SurfaceArea);
        let scene = f.controller.scene();
        assert_eq!(scene.modes_of(BOX_A), &[SelectionMode::Face]);
        assert_eq!(scene.modes_of(MESH), &[SelectionMode::Face]);

        // With the mesh listed first, the mesh driver serves B-rep picks too.
        let objects = f.controller.scene().objects.clone();
        let mut reordered = vec![mesh_object()];
        reordered.extend(objects.into_iter().filter(|o| o.id != MESH));
        f.controller.scene_mut().objects = reordered;
        f.controller.on_mode_changed(MeasureType::SurfaceArea);
        let scene = f.controller.scene();
        assert_eq!(scene.modes_of(BOX_A), &[SelectionMode::Object]);
        assert_eq!(scene.modes_of(MESH), &[SelectionMode::Object]);
        select(&mut f.controller, f.box_a);
        assert_eq!(f.controller.result_text(), "Area: 1mm²");
    }
}
