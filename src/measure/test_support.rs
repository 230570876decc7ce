//! In-memory scene double for controller tests.

use std::collections::HashMap;

use tracing_subscriber::EnvFilter;

use crate::error::{MeasureError, MeasureResult};
use crate::math::Point3;

use super::driver::{MeasureCircle, MeasureDriver, MinDistanceInfo};
use super::overlay::{Overlay, OverlayId};
use super::quantity::{QuantityAngle, QuantityArea, QuantityLength};
use super::scene::{
    GraphicsObject, GraphicsOwner, GraphicsScene, ObjectId, ObjectSource, SelectionMode,
};
use super::MeasureType;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records every command the controller sends to the viewport.
#[derive(Debug, Default)]
pub(crate) struct RecordingScene {
    pub objects: Vec<GraphicsObject>,
    pub selected: Vec<GraphicsOwner>,
    pub active_modes: HashMap<ObjectId, Vec<SelectionMode>>,
    pub overlays: HashMap<OverlayId, Overlay>,
    pub redraws: usize,
}

impl RecordingScene {
    pub(crate) fn with_objects(objects: Vec<GraphicsObject>) -> Self {
        Self {
            objects,
            ..Self::default()
        }
    }

    pub(crate) fn select(&mut self, owner: GraphicsOwner) {
        if !self.selected.contains(&owner) {
            self.selected.push(owner);
        }
    }

    pub(crate) fn deselect(&mut self, owner: &GraphicsOwner) {
        self.selected.retain(|o| o != owner);
    }

    pub(crate) fn modes_of(&self, object: ObjectId) -> &[SelectionMode] {
        self.active_modes.get(&object).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn overlay_texts(&self) -> Vec<String> {
        let mut texts: Vec<String> = self
            .overlays
            .values()
            .filter_map(|o| o.text().map(str::to_string))
            .collect();
        texts.sort();
        texts
    }
}

impl GraphicsScene for RecordingScene {
    fn foreach_displayed_object(&self, visitor: &mut dyn FnMut(&GraphicsObject)) {
        for object in &self.objects {
            visitor(object);
        }
    }

    fn foreach_selected_owner(&self, visitor: &mut dyn FnMut(&GraphicsOwner)) {
        for owner in &self.selected {
            visitor(owner);
        }
    }

    fn activate_object_selection(&mut self, object: ObjectId, mode: SelectionMode) {
        let modes = self.active_modes.entry(object).or_default();
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }

    fn deactivate_object_selection(&mut self, object: ObjectId) {
        self.active_modes.remove(&object);
    }

    fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn add_object(&mut self, overlay: &Overlay) {
        self.overlays.insert(overlay.id, overlay.clone());
    }

    fn remove_object(&mut self, overlay: OverlayId) {
        self.overlays.remove(&overlay);
    }

    fn redraw(&mut self) {
        self.redraws += 1;
    }
}

/// Serves mesh objects, for surface area only; every area is 1 mm².
pub(crate) struct MeshDriver;

impl MeasureDriver for MeshDriver {
    fn selection_modes(&self, _: MeasureType) -> Vec<SelectionMode> {
        vec![SelectionMode::Object]
    }
    fn supports_object(&self, object: &GraphicsObject) -> bool {
        object.source == ObjectSource::Mesh
    }
    fn supports_type(&self, measure_type: MeasureType) -> bool {
        measure_type == MeasureType::SurfaceArea
    }
    fn vertex_position(&self, _: &GraphicsOwner) -> MeasureResult<Point3> {
        Err(MeasureError::unimplemented("mesh"))
    }
    fn circle(&self, _: &GraphicsOwner) -> MeasureResult<MeasureCircle> {
        Err(MeasureError::unimplemented("mesh"))
    }
    fn min_distance(&self, _: &GraphicsOwner, _: &GraphicsOwner) -> MeasureResult<MinDistanceInfo> {
        Err(MeasureError::unimplemented("mesh"))
    }
    fn length(&self, _: &[GraphicsOwner]) -> MeasureResult<QuantityLength> {
        Err(MeasureError::unimplemented("mesh"))
    }
    fn angle(&self, _: &GraphicsOwner, _: &GraphicsOwner) -> MeasureResult<QuantityAngle> {
        Err(MeasureError::unimplemented("mesh"))
    }
    fn surface_area(&self, _: &[GraphicsOwner]) -> MeasureResult<QuantityArea> {
        Ok(QuantityArea::square_millimeters(1.0))
    }
}
