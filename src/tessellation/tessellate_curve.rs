use crate::error::Result;
use crate::math::Point3;
use crate::topology::{EdgeCurve, EdgeId, OrientedEdge, TopologyStore, WireId};

use super::{Polyline, TessellationParams};

/// Tessellates a curve (edge) into a polyline.
pub struct TessellateCurve {
    edge: EdgeId,
    params: TessellationParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(edge: EdgeId, params: TessellationParams) -> Self {
        Self { edge, params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// The polyline starts at the edge's start vertex and ends at its end
    /// vertex; a full circle therefore repeats its first point.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing or cannot be evaluated.
    pub fn execute(&self, store: &TopologyStore) -> Result<Polyline> {
        let mut points = Vec::new();
        sample_edge(store, OrientedEdge::new(self.edge, true), &self.params, true, &mut points)?;
        Ok(Polyline { points })
    }
}

/// Collects the points of a closed wire without repeating the closing point.
pub(crate) fn collect_wire_points(
    store: &TopologyStore,
    wire_id: WireId,
    params: &TessellationParams,
) -> Result<Vec<Point3>> {
    let wire = store.wire(wire_id)?;
    let mut points = Vec::new();
    for oe in &wire.edges {
        sample_edge(store, *oe, params, false, &mut points)?;
    }
    Ok(points)
}

/// Appends samples of an oriented edge to `points`.
///
/// The last sample is only pushed when `include_last` is set, so that
/// consecutive edges of a wire do not duplicate their shared vertex.
pub(crate) fn sample_edge(
    store: &TopologyStore,
    oe: OrientedEdge,
    params: &TessellationParams,
    include_last: bool,
    points: &mut Vec<Point3>,
) -> Result<()> {
    let edge = store.edge(oe.edge)?;
    let (t_start, t_end) = oe.parameter_range(edge);

    let n = segment_count(&edge.curve, t_start, t_end, params);
    let curve = edge.curve.as_curve();
    for i in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let frac = i as f64 / n as f64;
        points.push(curve.evaluate(t_start + frac * (t_end - t_start))?);
    }
    if include_last {
        points.push(curve.evaluate(t_end)?);
    }
    Ok(())
}

/// Number of polyline segments used for a curve over `[t_start, t_end]`.
fn segment_count(curve: &EdgeCurve, t_start: f64, t_end: f64, params: &TessellationParams) -> usize {
    let sweep = (t_end - t_start).abs();
    match curve {
        EdgeCurve::Line(_) => 1,
        EdgeCurve::Circle(circle) => adaptive_angular_segments(circle.radius(), sweep, params),
        EdgeCurve::Ellipse(ellipse) => {
            adaptive_angular_segments(ellipse.semi_major(), sweep, params)
        }
        // Eight segments per non-empty knot span.
        EdgeCurve::BSpline(spline) => {
            let spans = spline.control_points().len() - spline.degree();
            (spans * 8).clamp(params.min_segments, params.max_segments)
        }
    }
}

/// Computes the number of segments for an angular parameter range based on chord error.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn adaptive_angular_segments(
    radius: f64,
    sweep: f64,
    params: &TessellationParams,
) -> usize {
    if radius > params.tolerance {
        let half_angle = (1.0 - params.tolerance / radius).acos();
        let computed = (sweep / (2.0 * half_angle)).ceil() as usize;
        computed.clamp(params.min_segments, params.max_segments)
    } else {
        params.min_segments
    }
}
