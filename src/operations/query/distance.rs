use crate::error::{OperationError, Result};
use crate::math::distance_3d::{
    closest_point_on_segment, closest_point_on_triangle, closest_points_segment_segment,
    closest_points_segment_triangle, closest_points_triangle_triangle,
};
use crate::math::{Placement, Point3};
use crate::tessellation::{sample_edge, TessellateFace, TessellationParams};
use crate::topology::{OrientedEdge, Shape, TopologyStore};

/// Minimum distance between two shapes, with one pair of witness points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceResult {
    /// Closest point on the first shape, in world coordinates.
    pub point_a: Point3,
    /// Closest point on the second shape, in world coordinates.
    pub point_b: Point3,
    /// Distance between the witness points.
    pub distance: f64,
}

/// Computes the minimum distance between two placed shapes.
///
/// Each shape is reduced to its highest-dimensional primitives (triangles of
/// its faces, otherwise segments of its edges, otherwise its vertices) and
/// every primitive pair is solved exactly. Curved geometry is only as
/// accurate as its tessellation.
pub struct DistanceShapeShape {
    shape_a: Shape,
    placement_a: Placement,
    shape_b: Shape,
    placement_b: Placement,
    params: TessellationParams,
}

impl DistanceShapeShape {
    /// Creates a new `DistanceShapeShape` query with default tessellation parameters.
    #[must_use]
    pub fn new(shape_a: Shape, placement_a: Placement, shape_b: Shape, placement_b: Placement) -> Self {
        Self {
            shape_a,
            placement_a,
            shape_b,
            placement_b,
            params: TessellationParams::default(),
        }
    }

    /// Sets custom tessellation parameters for higher accuracy.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if a shape is missing, has no geometry, or the
    /// search yields no finite distance.
    pub fn execute(&self, store: &TopologyStore) -> Result<DistanceResult> {
        let a = primitives(store, self.shape_a, &self.placement_a, &self.params)?;
        let b = primitives(store, self.shape_b, &self.placement_b, &self.params)?;
        if a.is_empty() || b.is_empty() {
            return Err(OperationError::Failed("shape has no geometry to measure".into()).into());
        }

        let mut best: Option<(Point3, Point3)> = None;
        let mut best_sq = f64::INFINITY;
        for pa in &a {
            for pb in &b {
                if pa.bounds.distance_squared(&pb.bounds) >= best_sq {
                    continue;
                }
                let (on_a, on_b) = closest_pair(&pa.kind, &pb.kind);
                let d_sq = (on_a - on_b).norm_squared();
                if d_sq < best_sq {
                    best_sq = d_sq;
                    best = Some((on_a, on_b));
                }
            }
        }

        match best {
            Some((point_a, point_b)) if best_sq.is_finite() => Ok(DistanceResult {
                point_a,
                point_b,
                distance: best_sq.sqrt(),
            }),
            _ => Err(OperationError::NotConverged("no finite distance found".into()).into()),
        }
    }
}

enum PrimitiveKind {
    Point(Point3),
    Segment(Point3, Point3),
    Triangle([Point3; 3]),
}

struct Primitive {
    kind: PrimitiveKind,
    bounds: Aabb,
}

impl Primitive {
    fn new(kind: PrimitiveKind) -> Self {
        let bounds = match &kind {
            PrimitiveKind::Point(p) => Aabb::of(std::slice::from_ref(p)),
            PrimitiveKind::Segment(p, q) => Aabb::of(&[*p, *q]),
            PrimitiveKind::Triangle(t) => Aabb::of(t),
        };
        Self { kind, bounds }
    }
}

#[derive(Debug, Clone, Copy)]
struct Aabb {
    min: Point3,
    max: Point3,
}

impl Aabb {
    fn of(points: &[Point3]) -> Self {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min = min.inf(p);
            max = max.sup(p);
        }
        Self { min, max }
    }

    /// Squared gap between two boxes; zero when they overlap.
    fn distance_squared(&self, other: &Self) -> f64 {
        (0..3)
            .map(|i| {
                let gap = (other.min[i] - self.max[i]).max(self.min[i] - other.max[i]).max(0.0);
                gap * gap
            })
            .sum()
    }
}

fn primitives(
    store: &TopologyStore,
    shape: Shape,
    placement: &Placement,
    params: &TessellationParams,
) -> Result<Vec<Primitive>> {
    let sub = store.explore(shape)?;
    let mut out = Vec::new();

    if !sub.faces.is_empty() {
        for face in sub.faces {
            let mesh = TessellateFace::new(face, *params).execute(store)?;
            out.extend(mesh.triangles().map(|[a, b, c]| {
                Primitive::new(PrimitiveKind::Triangle([
                    placement * a,
                    placement * b,
                    placement * c,
                ]))
            }));
        }
    } else if !sub.edges.is_empty() {
        for edge in sub.edges {
            let mut points = Vec::new();
            sample_edge(store, OrientedEdge::new(edge, true), params, true, &mut points)?;
            out.extend(points.windows(2).map(|w| {
                Primitive::new(PrimitiveKind::Segment(placement * w[0], placement * w[1]))
            }));
        }
    } else {
        for vertex in sub.vertices {
            let point = store.vertex(vertex)?.point;
            out.push(Primitive::new(PrimitiveKind::Point(placement * point)));
        }
    }

    Ok(out)
}

fn closest_pair(a: &PrimitiveKind, b: &PrimitiveKind) -> (Point3, Point3) {
    use PrimitiveKind::{Point, Segment, Triangle};
    match (a, b) {
        (Point(p), Point(q)) => (*p, *q),
        (Point(p), Segment(q0, q1)) => (*p, closest_point_on_segment(p, q0, q1)),
        (Point(p), Triangle(t)) => (*p, closest_point_on_triangle(p, &t[0], &t[1], &t[2])),
        (Segment(p0, p1), Segment(q0, q1)) => closest_points_segment_segment(p0, p1, q0, q1),
        (Segment(p0, p1), Triangle(t)) => {
            closest_points_segment_triangle(p0, p1, &t[0], &t[1], &t[2])
        }
        (Triangle(s), Triangle(t)) => closest_points_triangle_triangle(s, t),
        (Segment(..) | Triangle(_), Point(_)) | (Triangle(_), Segment(..)) => {
            let (on_b, on_a) = closest_pair(b, a);
            (on_a, on_b)
        }
    }
}
