use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::geometry::surface::{Plane, Surface, SurfaceDomain};
use crate::math::{Point3, Vector3};
use crate::topology::{FaceBounds, FaceId, FaceSurface, TopologyStore, WireId};

use super::tessellate_curve::{adaptive_angular_segments, collect_wire_points};
use super::{TessellationParams, TriangleMesh};

/// Tessellates a face into a triangle mesh.
pub struct TessellateFace {
    face: FaceId,
    params: TessellationParams,
}

impl TessellateFace {
    /// Creates a new `TessellateFace` operation.
    #[must_use]
    pub fn new(face: FaceId, params: TessellationParams) -> Self {
        Self { face, params }
    }

    /// Executes the tessellation, returning a triangle mesh.
    ///
    /// Loop-bounded faces are triangulated with a constrained Delaunay
    /// triangulation of their projected boundary. Patch faces are sampled
    /// on a regular parameter grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the face cannot be tessellated.
    pub fn execute(&self, store: &TopologyStore) -> Result<TriangleMesh> {
        let face = store.face(self.face)?;
        let same_sense = face.same_sense;

        match (&face.bounds, &face.surface) {
            (FaceBounds::Loops { outer, inner }, FaceSurface::Plane(plane)) => {
                tessellate_plane(store, plane, same_sense, *outer, inner, &self.params)
            }
            (FaceBounds::Loops { .. }, _) => Err(TessellationError::Failed(
                "loop-bounded faces must lie on a plane".into(),
            )
            .into()),
            (FaceBounds::Patch(domain), surface) => {
                if !domain.is_bounded() {
                    return Err(TessellationError::InvalidParameters(
                        "patch domain must be bounded".into(),
                    )
                    .into());
                }
                let (n_u, n_v) = patch_resolution(surface, domain, &self.params);
                tessellate_uv_grid(surface.as_surface(), domain, n_u, n_v, same_sense)
            }
        }
    }
}

/// Grid resolution for a parametric patch.
///
/// Straight parameter directions need a single cell.
fn patch_resolution(
    surface: &FaceSurface,
    domain: &SurfaceDomain,
    params: &TessellationParams,
) -> (usize, usize) {
    let du = domain.u_max - domain.u_min;
    let dv = domain.v_max - domain.v_min;
    match surface {
        FaceSurface::Plane(_) => (1, 1),
        FaceSurface::Cylinder(cyl) => (adaptive_angular_segments(cyl.radius(), du, params), 1),
        FaceSurface::Sphere(sph) => (
            adaptive_angular_segments(sph.radius(), du, params),
            adaptive_angular_segments(sph.radius(), dv, params),
        ),
    }
}

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a planar face bounded by an outer loop and holes.
///
/// Boundary samples are projected onto the plane's `(u, v)` frame, inserted
/// as constraint loops, and the triangles at odd constraint depth are kept.
#[allow(clippy::cast_possible_truncation)]
fn tessellate_plane(
    store: &TopologyStore,
    plane: &Plane,
    same_sense: bool,
    outer: WireId,
    holes: &[WireId],
    params: &TessellationParams,
) -> Result<TriangleMesh> {
    let to_plane = |p: &Point3| {
        let uv = plane.project(p);
        SpadePoint2::new(uv.x, uv.y)
    };

    let mut cdt = Cdt::new();
    for wire in std::iter::once(&outer).chain(holes) {
        let loop_2d: Vec<_> = collect_wire_points(store, *wire, params)?
            .iter()
            .map(to_plane)
            .collect();
        insert_constraint_loop(&mut cdt, &loop_2d)?;
    }
    let inside = interior_faces(&cdt);

    let normal = if same_sense {
        *plane.plane_normal()
    } else {
        -*plane.plane_normal()
    };
    let mut mesh = TriangleMesh::default();
    let mut mesh_index: HashMap<usize, u32> = HashMap::new();
    for face in cdt.inner_faces().filter(|f| inside.contains(&f.fix().index())) {
        let mut triangle = face.vertices().map(|vh| {
            *mesh_index.entry(vh.fix().index()).or_insert_with(|| {
                let q = vh.position();
                mesh.vertices.push(plane.point_at(q.x, q.y));
                mesh.normals.push(normal);
                (mesh.vertices.len() - 1) as u32
            })
        });
        if !same_sense {
            triangle.swap(1, 2);
        }
        mesh.indices.push(triangle);
    }

    if mesh.indices.is_empty() {
        return Err(TessellationError::Failed("planar face produced no triangles".into()).into());
    }
    Ok(mesh)
}

/// Samples a bounded patch on an `n_u x n_v` parameter grid, two triangles
/// per cell.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn tessellate_uv_grid(
    surface: &dyn Surface,
    domain: &SurfaceDomain,
    n_u: usize,
    n_v: usize,
    same_sense: bool,
) -> Result<TriangleMesh> {
    let cols = n_u + 1;
    let mut mesh = TriangleMesh::default();
    for iv in 0..=n_v {
        let v = domain.v_min + (domain.v_max - domain.v_min) * iv as f64 / n_v as f64;
        for iu in 0..=n_u {
            let u = domain.u_min + (domain.u_max - domain.u_min) * iu as f64 / n_u as f64;
            mesh.vertices.push(surface.evaluate(u, v)?);
            // Sphere poles have no defined normal.
            let n = surface.normal(u, v).unwrap_or_else(|_| Vector3::z());
            mesh.normals.push(if same_sense { n } else { -n });
        }
    }

    let at = |iu: usize, iv: usize| (iv * cols + iu) as u32;
    for iv in 0..n_v {
        for iu in 0..n_u {
            let quad = [at(iu, iv), at(iu + 1, iv), at(iu + 1, iv + 1), at(iu, iv + 1)];
            let (first, second) = ([quad[0], quad[1], quad[2]], [quad[0], quad[2], quad[3]]);
            if same_sense {
                mesh.indices.extend([first, second]);
            } else {
                mesh.indices.extend([[first[0], first[2], first[1]], [second[0], second[2], second[1]]]);
            }
        }
    }
    Ok(mesh)
}

/// Inserts a closed polygon and constrains each of its sides.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }
    let handles = points
        .iter()
        .map(|&q| {
            cdt.insert(q)
                .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    for (from, to) in handles.iter().zip(handles.iter().cycle().skip(1)) {
        if from != to {
            cdt.add_constraint(*from, *to);
        }
    }
    Ok(())
}

/// Indices of the inner CDT faces lying inside the constrained loops.
///
/// A breadth-first walk starts next to the outer face; crossing a
/// constraint edge flips inside/outside.
fn interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut inside_of: HashMap<usize, bool> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, bool)> = VecDeque::new();
    let outer = cdt.outer_face().fix();

    let seeds = cdt
        .directed_edges()
        .filter(|e| e.face().fix() == outer)
        .filter_map(|e| e.rev().face().as_inner().map(|f| (f, e.as_undirected().fix())));
    for (face, edge) in seeds {
        let inside = cdt.is_constraint_edge(edge);
        if inside_of.insert(face.fix().index(), inside).is_none() {
            queue.push_back((face.fix(), inside));
        }
    }

    while let Some((face, inside)) = queue.pop_front() {
        for edge in cdt.face(face).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let index = neighbor.fix().index();
            if inside_of.contains_key(&index) {
                continue;
            }
            let flipped = inside ^ cdt.is_constraint_edge(edge.as_undirected().fix());
            inside_of.insert(index, flipped);
            queue.push_back((neighbor.fix(), flipped));
        }
    }

    inside_of
        .into_iter()
        .filter_map(|(index, inside)| inside.then_some(index))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Circle;
    use crate::geometry::surface::{Cylinder, Sphere};
    use crate::operations::creation::{MakeEdge, MakeFace, MakeWire};
    use crate::topology::OrientedEdge;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn polygon(store: &mut TopologyStore, corners: &[(f64, f64)]) -> WireId {
        let points = corners.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect();
        MakeWire::new(points, true).execute(store).unwrap()
    }

    fn mesh_of(store: &TopologyStore, face: FaceId) -> TriangleMesh {
        TessellateFace::new(face, TessellationParams::default())
            .execute(store)
            .unwrap()
    }

    fn centroids(mesh: &TriangleMesh) -> Vec<Point3> {
        mesh.triangles()
            .map(|[a, b, c]| Point3::from((a.coords + b.coords + c.coords) / 3.0))
            .collect()
    }

    #[test]
    fn clockwise_triangle_faces_down() {
        let mut store = TopologyStore::new();
        let wire = polygon(&mut store, &[(0.0, 0.0), (2.0, 3.0), (4.0, 0.0)]);
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
        let mesh = mesh_of(&store, face);
        assert_eq!((mesh.indices.len(), mesh.vertices.len()), (1, 3));
        for n in &mesh.normals {
            assert_abs_diff_eq!((n + Vector3::z()).norm(), 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(mesh.area(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn notch_of_concave_outline_stays_empty() {
        let mut store = TopologyStore::new();
        let wire = polygon(
            &mut store,
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0), (2.0, 4.0), (0.0, 4.0)],
        );
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
        let mesh = mesh_of(&store, face);
        assert!(centroids(&mesh).iter().all(|c| c.x < 2.0 || c.y < 2.0));
        assert_abs_diff_eq!(mesh.area(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn holes_are_cut_out() {
        let mut store = TopologyStore::new();
        let outer = polygon(&mut store, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let left = polygon(&mut store, &[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let right = polygon(&mut store, &[(6.0, 6.0), (9.0, 6.0), (9.0, 9.0), (6.0, 9.0)]);
        let face = MakeFace::new(outer, vec![left, right]).execute(&mut store).unwrap();
        let mesh = mesh_of(&store, face);
        let inside = |c: &Point3, lo: f64, hi: f64| c.x > lo && c.x < hi && c.y > lo && c.y < hi;
        for c in centroids(&mesh) {
            assert!(!inside(&c, 1.0, 3.0) && !inside(&c, 6.0, 9.0), "{c:?} lies in a hole");
        }
        assert_abs_diff_eq!(mesh.area(), 100.0 - 4.0 - 9.0, epsilon = 1e-9);
    }

    #[test]
    fn circular_boundary_gives_inscribed_disc() {
        let mut store = TopologyStore::new();
        let circle = Circle::new(Point3::new(5.0, 5.0, 0.0), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let edge = MakeEdge::circle(circle).execute(&mut store).unwrap();
        let wire = MakeWire::from_edges(vec![OrientedEdge::new(edge, true)])
            .execute(&mut store)
            .unwrap();
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
        let area = mesh_of(&store, face).area();
        assert!(area < 4.0 * PI && area > 4.0 * PI * 0.99, "area {area}");
    }

    #[test]
    fn half_cylinder_grid_hugs_the_surface() {
        let mut store = TopologyStore::new();
        let cyl = Cylinder::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap();
        let face = MakeFace::patch(FaceSurface::Cylinder(cyl), SurfaceDomain::new(0.0, PI, 0.0, 3.0))
            .execute(&mut store)
            .unwrap();
        let mesh = mesh_of(&store, face);
        for v in &mesh.vertices {
            assert_abs_diff_eq!(v.x.hypot(v.y), 1.0, epsilon = 1e-9);
            assert!(v.y >= -1e-9);
        }
        let area = mesh.area();
        assert!(area < 3.0 * PI && area > 3.0 * PI * 0.99, "area {area}");
    }

    #[test]
    fn sphere_grid_has_unit_normals_at_the_poles() {
        let mut store = TopologyStore::new();
        let sph = Sphere::new(Point3::origin(), 3.0, Vector3::z(), Vector3::x()).unwrap();
        let face = MakeFace::patch(
            FaceSurface::Sphere(sph),
            SurfaceDomain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2),
        )
        .execute(&mut store)
        .unwrap();
        let mesh = mesh_of(&store, face);
        for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
            assert_abs_diff_eq!(v.coords.norm(), 3.0, epsilon = 1e-9);
            assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-9);
        }
    }
}
