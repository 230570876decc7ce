//! Closest-point primitives between points, segments and triangles.
//!
//! Every function returns the witness points; callers take the distance
//! between them.

use super::{Point3, TOLERANCE};

/// Finds the point on segment `[a, b]` closest to `p`.
#[must_use]
pub fn closest_point_on_segment(p: &Point3, a: &Point3, b: &Point3) -> Point3 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return *a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Finds the pair of closest points between segments `[p1, q1]` and `[p2, q2]`.
///
/// Returns `(on_first, on_second)`.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn closest_points_segment_segment(
    p1: &Point3,
    q1: &Point3,
    p2: &Point3,
    q2: &Point3,
) -> (Point3, Point3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);
    let eps = TOLERANCE * TOLERANCE;

    if a <= eps && e <= eps {
        return (*p1, *p2);
    }

    let (s, t) = if a <= eps {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(&r);
        if e <= eps {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;
            let mut s = if denom > eps {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                // Parallel segments: any s works, pick the start.
                0.0
            };
            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}

/// Finds the point on triangle `(a, b, c)` closest to `p`.
///
/// Voronoi-region classification; degenerate triangles fall back to their
/// edges.
#[must_use]
#[allow(clippy::many_single_char_names, clippy::similar_names)]
pub fn closest_point_on_triangle(p: &Point3, a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    let ab = b - a;
    let ac = c - a;
    if ab.cross(&ac).norm_squared() < TOLERANCE * TOLERANCE {
        return closest_on_triangle_edges(p, a, b, c);
    }

    let ap = p - a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

fn closest_on_triangle_edges(p: &Point3, a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    [
        closest_point_on_segment(p, a, b),
        closest_point_on_segment(p, b, c),
        closest_point_on_segment(p, c, a),
    ]
    .into_iter()
    .min_by(|x, y| (p - x).norm_squared().total_cmp(&(p - y).norm_squared()))
    .unwrap_or(*a)
}

/// Intersects segment `[p, q]` with triangle `(a, b, c)`.
///
/// Returns the crossing point, or `None` if the segment misses the triangle
/// or lies in its plane.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn segment_triangle_intersection(
    p: &Point3,
    q: &Point3,
    a: &Point3,
    b: &Point3,
    c: &Point3,
) -> Option<Point3> {
    let dir = q - p;
    let e1 = b - a;
    let e2 = c - a;
    let h = dir.cross(&e2);
    let det = e1.dot(&h);
    if det.abs() < TOLERANCE {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = p - a;
    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let qv = s.cross(&e1);
    let v = inv_det * dir.dot(&qv);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = inv_det * e2.dot(&qv);
    if (0.0..=1.0).contains(&t) {
        Some(p + dir * t)
    } else {
        None
    }
}

/// Finds the pair of closest points between segment `[p, q]` and triangle `(a, b, c)`.
///
/// Returns `(on_segment, on_triangle)`.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn closest_points_segment_triangle(
    p: &Point3,
    q: &Point3,
    a: &Point3,
    b: &Point3,
    c: &Point3,
) -> (Point3, Point3) {
    if let Some(x) = segment_triangle_intersection(p, q, a, b, c) {
        return (x, x);
    }

    let candidates = [
        (*p, closest_point_on_triangle(p, a, b, c)),
        (*q, closest_point_on_triangle(q, a, b, c)),
        closest_points_segment_segment(p, q, a, b),
        closest_points_segment_segment(p, q, b, c),
        closest_points_segment_segment(p, q, c, a),
    ];
    candidates
        .into_iter()
        .min_by(|x, y| (x.0 - x.1).norm_squared().total_cmp(&(y.0 - y.1).norm_squared()))
        .unwrap_or((*p, *a))
}

/// Finds the pair of closest points between two triangles.
///
/// Returns `(on_first, on_second)`.
#[must_use]
pub fn closest_points_triangle_triangle(first: &[Point3; 3], second: &[Point3; 3]) -> (Point3, Point3) {
    let mut best: Option<(Point3, Point3)> = None;
    let mut best_sq = f64::INFINITY;
    let mut consider = |pair: (Point3, Point3)| {
        let d = (pair.0 - pair.1).norm_squared();
        if d < best_sq {
            best_sq = d;
            best = Some(pair);
        }
    };

    for i in 0..3 {
        let (p, q) = (&first[i], &first[(i + 1) % 3]);
        consider(closest_points_segment_triangle(p, q, &second[0], &second[1], &second[2]));
    }
    for i in 0..3 {
        let (p, q) = (&second[i], &second[(i + 1) % 3]);
        let (on_second, on_first) =
            closest_points_segment_triangle(p, q, &first[0], &first[1], &first[2]);
        consider((on_first, on_second));
    }

    best.unwrap_or((first[0], second[0]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn point_segment_interior() {
        let c = closest_point_on_segment(&p(5.0, 3.0, 0.0), &p(0.0, 0.0, 0.0), &p(10.0, 0.0, 0.0));
        assert_abs_diff_eq!((c - p(5.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn point_segment_clamps() {
        let c = closest_point_on_segment(&p(-5.0, 0.0, 0.0), &p(0.0, 0.0, 0.0), &p(10.0, 0.0, 0.0));
        assert_abs_diff_eq!((c - p(0.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn skew_segments() {
        let (a, b) = closest_points_segment_segment(
            &p(-1.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, -1.0, 2.0),
            &p(0.0, 1.0, 2.0),
        );
        assert_abs_diff_eq!((a - b).norm(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!((a - p(0.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_segments() {
        let (a, b) = closest_points_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
            &p(1.0, 1.0, 0.0),
        );
        assert_abs_diff_eq!((a - b).norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn point_above_triangle_interior() {
        let c = closest_point_on_triangle(
            &p(0.25, 0.25, 3.0),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
        );
        assert_abs_diff_eq!((c - p(0.25, 0.25, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn point_near_triangle_vertex() {
        let c = closest_point_on_triangle(
            &p(2.0, -1.0, 0.0),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
        );
        assert_abs_diff_eq!((c - p(1.0, 0.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn segment_pierces_triangle() {
        let x = segment_triangle_intersection(
            &p(0.2, 0.2, -1.0),
            &p(0.2, 0.2, 1.0),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!((x - p(0.2, 0.2, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn segment_misses_triangle() {
        let x = segment_triangle_intersection(
            &p(2.0, 2.0, -1.0),
            &p(2.0, 2.0, 1.0),
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
        );
        assert!(x.is_none());
    }

    #[test]
    fn parallel_triangles() {
        let t1 = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        let t2 = [p(0.0, 0.0, 4.0), p(1.0, 0.0, 4.0), p(0.0, 1.0, 4.0)];
        let (a, b) = closest_points_triangle_triangle(&t1, &t2);
        assert_abs_diff_eq!((a - b).norm(), 4.0, epsilon = 1e-12);
    }
}
