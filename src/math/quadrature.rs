//! Numerical integration used by the length and area queries.

use crate::error::{OperationError, Result};

use super::TOLERANCE;

/// Number of equal panels the interval is split into before refinement starts.
///
/// Periodic integrands (ellipse speed, for example) can fool a single
/// Simpson panel into reporting early convergence.
const INITIAL_PANELS: u32 = 8;

/// Maximum refinement depth per panel.
///
/// Bounds the work to `2^MAX_DEPTH` evaluations per panel; a panel still
/// unresolved at this depth is reported as not converged.
const MAX_DEPTH: u32 = 20;

/// Five-point Gauss-Legendre nodes on `[-1, 1]`.
const GL_NODES: [f64; 5] = [
    -0.906_179_845_938_664,
    -0.538_469_310_105_683_1,
    0.0,
    0.538_469_310_105_683_1,
    0.906_179_845_938_664,
];

/// Five-point Gauss-Legendre weights matching [`GL_NODES`].
const GL_WEIGHTS: [f64; 5] = [
    0.236_926_885_056_189_1,
    0.478_628_670_499_366_5,
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
];

/// Integrates `f` over `[a, b]` with adaptive Simpson quadrature.
///
/// `tolerance` is an absolute bound on the integration error. The interval
/// may be given in either direction; the sign of the result follows it.
///
/// # Errors
///
/// Returns an error if the tolerance is not positive, if `f` fails, or if
/// the integral is not finite.
pub fn adaptive_simpson<F>(f: F, a: f64, b: f64, tolerance: f64) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    if tolerance <= 0.0 || !tolerance.is_finite() {
        return Err(OperationError::InvalidInput(format!(
            "integration tolerance must be positive, got {tolerance}"
        ))
        .into());
    }
    if !a.is_finite() || !b.is_finite() {
        return Err(
            OperationError::InvalidInput("integration bounds must be finite".into()).into(),
        );
    }
    if (b - a).abs() < TOLERANCE {
        return Ok(0.0);
    }

    let h = (b - a) / f64::from(INITIAL_PANELS);
    let panel_tolerance = tolerance / f64::from(INITIAL_PANELS);
    let mut total = 0.0;
    for i in 0..INITIAL_PANELS {
        let x0 = a + h * f64::from(i);
        let x1 = if i + 1 == INITIAL_PANELS {
            b
        } else {
            a + h * f64::from(i + 1)
        };
        let fa = f(x0)?;
        let fb = f(x1)?;
        let xm = 0.5 * (x0 + x1);
        let fm = f(xm)?;
        let whole = simpson(x0, x1, fa, fm, fb);
        total += refine(&f, x0, x1, [fa, fm, fb], whole, panel_tolerance, MAX_DEPTH)?;
    }

    if !total.is_finite() {
        return Err(OperationError::NotConverged("integral is not finite".into()).into());
    }
    Ok(total)
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

fn refine<F>(
    f: &F,
    a: f64,
    b: f64,
    [fa, fm, fb]: [f64; 3],
    whole: f64,
    tolerance: f64,
    depth: u32,
) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    let m = 0.5 * (a + b);
    let flm = f(0.5 * (a + m))?;
    let frm = f(0.5 * (m + b))?;
    let left = simpson(a, m, fa, flm, fm);
    let right = simpson(m, b, fm, frm, fb);
    let delta = left + right - whole;
    if !delta.is_finite() {
        return Err(OperationError::NotConverged("integrand is not finite".into()).into());
    }

    // Richardson extrapolation on acceptance.
    if delta.abs() <= 15.0 * tolerance {
        return Ok(left + right + delta / 15.0);
    }
    if depth == 0 {
        return Err(OperationError::NotConverged(format!(
            "no convergence on [{a}, {b}] within {MAX_DEPTH} refinements"
        ))
        .into());
    }

    let half = 0.5 * tolerance;
    Ok(refine(f, a, m, [fa, flm, fm], left, half, depth - 1)?
        + refine(f, m, b, [fm, frm, fb], right, half, depth - 1)?)
}

/// Integrates `f(u, v)` over the rectangle `[u0, u1] x [v0, v1]`.
///
/// The rectangle is split into `cells_u x cells_v` cells, each integrated with
/// a tensor-product five-point Gauss-Legendre rule.
///
/// # Errors
///
/// Returns an error if a cell count is zero, if `f` fails, or if the
/// integral is not finite.
#[allow(clippy::similar_names)]
pub fn gauss_legendre_2d<F>(
    f: F,
    (u0, u1): (f64, f64),
    (v0, v1): (f64, f64),
    cells_u: u32,
    cells_v: u32,
) -> Result<f64>
where
    F: Fn(f64, f64) -> Result<f64>,
{
    if cells_u == 0 || cells_v == 0 {
        return Err(OperationError::InvalidInput("cell count must be positive".into()).into());
    }

    let du = (u1 - u0) / f64::from(cells_u);
    let dv = (v1 - v0) / f64::from(cells_v);
    let mut total = 0.0;

    for iu in 0..cells_u {
        let cu = u0 + du * (f64::from(iu) + 0.5);
        for iv in 0..cells_v {
            let cv = v0 + dv * (f64::from(iv) + 0.5);
            let mut cell = 0.0;
            for (ni, wi) in GL_NODES.iter().zip(GL_WEIGHTS) {
                let u = cu + 0.5 * du * ni;
                for (nj, wj) in GL_NODES.iter().zip(GL_WEIGHTS) {
                    let v = cv + 0.5 * dv * nj;
                    cell += wi * wj * f(u, v)?;
                }
            }
            total += cell * 0.25 * du * dv;
        }
    }

    if !total.is_finite() {
        return Err(OperationError::NotConverged("integral is not finite".into()).into());
    }
    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn simpson_integrates_constant() {
        let v = adaptive_simpson(|_| Ok(2.0), 0.0, 5.0, 1e-9).unwrap();
        assert_abs_diff_eq!(v, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn simpson_integrates_sine() {
        let v = adaptive_simpson(|x| Ok(x.sin()), 0.0, PI, 1e-9).unwrap();
        assert_abs_diff_eq!(v, 2.0, epsilon = 1e-8);
    }

    #[test]
    fn simpson_reversed_interval_is_negative() {
        let v = adaptive_simpson(|x| Ok(x), 1.0, 0.0, 1e-9).unwrap();
        assert_abs_diff_eq!(v, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn simpson_empty_interval_is_zero() {
        let v = adaptive_simpson(|_| Ok(1.0), 3.0, 3.0, 1e-9).unwrap();
        assert_abs_diff_eq!(v, 0.0);
    }

    #[test]
    fn simpson_rejects_bad_tolerance() {
        assert!(adaptive_simpson(|_| Ok(1.0), 0.0, 1.0, 0.0).is_err());
    }

    fn not_converged(result: Result<f64>) -> bool {
        matches!(
            result,
            Err(crate::error::KernelError::Operation(OperationError::NotConverged(_)))
        )
    }

    #[test]
    fn simpson_reports_non_finite() {
        assert!(not_converged(adaptive_simpson(|_| Ok(f64::NAN), 0.0, 1.0, 1e-6)));
    }

    #[test]
    fn simpson_stops_at_nan_on_part_of_the_interval() {
        let f = |x: f64| Ok(if x > 0.6 { f64::NAN } else { 1.0 });
        assert!(not_converged(adaptive_simpson(f, 0.0, 1.0, 1e-6)));
    }

    #[test]
    fn simpson_gives_up_on_divergent_integral() {
        // Finite samples everywhere, but the area around 1/3 grows without bound.
        let f = |x: f64| Ok(1.0 / (x - 1.0 / 3.0).abs());
        assert!(not_converged(adaptive_simpson(f, 0.0, 1.0, 1e-6)));
    }

    #[test]
    fn gauss_legendre_unit_square() {
        let v = gauss_legendre_2d(|u, v| Ok(u * v), (0.0, 1.0), (0.0, 1.0), 1, 1).unwrap();
        assert_abs_diff_eq!(v, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn gauss_legendre_sphere_band() {
        // Area element of a unit sphere in (longitude, latitude) is cos(v).
        let v = gauss_legendre_2d(
            |_, v| Ok(v.cos()),
            (0.0, 2.0 * PI),
            (-PI / 2.0, PI / 2.0),
            4,
            4,
        )
        .unwrap();
        assert_abs_diff_eq!(v, 4.0 * PI, epsilon = 1e-9);
    }
}
