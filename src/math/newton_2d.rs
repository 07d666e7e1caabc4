use std::f64::consts::FRAC_PI_4;

use crate::error::SolverError;
use crate::geometry::curve::ParametricCurve;

use super::Point2;

/// Distance below which two curve points are considered coincident.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-3;

/// Maximum number of Newton updates before giving up.
pub const MAX_ITERATIONS: usize = 20;

/// Step bound on the first curve's parameter (an angle on closed curves).
pub const MAX_STEP_T1: f64 = FRAC_PI_4;

/// Step bound on the second curve's parameter.
pub const MAX_STEP_T2: f64 = 2.0;

/// Solutions whose `t2` differ by less than this are the same crossing.
pub const DUPLICATE_T2_TOLERANCE: f64 = 0.01;

/// Jacobian determinants below this are treated as singular.
const SINGULAR_DETERMINANT: f64 = 1e-12;

/// Parameter nudge applied to `t2` when the Jacobian is singular.
const SINGULAR_NUDGE: f64 = 0.1;

/// A point where two parametric curves meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Parameter on the first curve.
    pub t1: f64,
    /// Parameter on the second curve.
    pub t2: f64,
    /// The meeting point, evaluated on the first curve.
    pub point: Point2,
    /// Newton updates spent.
    pub iterations: usize,
}

/// Finds `(t1, t2)` with `c1(t1) ≈ c2(t2)` by Newton–Raphson from one initial guess.
///
/// Each update solves
///
/// ```text
/// [ x1'(t1)  -x2'(t2) ] [Δt1]   [x2 - x1]
/// [ y1'(t1)  -y2'(t2) ] [Δt2] = [y2 - y1]
/// ```
///
/// with the closed-form 2x2 inverse, then clamps the steps to
/// [`MAX_STEP_T1`] and [`MAX_STEP_T2`] so nearly parallel curves do not
/// throw the iterate far away.
///
/// # Errors
///
/// Returns [`SolverError::NonConvergence`] when the points are still further
/// apart than [`CONVERGENCE_TOLERANCE`] after [`MAX_ITERATIONS`] updates.
pub fn solve<A, B>(c1: &A, c2: &B, t1_guess: f64, t2_guess: f64) -> Result<Intersection, SolverError>
where
    A: ParametricCurve + ?Sized,
    B: ParametricCurve + ?Sized,
{
    let mut t1 = t1_guess;
    let mut t2 = t2_guess;
    let mut distance = f64::INFINITY;

    for iteration in 0..=MAX_ITERATIONS {
        let p1 = c1.position(t1);
        let p2 = c2.position(t2);
        let diff = p2 - p1;
        distance = diff.norm();
        if distance < CONVERGENCE_TOLERANCE {
            return Ok(Intersection {
                t1,
                t2,
                point: p1,
                iterations: iteration,
            });
        }
        if iteration == MAX_ITERATIONS {
            break;
        }

        let d1 = c1.derivative(t1);
        let d2 = c2.derivative(t2);
        // | a b |   | d1.x  -d2.x |
        // | c d | = | d1.y  -d2.y |
        let (a, b, c, d) = (d1.x, -d2.x, d1.y, -d2.y);
        let det = a * d - b * c;
        if det.abs() < SINGULAR_DETERMINANT {
            t2 += SINGULAR_NUDGE;
            continue;
        }
        let inv_det = 1.0 / det;
        let dt1 = inv_det * (d * diff.x - b * diff.y);
        let dt2 = inv_det * (-c * diff.x + a * diff.y);

        t1 += dt1.clamp(-MAX_STEP_T1, MAX_STEP_T1);
        t2 += dt2.clamp(-MAX_STEP_T2, MAX_STEP_T2);
    }

    Err(SolverError::NonConvergence {
        iterations: MAX_ITERATIONS,
        distance,
    })
}

/// Tries each `(t1, t2)` guess in order and returns the first solution.
///
/// # Errors
///
/// Returns the last guess's error if every guess fails, or
/// [`SolverError::NoGuesses`] if `guesses` is empty.
pub fn solve_first<A, B>(c1: &A, c2: &B, guesses: &[(f64, f64)]) -> Result<Intersection, SolverError>
where
    A: ParametricCurve + ?Sized,
    B: ParametricCurve + ?Sized,
{
    let mut last_err = SolverError::NoGuesses;
    for &(t1, t2) in guesses {
        match solve(c1, c2, t1, t2) {
            Ok(hit) => return Ok(hit),
            Err(err) => {
                tracing::trace!(t1, t2, %err, "intersection guess failed");
                last_err = err;
            }
        }
    }
    Err(last_err)
}

/// Solves from every guess and merges duplicate crossings.
///
/// Failed guesses are dropped. Two solutions are duplicates when their `t2`
/// differ by less than [`DUPLICATE_T2_TOLERANCE`]; of a duplicate pair the
/// one with `t1 > 0` (the descending branch) is kept. The result is sorted by
/// `t2`.
#[must_use]
pub fn solve_all<A, B>(c1: &A, c2: &B, guesses: &[(f64, f64)]) -> Vec<Intersection>
where
    A: ParametricCurve + ?Sized,
    B: ParametricCurve + ?Sized,
{
    let mut hits: Vec<Intersection> = Vec::new();
    for &(t1, t2) in guesses {
        let hit = match solve(c1, c2, t1, t2) {
            Ok(hit) => hit,
            Err(err) => {
                tracing::trace!(t1, t2, %err, "intersection guess failed");
                continue;
            }
        };
        if let Some(existing) = hits
            .iter_mut()
            .find(|h| (h.t2 - hit.t2).abs() < DUPLICATE_T2_TOLERANCE)
        {
            if existing.t1 <= 0.0 && hit.t1 > 0.0 {
                *existing = hit;
            }
        } else {
            hits.push(hit);
        }
    }
    hits.sort_by(|a, b| a.t2.total_cmp(&b.t2));
    hits
}

/// `count` guesses pairing evenly spaced angles on `[0, 2π)` with a fixed `t2`.
#[must_use]
pub fn angular_guesses(count: usize, t2: f64) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = std::f64::consts::TAU * i as f64 / count as f64;
            (angle, t2)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{Ellipse, TravelingWave, Winding};
    use approx::assert_relative_eq;

    fn unit_circle() -> Ellipse {
        Ellipse::circle(Point2::origin(), 1.0, Winding::CounterClockwise)
    }

    fn offset_circle() -> Ellipse {
        Ellipse::circle(Point2::new(2.0, 0.0), 2.0, Winding::CounterClockwise)
    }

    #[test]
    fn two_circles_converge_to_analytic_crossing() {
        // x^2 + y^2 = 1 and (x - 2)^2 + y^2 = 4 meet at (1/4, ±√15/4).
        let expected = Point2::new(0.25, 15f64.sqrt() / 4.0);
        let t1_expected = expected.y.atan2(expected.x);
        let t2_expected = expected.y.atan2(expected.x - 2.0);

        let hit = solve(&unit_circle(), &offset_circle(), 1.0, 2.5).unwrap();
        assert!(hit.iterations <= MAX_ITERATIONS);
        assert!((hit.t1 - t1_expected).abs() < 1e-3, "t1 = {}", hit.t1);
        assert!((hit.t2 - t2_expected).abs() < 1e-3, "t2 = {}", hit.t2);
        assert!((hit.point - expected).norm() < CONVERGENCE_TOLERANCE);
    }

    #[test]
    fn lower_crossing_from_lower_guess() {
        let hit = solve(&unit_circle(), &offset_circle(), -1.0, -2.5).unwrap();
        assert!(hit.point.y < 0.0);
        assert_relative_eq!(hit.point.x, 0.25, epsilon = 1e-3);
    }

    #[test]
    fn concentric_circles_do_not_converge() {
        let inner = unit_circle();
        let outer = Ellipse::circle(Point2::origin(), 2.0, Winding::CounterClockwise);
        let err = solve(&inner, &outer, 0.3, 1.2).unwrap_err();
        assert!(matches!(
            err,
            SolverError::NonConvergence {
                iterations: MAX_ITERATIONS,
                ..
            }
        ));
    }

    #[test]
    fn coincident_guess_needs_no_iterations() {
        let wave = TravelingWave::new(0.0, 1.0, 0.0);
        let hit = solve(&unit_circle(), &wave, 0.0, 1.0).unwrap();
        assert_eq!(hit.iterations, 0);
        assert_relative_eq!(hit.point, Point2::new(1.0, 0.0));
    }

    #[test]
    fn solve_first_falls_through_bad_guesses() {
        let inner = unit_circle();
        let outer = Ellipse::circle(Point2::origin(), 2.0, Winding::CounterClockwise);
        assert!(solve_first(&inner, &outer, &[(0.3, 1.2), (1.0, 2.0)]).is_err());

        let hit = solve_first(&unit_circle(), &offset_circle(), &[(1.0, 2.5)]).unwrap();
        assert!(hit.point.y > 0.0);
    }

    #[test]
    fn solve_first_without_guesses() {
        let err = solve_first(&unit_circle(), &offset_circle(), &[]).unwrap_err();
        assert!(matches!(err, SolverError::NoGuesses));
    }

    #[test]
    fn solve_all_merges_duplicates() {
        // A flat wave through the unit circle crosses it at t2 = ±1.
        let wave = TravelingWave::new(0.0, 1.0, 0.0);
        let guesses = angular_guesses(8, 0.0)
            .into_iter()
            .map(|(t1, _)| (t1, t1.cos()))
            .collect::<Vec<_>>();
        let hits = solve_all(&unit_circle(), &wave, &guesses);
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits[0].t2, -1.0, epsilon = 1e-3);
        assert_relative_eq!(hits[1].t2, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn solve_all_prefers_positive_t1_on_duplicate() {
        // The crossing at (-1, 0) is reached both as t1 = -π and t1 = π.
        let wave = TravelingWave::new(0.0, 1.0, 0.0);
        let pi = std::f64::consts::PI;
        let hits = solve_all(&unit_circle(), &wave, &[(-pi + 0.05, -1.0), (pi - 0.05, -1.0)]);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].t1, pi, epsilon = 1e-6);
    }

    #[test]
    fn angular_guesses_are_evenly_spaced() {
        let g = angular_guesses(4, 0.5);
        assert_eq!(g.len(), 4);
        assert_relative_eq!(g[1].0, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(g[3].1, 0.5);
    }
}
