mod circle_wave;
mod ellipse;
mod eye_wave;
mod traveling_wave;

pub use circle_wave::CircleWave;
pub use ellipse::{Ellipse, Winding};
pub use eye_wave::{EyeBranch, EyeWave};
pub use traveling_wave::{RotatedTravelingWave, TravelingWave};

use crate::math::{Point2, Vector2};

/// A planar curve `t ↦ (x, y)` with an exact first derivative.
///
/// Implementations are pure and total over ℝ: they close over their shape
/// parameters and can be evaluated at any `t`, any number of times.
pub trait ParametricCurve {
    /// Evaluates the curve at parameter `t`.
    fn position(&self, t: f64) -> Point2;

    /// Evaluates `(dx/dt, dy/dt)` at parameter `t`.
    fn derivative(&self, t: f64) -> Vector2;

    /// Samples `count` evenly spaced points over `[t_start, t_end]`, both ends included.
    ///
    /// A reversed range yields the points in reverse traversal order.
    fn sample(&self, t_start: f64, t_end: f64, count: usize) -> Vec<Point2> {
        match count {
            0 => Vec::new(),
            1 => vec![self.position(t_start)],
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let step = (t_end - t_start) / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let t = t_start + step * i as f64;
                        self.position(t)
                    })
                    .collect()
            }
        }
    }
}

impl<C: ParametricCurve + ?Sized> ParametricCurve for &C {
    fn position(&self, t: f64) -> Point2 {
        (**self).position(t)
    }

    fn derivative(&self, t: f64) -> Vector2 {
        (**self).derivative(t)
    }
}

/// Checks an analytic derivative against a central difference.
#[cfg(test)]
pub(crate) fn assert_derivative_matches(curve: &impl ParametricCurve, ts: &[f64]) {
    let h = 1e-6;
    for &t in ts {
        let numeric = (curve.position(t + h) - curve.position(t - h)) / (2.0 * h);
        let analytic = curve.derivative(t);
        assert!(
            (numeric - analytic).norm() < 1e-5,
            "derivative mismatch at t = {t}: numeric {numeric:?}, analytic {analytic:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sample_includes_both_ends() {
        let e = Ellipse::new(Point2::origin(), 2.0, 1.0, Winding::CounterClockwise);
        let pts = e.sample(0.0, std::f64::consts::PI, 5);
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[0], Point2::new(2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(pts[4], Point2::new(-2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn sample_degenerate_counts() {
        let e = Ellipse::new(Point2::origin(), 1.0, 1.0, Winding::CounterClockwise);
        assert!(e.sample(0.0, 1.0, 0).is_empty());
        assert_eq!(e.sample(0.0, 1.0, 1).len(), 1);
    }

    #[test]
    fn reference_forwards_to_curve() {
        let e = Ellipse::new(Point2::origin(), 1.0, 1.0, Winding::CounterClockwise);
        let r = &e;
        assert_relative_eq!(r.position(0.3), e.position(0.3));
    }
}
