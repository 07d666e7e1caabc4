use crate::math::{Point2, Vector2};

use super::ParametricCurve;

/// Traversal direction of a closed curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    /// Increasing `t` turns counter-clockwise (positive angle).
    #[default]
    CounterClockwise,
    /// Increasing `t` turns clockwise.
    Clockwise,
}

impl Winding {
    /// `+1` for counter-clockwise, `-1` for clockwise.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::CounterClockwise => 1.0,
            Self::Clockwise => -1.0,
        }
    }

    /// Returns the opposite winding.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::CounterClockwise => Self::Clockwise,
            Self::Clockwise => Self::CounterClockwise,
        }
    }
}

/// An axis-aligned ellipse in the form plane.
///
/// `P(t) = (cx + rx * cos(t), cy + s * ry * sin(t))` where `s` is the
/// winding sign. The cosine term never changes sign; winding is the only
/// way to reverse traversal.
#[derive(Debug, Clone, Copy)]
pub struct Ellipse {
    center: Point2,
    rx: f64,
    ry: f64,
    winding: Winding,
}

impl Ellipse {
    /// Creates a new ellipse.
    #[must_use]
    pub fn new(center: Point2, rx: f64, ry: f64, winding: Winding) -> Self {
        Self {
            center,
            rx,
            ry,
            winding,
        }
    }

    /// Creates a circle, the `rx == ry` special case.
    #[must_use]
    pub fn circle(center: Point2, radius: f64, winding: Winding) -> Self {
        Self::new(center, radius, radius, winding)
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the horizontal semi-axis.
    #[must_use]
    pub fn rx(&self) -> f64 {
        self.rx
    }

    /// Returns the vertical semi-axis.
    #[must_use]
    pub fn ry(&self) -> f64 {
        self.ry
    }

    /// Returns the traversal direction.
    #[must_use]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Parameter of the point on the ellipse at polar `angle` from the center.
    ///
    /// Useful for seeding the intersection solver.
    #[must_use]
    pub fn parameter_at_angle(&self, angle: f64) -> f64 {
        let s = self.winding.sign();
        (s * angle.sin() * self.rx).atan2(angle.cos() * self.ry)
    }
}

impl ParametricCurve for Ellipse {
    fn position(&self, t: f64) -> Point2 {
        let s = self.winding.sign();
        Point2::new(
            self.center.x + self.rx * t.cos(),
            self.center.y + s * self.ry * t.sin(),
        )
    }

    fn derivative(&self, t: f64) -> Vector2 {
        let s = self.winding.sign();
        Vector2::new(-self.rx * t.sin(), s * self.ry * t.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::curve::assert_derivative_matches;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn evaluate_at_zero() {
        let e = Ellipse::new(Point2::origin(), 3.0, 2.0, Winding::CounterClockwise);
        assert_relative_eq!(e.position(0.0), Point2::new(3.0, 0.0));
    }

    #[test]
    fn evaluate_at_pi_over_2() {
        let e = Ellipse::new(Point2::origin(), 3.0, 2.0, Winding::CounterClockwise);
        assert_relative_eq!(e.position(FRAC_PI_2), Point2::new(0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn clockwise_mirrors_vertically() {
        let e = Ellipse::new(Point2::new(1.0, 1.0), 3.0, 2.0, Winding::Clockwise);
        assert_relative_eq!(e.position(FRAC_PI_2), Point2::new(1.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn tangent_at_zero_follows_winding() {
        let ccw = Ellipse::new(Point2::origin(), 3.0, 2.0, Winding::CounterClockwise);
        let cw = Ellipse::new(Point2::origin(), 3.0, 2.0, Winding::Clockwise);
        assert!(ccw.derivative(0.0).y > 0.0);
        assert!(cw.derivative(0.0).y < 0.0);
    }

    #[test]
    fn derivative_is_exact() {
        let e = Ellipse::new(Point2::new(0.5, -0.2), 3.0, 2.0, Winding::Clockwise);
        assert_derivative_matches(&e, &[-4.0, -1.0, 0.0, 0.7, 2.5, 9.0]);
    }

    #[test]
    fn parameter_at_angle_round_trips() {
        let e = Ellipse::new(Point2::origin(), 3.0, 2.0, Winding::Clockwise);
        let t = e.parameter_at_angle(2.0);
        let p = e.position(t);
        assert_relative_eq!(p.y.atan2(p.x), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn reversed_winding() {
        assert_eq!(Winding::Clockwise.reversed(), Winding::CounterClockwise);
    }
}
