use crate::math::{Point2, Vector2};

use super::ParametricCurve;

/// A circle whose radius ripples around its circumference.
///
/// ```text
/// ω(θ) = A * sin(F θ + S time + Φ) * cos(f time + φ)
/// P(θ) = center + (R + ω(θ)) * (cos θ, sin θ)
/// ```
///
/// `S` makes the ripple travel around the circle; `f` makes it pulse.
#[derive(Debug, Clone, Copy)]
pub struct CircleWave {
    pub center: Point2,
    /// Base radius `R`.
    pub radius: f64,
    /// Ripple amplitude `A`.
    pub amplitude: f64,
    /// Ripple count around the circle `F`.
    pub angular_frequency: f64,
    /// Travel speed of the ripple `S`.
    pub speed: f64,
    /// Ripple phase `Φ`.
    pub phase: f64,
    /// Pulse frequency `f`.
    pub pulse_frequency: f64,
    /// Pulse phase `φ`.
    pub pulse_phase: f64,
    pub time: f64,
}

impl CircleWave {
    /// Creates an unrippled circle.
    #[must_use]
    pub fn new(center: Point2, radius: f64) -> Self {
        Self {
            center,
            radius,
            amplitude: 0.0,
            angular_frequency: 0.0,
            speed: 0.0,
            phase: 0.0,
            pulse_frequency: 0.0,
            pulse_phase: 0.0,
            time: 0.0,
        }
    }

    /// Sets the travelling ripple parameters `A`, `F`, `S`, `Φ`.
    #[must_use]
    pub fn with_ripple(mut self, amplitude: f64, angular_frequency: f64, speed: f64, phase: f64) -> Self {
        self.amplitude = amplitude;
        self.angular_frequency = angular_frequency;
        self.speed = speed;
        self.phase = phase;
        self
    }

    /// Sets the pulse parameters `f`, `φ`.
    #[must_use]
    pub fn with_pulse(mut self, pulse_frequency: f64, pulse_phase: f64) -> Self {
        self.pulse_frequency = pulse_frequency;
        self.pulse_phase = pulse_phase;
        self
    }

    /// Returns the curve frozen at `time`.
    #[must_use]
    pub fn at_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    fn pulse(&self) -> f64 {
        (self.pulse_frequency * self.time + self.pulse_phase).cos()
    }

    fn ripple_argument(&self, theta: f64) -> f64 {
        self.angular_frequency * theta + self.speed * self.time + self.phase
    }

    /// Radial offset `ω(θ)`.
    #[must_use]
    pub fn ripple(&self, theta: f64) -> f64 {
        self.amplitude * self.ripple_argument(theta).sin() * self.pulse()
    }
}

impl ParametricCurve for CircleWave {
    fn position(&self, theta: f64) -> Point2 {
        let r = self.radius + self.ripple(theta);
        let (sin, cos) = theta.sin_cos();
        Point2::new(self.center.x + r * cos, self.center.y + r * sin)
    }

    fn derivative(&self, theta: f64) -> Vector2 {
        let r = self.radius + self.ripple(theta);
        let dr = self.amplitude
            * self.angular_frequency
            * self.ripple_argument(theta).cos()
            * self.pulse();
        let (sin, cos) = theta.sin_cos();
        Vector2::new(dr * cos - r * sin, dr * sin + r * cos)
    }
}
