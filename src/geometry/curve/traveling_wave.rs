use crate::math::{Point2, Vector2};

use super::ParametricCurve;

/// A sine wave travelling along the x axis.
///
/// `P(t) = (t + x_offset, A * sin(k * t - omega * time + phase))`.
/// The domain is unbounded; `t` behaves like a horizontal coordinate.
#[derive(Debug, Clone, Copy)]
pub struct TravelingWave {
    /// Peak displacement `A`.
    pub amplitude: f64,
    /// Spatial frequency `k` (radians per unit length).
    pub wavenumber: f64,
    /// Temporal frequency `omega` (radians per time unit).
    pub angular_frequency: f64,
    /// Animation time the wave is frozen at.
    pub time: f64,
    /// Constant phase offset.
    pub phase: f64,
    /// Horizontal shift of the whole wave.
    pub x_offset: f64,
}

impl TravelingWave {
    /// Creates a wave at `time = 0` with no phase or offset.
    #[must_use]
    pub fn new(amplitude: f64, wavenumber: f64, angular_frequency: f64) -> Self {
        Self {
            amplitude,
            wavenumber,
            angular_frequency,
            time: 0.0,
            phase: 0.0,
            x_offset: 0.0,
        }
    }

    /// Returns the wave frozen at `time`.
    #[must_use]
    pub fn at_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Returns the wave with the given phase.
    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Returns the wave shifted horizontally.
    #[must_use]
    pub fn with_x_offset(mut self, x_offset: f64) -> Self {
        self.x_offset = x_offset;
        self
    }

    fn argument(&self, t: f64) -> f64 {
        self.wavenumber * t - self.angular_frequency * self.time + self.phase
    }

    /// Vertical displacement at parameter `t`.
    #[must_use]
    pub fn displacement(&self, t: f64) -> f64 {
        self.amplitude * self.argument(t).sin()
    }

    /// `dy/dt` at parameter `t`.
    #[must_use]
    pub fn slope(&self, t: f64) -> f64 {
        self.amplitude * self.wavenumber * self.argument(t).cos()
    }
}

impl ParametricCurve for TravelingWave {
    fn position(&self, t: f64) -> Point2 {
        Point2::new(t + self.x_offset, self.displacement(t))
    }

    fn derivative(&self, t: f64) -> Vector2 {
        Vector2::new(1.0, self.slope(t))
    }
}

/// A [`TravelingWave`] rotated by `angle` about the origin, then shifted by `offset`.
///
/// The rotation is folded into both the position and the derivative:
///
/// ```text
/// x(t) = (t + x0) cos θ - y(t) sin θ + ox     x'(t) = cos θ - y'(t) sin θ
/// y(t) = (t + x0) sin θ + y(t) cos θ + oy     y'(t) = sin θ + y'(t) cos θ
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RotatedTravelingWave {
    /// The unrotated wave.
    pub wave: TravelingWave,
    /// Rotation angle in radians (counter-clockwise).
    pub angle: f64,
    /// Translation applied after the rotation.
    pub offset: Vector2,
}

impl RotatedTravelingWave {
    /// Creates a rotated wave.
    #[must_use]
    pub fn new(wave: TravelingWave, angle: f64) -> Self {
        Self {
            wave,
            angle,
            offset: Vector2::zeros(),
        }
    }

    /// Returns the wave translated by `offset`.
    #[must_use]
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }
}

impl ParametricCurve for RotatedTravelingWave {
    fn position(&self, t: f64) -> Point2 {
        let (sin, cos) = self.angle.sin_cos();
        let u = t + self.wave.x_offset;
        let w = self.wave.displacement(t);
        Point2::new(
            u * cos - w * sin + self.offset.x,
            u * sin + w * cos + self.offset.y,
        )
    }

    fn derivative(&self, t: f64) -> Vector2 {
        let (sin, cos) = self.angle.sin_cos();
        let dw = self.wave.slope(t);
        Vector2::new(cos - dw * sin, sin + dw * cos)
    }
}
