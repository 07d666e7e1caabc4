use std::f64::consts::PI;

use crate::math::{Point2, Vector2};

use super::ParametricCurve;

/// Which half of an eye a branch traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeBranch {
    /// Phase offset 0: above the axis, left to right.
    Top,
    /// Phase offset π: below the axis, right to left.
    Bottom,
}

impl EyeBranch {
    /// Phase offset of the branch, `0` or `π`.
    #[must_use]
    pub fn theta_offset(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Bottom => PI,
        }
    }

    /// `cos(theta_offset)`.
    fn sign(self) -> f64 {
        match self {
            Self::Top => 1.0,
            Self::Bottom => -1.0,
        }
    }
}

/// One branch of an eye (leaf) shape: a sine lobe with a ripple riding on it.
///
/// For `s` in `[0, π]` and `c = cos(theta_offset)`:
///
/// ```text
/// x(s) = cx + c * r * (2s/π - 1)
/// y(s) = cy + c * sin(s) * (h + A * sin(F s + φ))
/// ```
///
/// The ripple is scaled by `sin(s)` so both branches pinch to the corners
/// `(cx ± r, cy)`. Top followed by Bottom traces one closed loop.
#[derive(Debug, Clone, Copy)]
pub struct EyeWave {
    pub center: Point2,
    /// Half the corner-to-corner width `r`.
    pub half_width: f64,
    /// Lobe height `h`.
    pub height: f64,
    /// Ripple amplitude `A`.
    pub ripple_amplitude: f64,
    /// Ripple frequency `F` along the lobe.
    pub ripple_frequency: f64,
    /// Ripple phase `φ`.
    pub ripple_phase: f64,
    pub branch: EyeBranch,
}

impl EyeWave {
    /// Creates a plain (unrippled) branch.
    #[must_use]
    pub fn new(center: Point2, half_width: f64, height: f64, branch: EyeBranch) -> Self {
        Self {
            center,
            half_width,
            height,
            ripple_amplitude: 0.0,
            ripple_frequency: 0.0,
            ripple_phase: 0.0,
            branch,
        }
    }

    /// Adds a ripple to the lobe.
    #[must_use]
    pub fn with_ripple(mut self, amplitude: f64, frequency: f64, phase: f64) -> Self {
        self.ripple_amplitude = amplitude;
        self.ripple_frequency = frequency;
        self.ripple_phase = phase;
        self
    }

    /// The same lobe traced on the other side.
    #[must_use]
    pub fn mirrored(mut self) -> Self {
        self.branch = match self.branch {
            EyeBranch::Top => EyeBranch::Bottom,
            EyeBranch::Bottom => EyeBranch::Top,
        };
        self
    }

    fn ripple_argument(&self, s: f64) -> f64 {
        self.ripple_frequency * s + self.ripple_phase
    }
}

impl ParametricCurve for EyeWave {
    fn position(&self, s: f64) -> Point2 {
        let c = self.branch.sign();
        let lobe = self.height + self.ripple_amplitude * self.ripple_argument(s).sin();
        Point2::new(
            self.center.x + c * self.half_width * (2.0 * s / PI - 1.0),
            self.center.y + c * s.sin() * lobe,
        )
    }

    fn derivative(&self, s: f64) -> Vector2 {
        let c = self.branch.sign();
        let arg = self.ripple_argument(s);
        let lobe = self.height + self.ripple_amplitude * arg.sin();
        let dlobe = self.ripple_amplitude * self.ripple_frequency * arg.cos();
        Vector2::new(
            c * 2.0 * self.half_width / PI,
            c * (s.cos() * lobe + s.sin() * dlobe),
        )
    }
}
