//! Animated forms: each frame a form advances its cycle timing, evaluates
//! its curves and intersections, and emits render-ready [`Line`]s.

mod between_you_and_i;
mod breath;
mod coupling;
mod doubling_back;

pub use between_you_and_i::BetweenYouAndI;
pub use breath::Breath;
pub use coupling::Coupling;
pub use doubling_back::DoublingBack;

use crate::animation::{CycleTick, CycleTiming, Overflow};
use crate::error::Result;
use crate::geometry::{Line, ParametricCurve};
use crate::math::Point2;

/// Default tick length in milliseconds.
pub const TICK_DURATION_MS: f64 = 10.0;

/// Per-frame input to [`Form::lines`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Real time since the previous frame, in milliseconds.
    pub delta_ms: f64,
    /// Scrubber position; replaces delta accumulation when set.
    pub absolute_ms: Option<f64>,
    /// Playback speed multiplier applied to both.
    pub speed: f64,
}

impl FrameContext {
    /// A frame advancing by `delta_ms` at normal speed.
    #[must_use]
    pub fn new(delta_ms: f64) -> Self {
        Self {
            delta_ms,
            absolute_ms: None,
            speed: 1.0,
        }
    }

    /// A frame jumping to `absolute_ms`.
    #[must_use]
    pub fn scrub(absolute_ms: f64) -> Self {
        Self {
            delta_ms: 0.0,
            absolute_ms: Some(absolute_ms),
            speed: 1.0,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    fn scaled_delta(&self) -> f64 {
        self.delta_ms * self.speed
    }

    fn scaled_absolute(&self) -> Option<f64> {
        self.absolute_ms.map(|t| t * self.speed)
    }
}

/// What a form produces for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormOutput {
    pub lines: Vec<Line>,
    /// Auxiliary crossing points, in form-local coordinates.
    pub intersection_points: Vec<Point2>,
}

/// An animated parametric shape family.
pub trait Form {
    /// Display name.
    fn name(&self) -> &'static str;

    /// `(width, height)` of the form's boundary rectangle, centred on the origin.
    fn size(&self) -> (f64, f64);

    /// Advances the animation and returns this frame's lines.
    ///
    /// Never fails: a frame that cannot be computed is replaced by the last
    /// good frame, or a degenerate one-point line before any frame succeeded.
    fn lines(&mut self, ctx: &FrameContext) -> FormOutput;
}

/// Cycle timing plus last-good-frame memory shared by every form.
///
/// Time past a cycle boundary carries into the next cycle, so a form's
/// position depends only on total elapsed time and scrubbing reproduces
/// playback.
#[derive(Debug, Clone)]
pub(crate) struct FormClock {
    timing: CycleTiming,
    last_good: Option<FormOutput>,
}

impl FormClock {
    pub(crate) fn new(cycle_ms: f64) -> Self {
        Self {
            timing: CycleTiming::new(cycle_ms, TICK_DURATION_MS).with_overflow(Overflow::Carry),
            last_good: None,
        }
    }

    pub(crate) fn advance(&mut self, ctx: &FrameContext) -> CycleTick {
        self.timing
            .update(ctx.scaled_delta(), ctx.scaled_absolute(), || {})
    }

    pub(crate) fn ticks_per_cycle(&self) -> f64 {
        self.timing.ticks_per_cycle()
    }

    /// Remembers a good frame, or substitutes for a failed one.
    pub(crate) fn settle(&mut self, name: &str, frame: Result<FormOutput>, origin: Point2) -> FormOutput {
        match frame {
            Ok(output) => {
                self.last_good = Some(output.clone());
                output
            }
            Err(err) => {
                tracing::warn!(form = name, %err, "frame failed; reusing last good frame");
                self.last_good.clone().unwrap_or_else(|| FormOutput {
                    lines: vec![Line::degenerate(origin)],
                    intersection_points: Vec::new(),
                })
            }
        }
    }
}

/// Samples a closed curve over one period without repeating the seam point.
pub(crate) fn sample_closed(curve: &impl ParametricCurve, t_start: f64, count: usize) -> Vec<Point2> {
    let mut points = curve.sample(t_start, t_start + std::f64::consts::TAU, count + 1);
    points.pop();
    points
}

/// Drops a trailing point that repeats the first, for closed lines.
pub(crate) fn strip_closing_point(points: &mut Vec<Point2>) {
    if points.len() > 2 {
        let (first, last) = (points[0], points[points.len() - 1]);
        if (last - first).norm_squared() < crate::operations::combine::JOIN_TOLERANCE_SQ {
            points.pop();
        }
    }
}
