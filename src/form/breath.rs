use std::f64::consts::PI;

use crate::error::Result;
use crate::geometry::{EyeBranch, EyeWave, Line, ParametricCurve};
use crate::math::ramp::{linear_ramps, Ease, RampBlock};
use crate::math::Point2;
use crate::operations::combine;

use super::{strip_closing_point, Form, FormClock, FormOutput, FrameContext};

const WIDTH: f64 = 4.0;
const HEIGHT: f64 = 3.0;
const CYCLE_MS: f64 = 8_000.0;
const FADE_IN_TICKS: f64 = 150.0;

const HALF_WIDTH: f64 = 1.6;
const MAX_OPENING: f64 = 0.9;
const MAX_RIPPLE: f64 = 0.08;
const RIPPLE_FREQUENCY: f64 = 8.0;
/// Ripple phase advance per tick.
const RIPPLE_DRIFT: f64 = 0.05;
const BRANCH_SAMPLES: usize = 120;

/// Inhale, hold, exhale, hold.
const OPENING: [RampBlock; 4] = [
    RampBlock::new(320.0, 0.05, MAX_OPENING).eased(Ease::InOutQuad),
    RampBlock::hold(80.0, MAX_OPENING),
    RampBlock::new(320.0, MAX_OPENING, 0.05).eased(Ease::InOutQuad),
    RampBlock::hold(80.0, 0.05),
];

/// An eye that opens and closes once per cycle, its lids rippling.
#[derive(Debug, Clone)]
pub struct Breath {
    clock: FormClock,
}

impl Breath {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: FormClock::new(CYCLE_MS),
        }
    }

    fn frame(tick: f64, first_cycle: bool) -> Result<FormOutput> {
        let opening = linear_ramps(&OPENING, tick);
        let top = EyeWave::new(Point2::origin(), HALF_WIDTH, opening, EyeBranch::Top).with_ripple(
            MAX_RIPPLE * opening / MAX_OPENING,
            RIPPLE_FREQUENCY,
            tick * RIPPLE_DRIFT,
        );
        let bottom = top.mirrored();

        let upper = top.sample(0.0, PI, BRANCH_SAMPLES);
        let lower = bottom.sample(0.0, PI, BRANCH_SAMPLES);
        let mut outline = combine(&[upper.as_slice(), lower.as_slice()]);
        strip_closing_point(&mut outline);

        let opacity = if first_cycle {
            (tick / FADE_IN_TICKS).clamp(0.0, 1.0)
        } else {
            1.0
        };

        Ok(FormOutput {
            lines: vec![Line::builder(outline).closed(true).opacity(opacity).build()?],
            intersection_points: Vec::new(),
        })
    }
}

impl Default for Breath {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for Breath {
    fn name(&self) -> &'static str {
        "Breath"
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn lines(&mut self, ctx: &FrameContext) -> FormOutput {
        let name = self.name();
        let cycle = self.clock.advance(ctx);
        self.clock
            .settle(name, Self::frame(cycle.tick, cycle.first_time), Point2::origin())
    }
}
