use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::Result;
use crate::geometry::{CircleWave, Line};
use crate::math::ramp::{linear_ramps, RampBlock};
use crate::math::Point2;

use super::{sample_closed, Form, FormClock, FormOutput, FrameContext};

const SIZE: f64 = 4.0;
const CYCLE_MS: f64 = 16_000.0;
const SAMPLES: usize = 180;
const FADE_IN_TICKS: f64 = 200.0;

const OUTER_RADIUS: f64 = 1.5;
const OUTER_RIPPLES: f64 = 3.0;
const OUTER_SPEED: f64 = 0.01;
const PULSE_FREQUENCY: f64 = 0.005;

const INNER_RADIUS: f64 = 0.7;
const INNER_RIPPLES: f64 = 5.0;
const INNER_SPEED: f64 = -0.015;
/// Distance of the inner circle's centre from the origin.
const ORBIT: f64 = 0.4;

const AMPLITUDE: [RampBlock; 2] = [RampBlock::new(800.0, 0.0, 0.2), RampBlock::new(800.0, 0.2, 0.0)];

/// An outer and an inner rippling circle. The inner one orbits the centre
/// once per cycle while the two ripples travel in opposite directions.
#[derive(Debug, Clone)]
pub struct Coupling {
    clock: FormClock,
}

impl Coupling {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: FormClock::new(CYCLE_MS),
        }
    }

    fn frame(tick: f64, ticks_per_cycle: f64, first_cycle: bool) -> Result<FormOutput> {
        let amplitude = linear_ramps(&AMPLITUDE, tick);

        let outer = CircleWave::new(Point2::origin(), OUTER_RADIUS)
            .with_ripple(amplitude, OUTER_RIPPLES, OUTER_SPEED, 0.0)
            .with_pulse(PULSE_FREQUENCY, 0.0)
            .at_time(tick);

        let (sin, cos) = (tick * TAU / ticks_per_cycle).sin_cos();
        let inner = CircleWave::new(Point2::new(ORBIT * cos, ORBIT * sin), INNER_RADIUS)
            .with_ripple(amplitude * 0.5, INNER_RIPPLES, INNER_SPEED, 0.0)
            .with_pulse(PULSE_FREQUENCY, FRAC_PI_2)
            .at_time(tick);

        let opacity = if first_cycle {
            (tick / FADE_IN_TICKS).clamp(0.0, 1.0)
        } else {
            1.0
        };

        Ok(FormOutput {
            lines: vec![
                Line::builder(sample_closed(&outer, 0.0, SAMPLES))
                    .closed(true)
                    .opacity(opacity)
                    .build()?,
                Line::builder(sample_closed(&inner, 0.0, SAMPLES))
                    .closed(true)
                    .opacity(opacity)
                    .build()?,
            ],
            intersection_points: Vec::new(),
        })
    }
}

impl Default for Coupling {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for Coupling {
    fn name(&self) -> &'static str {
        "Coupling"
    }

    fn size(&self) -> (f64, f64) {
        (SIZE, SIZE)
    }

    fn lines(&mut self, ctx: &FrameContext) -> FormOutput {
        let name = self.name();
        let cycle = self.clock.advance(ctx);
        let frame = Self::frame(cycle.tick, self.clock.ticks_per_cycle(), cycle.first_time);
        self.clock.settle(name, frame, Point2::origin())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TICKS: f64 = CYCLE_MS / crate::form::TICK_DURATION_MS;

    #[test]
    fn emits_two_closed_circles() {
        let out = Coupling::frame(400.0, TICKS, false).unwrap();
        assert_eq!(out.lines.len(), 2);
        for line in &out.lines {
            assert!(line.closed());
            assert_eq!(line.points().len(), SAMPLES);
        }
        assert!(out.intersection_points.is_empty());
    }

    #[test]
    fn inner_circle_stays_inside_outer() {
        for tick in [0.0, 250.0, 800.0, 1234.0, 1599.0] {
            let out = Coupling::frame(tick, TICKS, false).unwrap();
            let outer_min = out.lines[0]
                .points()
                .iter()
                .map(|p| p.coords.norm())
                .fold(f64::INFINITY, f64::min);
            for p in out.lines[1].points() {
                assert!(p.coords.norm() < outer_min, "tick {tick}: {p:?} escapes the outer circle");
            }
        }
    }

    #[test]
    fn flat_at_cycle_start() {
        let out = Coupling::frame(0.0, TICKS, false).unwrap();
        for p in out.lines[0].points() {
            assert_relative_eq!(p.coords.norm(), OUTER_RADIUS, epsilon = 1e-12);
        }
    }

    #[test]
    fn fades_in_during_first_cycle_only() {
        let mut form = Coupling::new();
        let first = form.lines(&FrameContext::new(500.0));
        assert_relative_eq!(first.lines[0].opacity(), 0.25);

        let wrapped = form.lines(&FrameContext::new(CYCLE_MS));
        assert_relative_eq!(wrapped.lines[0].opacity(), 1.0);
        let next = form.lines(&FrameContext::new(100.0));
        assert_relative_eq!(next.lines[1].opacity(), 1.0);
    }
}
