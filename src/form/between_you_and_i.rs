use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{GeometryError, Result};
use crate::geometry::{Ellipse, Line, ParametricCurve, RotatedTravelingWave, TravelingWave, Winding};
use crate::math::newton_2d::{solve_all, Intersection};
use crate::math::{wavenumber, Point2, Vector2};
use crate::operations::combine;

use super::{sample_closed, strip_closing_point, Form, FormClock, FormOutput, FrameContext};

const WIDTH: f64 = 4.0;
const HEIGHT: f64 = 3.0;
const CYCLE_MS: f64 = 12_000.0;

const RX: f64 = 1.2;
const RY: f64 = 1.0;

const WAVE_AMPLITUDE: f64 = 0.15;
const WAVE_LENGTH: f64 = 1.0;
const WAVE_OMEGA: f64 = 0.03;
/// How far past the ellipse the wipe starts and ends.
const WIPE_MARGIN: f64 = 0.2;

const ARC_SAMPLES: usize = 120;
const WIPE_SAMPLES: usize = 40;
const WIPER_SAMPLES: usize = 160;
const ELLIPSE_SAMPLES: usize = 240;
const ANGULAR_SEEDS: usize = 8;

/// An ellipse wiped by a vertical travelling wave.
///
/// Each cycle the wave sweeps left to right. The part of the ellipse on one
/// side of the wave is drawn, closed along the wave itself; the side swaps
/// at every cycle boundary so the shape alternately grows and shrinks.
/// The side is a function of the cycle index, so scrubbing to any time
/// shows the side playback would.
#[derive(Debug, Clone)]
pub struct BetweenYouAndI {
    clock: FormClock,
    growing: bool,
}

impl BetweenYouAndI {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: FormClock::new(CYCLE_MS),
            growing: true,
        }
    }

    /// Whether the region left of the wave is drawn.
    #[must_use]
    pub fn is_growing(&self) -> bool {
        self.growing
    }

    fn ellipse() -> Ellipse {
        Ellipse::new(Point2::origin(), RX, RY, Winding::CounterClockwise)
    }

    fn wipe_offset(cycle_ratio: f64) -> f64 {
        let reach = RX + WIPE_MARGIN;
        -reach + 2.0 * reach * cycle_ratio.clamp(0.0, 1.0)
    }

    fn wave(x_offset: f64, tick: f64) -> RotatedTravelingWave {
        let wave = TravelingWave::new(WAVE_AMPLITUDE, wavenumber(WAVE_LENGTH), WAVE_OMEGA).at_time(tick);
        RotatedTravelingWave::new(wave, FRAC_PI_2).with_offset(Vector2::new(x_offset, 0.0))
    }

    /// Guesses at both expected crossings plus a ring around the ellipse.
    /// The wave's parameter is its height, so `t2` starts at the ellipse's `y`.
    fn seeds(x_offset: f64) -> Vec<(f64, f64)> {
        let alpha = (x_offset / RX).clamp(-1.0, 1.0).acos();
        let mut seeds = vec![(alpha, RY * alpha.sin()), (-alpha, -RY * alpha.sin())];
        seeds.extend((0..ANGULAR_SEEDS).map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = TAU * i as f64 / ANGULAR_SEEDS as f64;
            (t, RY * t.sin())
        }));
        seeds
    }

    fn frame(cycle_ratio: f64, tick: f64, growing: bool) -> Result<FormOutput> {
        let ellipse = Self::ellipse();
        let x_offset = Self::wipe_offset(cycle_ratio);
        let wave = Self::wave(x_offset, tick);

        let reach = HEIGHT * 0.5 + WIPE_MARGIN;
        let wiper = Line::builder(wave.sample(-reach, reach, WIPER_SAMPLES))
            .clip_to_form_boundary(true)
            .build()?;

        if x_offset.abs() >= RX + WAVE_AMPLITUDE {
            // The wave is clear of the ellipse: the drawn side is all or nothing.
            let shape = if growing == (x_offset > 0.0) {
                Line::builder(sample_closed(&ellipse, 0.0, ELLIPSE_SAMPLES))
                    .closed(true)
                    .build()?
            } else {
                Line::degenerate(Point2::new(RX.copysign(x_offset), 0.0))
            };
            return Ok(FormOutput {
                lines: vec![shape, wiper],
                intersection_points: Vec::new(),
            });
        }

        let hits = solve_all(&ellipse, &wave, &Self::seeds(x_offset));
        let (lower, upper) = match (hits.first(), hits.last()) {
            (Some(lower), Some(upper)) if hits.len() >= 2 => (lower, upper),
            _ => {
                return Err(GeometryError::Degenerate(format!(
                    "wipe crosses the ellipse {} time(s) at x = {x_offset:.3}",
                    hits.len()
                ))
                .into())
            }
        };

        let shape = Line::builder(Self::region(&ellipse, &wave, lower, upper, growing))
            .closed(true)
            .build()?;

        Ok(FormOutput {
            lines: vec![shape, wiper],
            intersection_points: vec![lower.point, upper.point],
        })
    }

    /// The ellipse arc on the drawn side, closed along the wave between the hits.
    fn region(
        ellipse: &Ellipse,
        wave: &RotatedTravelingWave,
        lower: &Intersection,
        upper: &Intersection,
        growing: bool,
    ) -> Vec<Point2> {
        let t_upper = upper.t1.rem_euclid(TAU);
        let t_lower = lower.t1.rem_euclid(TAU);
        let arc = if growing {
            ellipse.sample(t_upper, t_lower, ARC_SAMPLES)
        } else {
            ellipse.sample(t_lower, t_upper + TAU, ARC_SAMPLES)
        };

        // The hits themselves are already the arc's ends.
        let mut wipe = wave.sample(lower.t2, upper.t2, WIPE_SAMPLES);
        wipe.pop();
        wipe.remove(0);

        let mut points = combine(&[arc.as_slice(), wipe.as_slice()]);
        strip_closing_point(&mut points);
        points
    }
}

impl Default for BetweenYouAndI {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for BetweenYouAndI {
    fn name(&self) -> &'static str {
        "Between You and I"
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn lines(&mut self, ctx: &FrameContext) -> FormOutput {
        let name = self.name();
        let cycle = self.clock.advance(ctx);
        // Even cycles grow, odd cycles shrink.
        self.growing = cycle.cycle % 2 == 0;
        let frame = Self::frame(cycle.cycle_ratio, cycle.tick, self.growing);
        self.clock.settle(name, frame, Point2::new(-RX, 0.0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LightformError;
    use approx::assert_relative_eq;

    fn on_ellipse(p: &Point2) -> f64 {
        (p.x / RX).powi(2) + (p.y / RY).powi(2)
    }

    #[test]
    fn wipe_spans_past_the_ellipse() {
        assert_relative_eq!(BetweenYouAndI::wipe_offset(0.0), -(RX + WIPE_MARGIN));
        assert_relative_eq!(BetweenYouAndI::wipe_offset(0.5), 0.0);
        assert_relative_eq!(BetweenYouAndI::wipe_offset(2.0), RX + WIPE_MARGIN);
    }

    #[test]
    fn mid_wipe_finds_both_crossings() {
        let out = BetweenYouAndI::frame(0.5, 600.0, true).unwrap();
        assert_eq!(out.intersection_points.len(), 2);
        for p in &out.intersection_points {
            assert_relative_eq!(on_ellipse(p), 1.0, epsilon = 1e-2);
        }
        let (lower, upper) = (out.intersection_points[0], out.intersection_points[1]);
        assert!(lower.y < 0.0 && upper.y > 0.0);

        assert_eq!(out.lines.len(), 2);
        assert!(out.lines[0].closed());
        assert!(out.lines[1].clip_to_form_boundary());
    }

    #[test]
    fn growing_draws_the_left_side() {
        let out = BetweenYouAndI::frame(0.5, 600.0, true).unwrap();
        let shape = out.lines[0].points();
        assert!(shape.iter().all(|p| p.x <= WAVE_AMPLITUDE + 1e-2));
        assert!(shape.iter().any(|p| (p.x + RX).abs() < 1e-2));
    }

    #[test]
    fn shrinking_draws_the_right_side() {
        let out = BetweenYouAndI::frame(0.5, 600.0, false).unwrap();
        let shape = out.lines[0].points();
        assert!(shape.iter().all(|p| p.x >= -WAVE_AMPLITUDE - 1e-2));
        assert!(shape.iter().any(|p| (p.x - RX).abs() < 1e-2));
    }

    #[test]
    fn region_has_no_adjacent_duplicates() {
        let out = BetweenYouAndI::frame(0.3, 123.0, true).unwrap();
        let shape = out.lines[0].points();
        for pair in shape.windows(2) {
            assert!((pair[1] - pair[0]).norm() > 1e-9);
        }
        assert!((shape[0] - shape[shape.len() - 1]).norm() > 1e-9);
    }

    #[test]
    fn clear_wave_draws_all_or_nothing() {
        let start_growing = BetweenYouAndI::frame(0.0, 0.0, true).unwrap();
        assert!(start_growing.lines[0].is_degenerate());
        assert!(start_growing.intersection_points.is_empty());

        let start_shrinking = BetweenYouAndI::frame(0.0, 0.0, false).unwrap();
        assert!(start_shrinking.lines[0].closed());
        assert_eq!(start_shrinking.lines[0].points().len(), ELLIPSE_SAMPLES);

        let end_growing = BetweenYouAndI::frame(1.0, 1200.0, true).unwrap();
        assert_eq!(end_growing.lines[0].points().len(), ELLIPSE_SAMPLES);
    }

    #[test]
    fn cycle_boundary_swaps_side() {
        let mut form = BetweenYouAndI::new();
        assert!(form.is_growing());
        form.lines(&FrameContext::new(CYCLE_MS * 0.5));
        assert!(form.is_growing());

        // The end of a grow and the start of a shrink both show the whole ellipse.
        let end = form.lines(&FrameContext::new(CYCLE_MS * 0.5));
        assert!(form.is_growing());
        assert_eq!(end.lines[0].points().len(), ELLIPSE_SAMPLES);
        let start = form.lines(&FrameContext::new(10.0));
        assert!(!form.is_growing());
        assert_eq!(start.lines[0].points().len(), ELLIPSE_SAMPLES);
    }

    #[test]
    fn side_follows_scrubbed_cycle() {
        let mut form = BetweenYouAndI::new();
        let held = form.lines(&FrameContext::scrub(13_000.0));
        for _ in 0..3 {
            assert_eq!(form.lines(&FrameContext::scrub(13_000.0)), held);
            assert!(!form.is_growing());
        }
        form.lines(&FrameContext::scrub(CYCLE_MS * 2.0 + 500.0));
        assert!(form.is_growing());
    }

    #[test]
    fn near_miss_finds_no_crossings() {
        // 215 ms in: the wave hugs the left of the ellipse about 0.01 away.
        let err = BetweenYouAndI::frame(215.0 / CYCLE_MS, 21.5, true);
        assert!(matches!(
            err,
            Err(LightformError::Geometry(GeometryError::Degenerate(_)))
        ));
    }
}
