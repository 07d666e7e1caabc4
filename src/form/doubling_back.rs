use crate::error::Result;
use crate::geometry::{ClipPlane2, Line, ParametricCurve, RotatedTravelingWave, TravelingWave};
use crate::math::newton_2d::solve_all;
use crate::math::ramp::{linear_ramps, RampBlock};
use crate::math::{wavenumber, Point2, Vector2};

use super::{Form, FormClock, FormOutput, FrameContext};

const WIDTH: f64 = 4.0;
const HEIGHT: f64 = 3.0;
const CYCLE_MS: f64 = 20_000.0;
const SAMPLES: usize = 240;
const SEEDS: usize = 16;
/// Temporal frequency of both waves, radians per tick.
const OMEGA: f64 = 0.02;
/// Below this crossing angle the two waves are treated as coincident.
const MIN_CROSSING_ANGLE: f64 = 1e-2;
/// The rotated wave overshoots the form so its ends stay outside the frame.
const OVERSHOOT: f64 = 1.25;

const AMPLITUDE: [RampBlock; 3] = [
    RampBlock::new(500.0, 0.0, 0.6),
    RampBlock::hold(1000.0, 0.6),
    RampBlock::new(500.0, 0.6, 0.0),
];

const ROTATION: [RampBlock; 2] = [RampBlock::new(1000.0, 0.0, 0.5), RampBlock::new(1000.0, 0.5, 0.0)];

/// Edge of the reveal wipe; the rotated wave shows left of it.
const REVEAL_EDGE: [RampBlock; 2] = [
    RampBlock::new(500.0, -WIPE_REACH, WIPE_REACH),
    RampBlock::hold(500.0, WIPE_REACH),
];

/// Edge of the conceal wipe; the rotated wave shows right of it.
const CONCEAL_EDGE: [RampBlock; 2] = [
    RampBlock::hold(500.0, -WIPE_REACH),
    RampBlock::new(500.0, -WIPE_REACH, WIPE_REACH),
];

/// Half the cycle, in ticks: the reveal runs before it, the conceal after.
const HALF_CYCLE_TICKS: f64 = 1000.0;
const WIPE_REACH: f64 = WIDTH * 0.5 * OVERSHOOT;

const WAVELENGTH: [RampBlock; 2] = [RampBlock::new(1000.0, 2.0, 1.2), RampBlock::new(1000.0, 1.2, 2.0)];

/// Two waves running in opposite directions; the second one turns away
/// from the first and doubles back over the cycle. Crossings are reported
/// as intersection points.
///
/// The rotated wave is wiped in from the left over the first quarter of the
/// cycle and wiped out to the right over the last quarter.
#[derive(Debug, Clone)]
pub struct DoublingBack {
    clock: FormClock,
}

impl DoublingBack {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: FormClock::new(CYCLE_MS),
        }
    }

    /// The half-plane the rotated wave is clipped to at `tick`.
    fn wipe(tick: f64) -> ClipPlane2 {
        let tick = tick.rem_euclid(2.0 * HALF_CYCLE_TICKS);
        if tick < HALF_CYCLE_TICKS {
            let edge = linear_ramps(&REVEAL_EDGE, tick);
            ClipPlane2::new(Vector2::new(-1.0, 0.0), edge)
        } else {
            let edge = linear_ramps(&CONCEAL_EDGE, tick - HALF_CYCLE_TICKS);
            ClipPlane2::new(Vector2::new(1.0, 0.0), -edge)
        }
    }

    fn frame(tick: f64) -> Result<FormOutput> {
        let amplitude = linear_ramps(&AMPLITUDE, tick);
        let angle = linear_ramps(&ROTATION, tick);
        let k = wavenumber(linear_ramps(&WAVELENGTH, tick));

        let forward = TravelingWave::new(amplitude, k, OMEGA).at_time(tick);
        let backward =
            RotatedTravelingWave::new(TravelingWave::new(amplitude, k, -OMEGA).at_time(tick), angle);

        let half = WIDTH * 0.5;
        let forward_points = forward.sample(-half, half, SAMPLES);
        let backward_points = backward.sample(-half * OVERSHOOT, half * OVERSHOOT, SAMPLES);

        let intersection_points = if angle.abs() < MIN_CROSSING_ANGLE {
            Vec::new()
        } else {
            #[allow(clippy::cast_precision_loss)]
            let guesses: Vec<(f64, f64)> = (0..SEEDS)
                .map(|i| {
                    let x = -half + WIDTH * (i as f64 + 0.5) / SEEDS as f64;
                    (x, x)
                })
                .collect();
            solve_all(&forward, &backward, &guesses)
                .into_iter()
                .map(|hit| hit.point)
                .filter(|p| p.x.abs() <= half && p.y.abs() <= HEIGHT * 0.5)
                .collect()
        };

        Ok(FormOutput {
            lines: vec![
                Line::builder(forward_points).build()?,
                Line::builder(backward_points)
                    .clipping_plane(Self::wipe(tick))
                    .clip_to_form_boundary(true)
                    .build()?,
            ],
            intersection_points,
        })
    }
}

impl Default for DoublingBack {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for DoublingBack {
    fn name(&self) -> &'static str {
        "Doubling Back"
    }

    fn size(&self) -> (f64, f64) {
        (WIDTH, HEIGHT)
    }

    fn lines(&mut self, ctx: &FrameContext) -> FormOutput {
        let name = self.name();
        let tick = self.clock.advance(ctx).tick;
        self.clock.settle(name, Self::frame(tick), Point2::origin())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn emits_two_open_lines() {
        let mut form = DoublingBack::new();
        let out = form.lines(&FrameContext::new(16.0));
        assert_eq!(out.lines.len(), 2);
        assert!(out.lines.iter().all(|l| !l.closed()));
        assert_eq!(out.lines[0].points().len(), SAMPLES);
        assert!(out.lines[1].clip_to_form_boundary());
    }

    #[test]
    fn coincident_waves_report_no_crossings() {
        let out = DoublingBack::frame(0.0).unwrap();
        assert!(out.intersection_points.is_empty());
    }

    #[test]
    fn crossings_lie_on_both_waves() {
        let tick = 700.0;
        let out = DoublingBack::frame(tick).unwrap();
        assert!(out.intersection_points.len() >= 2);

        let amplitude = linear_ramps(&AMPLITUDE, tick);
        let k = wavenumber(linear_ramps(&WAVELENGTH, tick));
        let forward = TravelingWave::new(amplitude, k, OMEGA).at_time(tick);
        for p in &out.intersection_points {
            assert!((forward.position(p.x).y - p.y).abs() < 1e-2, "{p:?} is off the forward wave");
            assert!(p.x.abs() <= WIDTH * 0.5);
        }
    }

    #[test]
    fn wipe_reveals_then_conceals() {
        let left = Point2::new(-0.5, 0.0);
        let right = Point2::new(0.5, 0.0);

        // Halfway through the reveal the edge is at the centre.
        let reveal = DoublingBack::wipe(250.0);
        assert!(reveal.keeps(&left) && !reveal.keeps(&right));

        // Fully revealed while the amplitude holds.
        let held = DoublingBack::wipe(1000.0 - 1.0);
        let wave = DoublingBack::frame(999.0).unwrap();
        assert!(wave.lines[1].points().iter().all(|p| held.keeps(p)));

        let conceal = DoublingBack::wipe(1750.0);
        assert!(conceal.keeps(&right) && !conceal.keeps(&left));

        // The wipe repeats every cycle.
        assert_eq!(DoublingBack::wipe(2250.0), reveal);
    }

    #[test]
    fn rotated_wave_carries_the_wipe() {
        let out = DoublingBack::frame(250.0).unwrap();
        assert!(out.lines[0].clipping_planes().is_empty());
        assert_eq!(out.lines[1].clipping_planes(), &[DoublingBack::wipe(250.0)]);
    }

    #[test]
    fn forward_wave_spans_the_width() {
        let out = DoublingBack::frame(250.0).unwrap();
        let pts = out.lines[0].points();
        assert!((pts[0].x + WIDTH * 0.5).abs() < 1e-12);
        assert!((pts[pts.len() - 1].x - WIDTH * 0.5).abs() < 1e-12);
    }
}
