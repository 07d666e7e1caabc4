/// Smallest accepted cycle or tick duration (milliseconds).
pub const MIN_DURATION: f64 = 1e-6;

/// What a delta update does with time that runs past the cycle boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Report the overflowing time once, then restart the next cycle from zero.
    #[default]
    Reset,
    /// Wrap into the next cycle and keep the overshoot, so the position in
    /// the cycle depends only on the total elapsed time.
    Carry,
}

/// Snapshot returned by [`CycleTiming::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleTick {
    /// Accumulated time over the cycle duration.
    pub cycle_ratio: f64,
    /// Accumulated time in ticks.
    pub tick: f64,
    /// Whether no cycle boundary has been crossed yet.
    pub first_time: bool,
    /// Index of the cycle `tick` belongs to, starting at 0.
    pub cycle: u64,
}

/// Converts elapsed time into cycle progress and fires a reset at each
/// cycle boundary.
///
/// Cycle `n` covers the elapsed interval `(n·C, (n+1)·C]`: the boundary
/// instant itself still belongs to the ending cycle.
#[derive(Debug, Clone)]
pub struct CycleTiming {
    elapsed: f64,
    accumulated: f64,
    cycle_duration: f64,
    tick_duration: f64,
    cycle: u64,
    first_time: bool,
    overflow: Overflow,
}

impl CycleTiming {
    /// Creates a timer; durations are in milliseconds and clamped to [`MIN_DURATION`].
    #[must_use]
    pub fn new(cycle_duration: f64, tick_duration: f64) -> Self {
        Self {
            elapsed: 0.0,
            accumulated: 0.0,
            cycle_duration: cycle_duration.max(MIN_DURATION),
            tick_duration: tick_duration.max(MIN_DURATION),
            cycle: 0,
            first_time: true,
            overflow: Overflow::Reset,
        }
    }

    /// Sets how delta updates treat time past the cycle boundary.
    #[must_use]
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Advances by `delta`, or jumps to `absolute` when given.
    ///
    /// An absolute time fixes the whole state: the same `absolute` always
    /// yields the same tick, cycle index and `first_time`, whatever came
    /// before.
    ///
    /// Under [`Overflow::Reset`], a delta update that pushes the accumulated
    /// time past the cycle duration reports that overflowing time, turns
    /// `first_time` false and zeroes the accumulator. Under
    /// [`Overflow::Carry`], delta updates behave exactly like jumping to the
    /// summed elapsed time.
    ///
    /// `on_reset` runs once, before this call returns, whenever the update
    /// leaves the state in a different cycle than before.
    pub fn update(&mut self, delta: f64, absolute: Option<f64>, mut on_reset: impl FnMut()) -> CycleTick {
        let previous = self.cycle;
        let tick = match (absolute, self.overflow) {
            (Some(t), _) => self.locate(t.max(0.0)),
            (None, Overflow::Carry) => self.locate(self.elapsed + delta.max(0.0)),
            (None, Overflow::Reset) => self.accumulate(delta.max(0.0)),
        };
        if self.cycle != previous {
            on_reset();
        }
        tick
    }

    fn accumulate(&mut self, delta: f64) -> CycleTick {
        self.accumulated += delta;
        self.elapsed += delta;
        let tick = self.snapshot();
        if self.accumulated <= self.cycle_duration {
            return tick;
        }

        self.accumulated = 0.0;
        self.cycle += 1;
        self.first_time = false;
        // The overshoot is dropped.
        self.elapsed = self.cycle_start();
        CycleTick {
            first_time: false,
            ..tick
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn locate(&mut self, elapsed: f64) -> CycleTick {
        let cycle = if elapsed > self.cycle_duration {
            ((elapsed / self.cycle_duration).ceil() - 1.0) as u64
        } else {
            0
        };
        self.elapsed = elapsed;
        self.cycle = cycle;
        self.accumulated = (elapsed - self.cycle_start()).clamp(0.0, self.cycle_duration);
        self.first_time = cycle == 0;
        self.snapshot()
    }

    #[allow(clippy::cast_precision_loss)]
    fn cycle_start(&self) -> f64 {
        self.cycle as f64 * self.cycle_duration
    }

    fn snapshot(&self) -> CycleTick {
        CycleTick {
            cycle_ratio: self.accumulated / self.cycle_duration,
            tick: self.accumulated / self.tick_duration,
            first_time: self.first_time,
            cycle: self.cycle,
        }
    }

    /// Time accumulated in the current cycle.
    #[must_use]
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    #[must_use]
    pub fn cycle_duration(&self) -> f64 {
        self.cycle_duration
    }

    #[must_use]
    pub fn tick_duration(&self) -> f64 {
        self.tick_duration
    }

    /// Ticks per cycle.
    #[must_use]
    pub fn ticks_per_cycle(&self) -> f64 {
        self.cycle_duration / self.tick_duration
    }

    /// Index of the current cycle.
    #[must_use]
    pub fn cycle_index(&self) -> u64 {
        self.cycle
    }

    /// Whether no cycle boundary has been crossed yet.
    #[must_use]
    pub fn is_first_cycle(&self) -> bool {
        self.first_time
    }
}
