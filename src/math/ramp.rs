use serde::{Deserialize, Serialize};

/// Easing curve applied to the progress within a ramp block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Ease {
    /// Maps progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// One block of a piecewise schedule: over `span` ticks, go from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RampBlock {
    pub span: f64,
    pub from: f64,
    pub to: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl RampBlock {
    /// A linear block.
    #[must_use]
    pub const fn new(span: f64, from: f64, to: f64) -> Self {
        Self {
            span,
            from,
            to,
            ease: Ease::Linear,
        }
    }

    /// A block that holds `value` for `span` ticks.
    #[must_use]
    pub const fn hold(span: f64, value: f64) -> Self {
        Self::new(span, value, value)
    }

    /// Returns the block with a different easing.
    #[must_use]
    pub const fn eased(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    fn value_at(&self, offset: f64) -> f64 {
        let progress = if self.span > 0.0 { offset / self.span } else { 1.0 };
        let progress = self.ease.apply(progress);
        self.from + (self.to - self.from) * progress
    }
}

/// Evaluates a periodic piecewise schedule at `tick`.
///
/// The blocks' spans sum to the schedule period. `tick` is wrapped into the
/// period, the block containing it is found, and its `from → to` range is
/// interpolated by the progress within that block. Empty schedules and
/// schedules with no positive span evaluate to `0`.
#[must_use]
pub fn linear_ramps(blocks: &[RampBlock], tick: f64) -> f64 {
    let total: f64 = blocks.iter().map(|b| b.span.max(0.0)).sum();
    if total <= 0.0 || !tick.is_finite() {
        return 0.0;
    }

    let mut offset = tick.rem_euclid(total);
    for block in blocks {
        let span = block.span.max(0.0);
        if offset < span {
            return block.value_at(offset);
        }
        offset -= span;
    }

    // Rounding left `offset` at the very end of the period.
    blocks
        .iter()
        .rev()
        .find(|b| b.span > 0.0)
        .map_or(0.0, |b| b.to)
}
