mod cycle;

pub use cycle::{CycleTick, CycleTiming, Overflow, MIN_DURATION};
