//! Fixed-step accumulator that decouples physics from the display refresh rate.

use crate::settings::MAX_STEPS_PER_SECOND;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: Duration,
    max_steps: u32,
    accumulator: Duration,
}

impl FixedStepClock {
    /// Creates a clock producing `steps_per_second` steps, at most `max_steps`
    /// per call to [`FixedStepClock::advance`]. Zero arguments are treated as 1 and the rate is
    /// capped at [`MAX_STEPS_PER_SECOND`].
    pub fn new(steps_per_second: u32, max_steps: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / steps_per_second.clamp(1, MAX_STEPS_PER_SECOND),
            max_steps: max_steps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Length of one step.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Adds `elapsed` wall time and returns how many whole steps are due.
    ///
    /// Leftover time smaller than a step carries into the next call. If more
    /// than `max_steps` are due the backlog is dropped, so a long stall does not
    /// replay as a burst of catch-up steps.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulator >= self.step {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        steps
    }
}
