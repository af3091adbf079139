use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StepClock
// ---------------------------------------------------------------------------

/// Fixed-timestep simulation clock.
///
/// Tracks the integer step count and derives time as `step * dt`, so the
/// time of sample `i` is exact to one multiplication rather than accumulating
/// `dt` additions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepClock {
    step: u64,
    dt: f64,
}

impl StepClock {
    /// Create a clock at step zero with timestep `dt` seconds.
    #[must_use]
    pub const fn new(dt: f64) -> Self {
        Self { step: 0, dt }
    }

    /// Completed step count.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Timestep in seconds.
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Elapsed simulated seconds.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        Self::time_of(self.step, self.dt)
    }

    /// Time in seconds of step `step` for timestep `dt`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time_of(step: u64, dt: f64) -> f64 {
        step as f64 * dt
    }

    /// Advance by one step.
    pub fn advance(&mut self) {
        self.step = self.step.saturating_add(1);
    }

}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}s (step {})", self.seconds(), self.step)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
