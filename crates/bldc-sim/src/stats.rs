//! Summary statistics of a recorded run.

use std::f64::consts::TAU;
use std::fmt;

use serde::Serialize;

use bldc_actuator_core::dynamics::{dominant_phase, BldcDynamics};
use bldc_core::config::MotorParameters;
use bldc_core::types::Phase;
use bldc_record::history::History;

// ---------------------------------------------------------------------------
// RunStats
// ---------------------------------------------------------------------------

/// Aggregates over every record of a [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunStats {
    /// Completed steps.
    pub steps: usize,
    /// Simulated duration (s).
    pub duration: f64,
    /// Largest absolute phase current seen (A).
    pub peak_current: f64,
    /// Phase carrying `peak_current`.
    pub peak_current_phase: Phase,
    /// Rotor speed at the last record (rad/s).
    pub final_velocity: f64,
    /// Largest absolute rotor speed (rad/s).
    pub peak_speed: f64,
    /// Net mechanical revolutions from the first to the last record.
    pub revolutions: f64,
    /// Electrical torque `Te` averaged over the states each step started
    /// from (Nm). Zero for a run with no steps.
    pub mean_electrical_torque: f64,
}

impl RunStats {
    pub fn from_history(history: &History, params: &MotorParameters) -> Self {
        let records = history.records();
        let dynamics = BldcDynamics::new(params);

        let mut peak_current = 0.0;
        let mut peak_current_phase = Phase::A;
        let mut peak_speed: f64 = 0.0;
        for r in records {
            let phase = dominant_phase(&r.state.currents);
            let i = r.state.currents.get(phase).abs();
            if i > peak_current {
                peak_current = i;
                peak_current_phase = phase;
            }
            peak_speed = peak_speed.max(r.state.angular_velocity.abs());
        }

        let steps = history.steps();
        let mean_electrical_torque = if steps == 0 {
            0.0
        } else {
            let total: f64 = records[..steps]
                .iter()
                .map(|r| dynamics.phase_torques(&r.state).sum())
                .sum();
            #[allow(clippy::cast_precision_loss)]
            let n = steps as f64;
            total / n
        };

        let (first, last) = match (history.first(), history.last()) {
            (Some(f), Some(l)) => (f.state, l.state),
            _ => Default::default(),
        };

        Self {
            steps,
            duration: history.time(steps),
            peak_current,
            peak_current_phase,
            final_velocity: last.angular_velocity,
            peak_speed,
            revolutions: (last.angular_position - first.angular_position) / TAU,
            mean_electrical_torque,
        }
    }

    /// Final speed in revolutions per minute.
    pub fn final_rpm(&self) -> f64 {
        self.final_velocity * 60.0 / TAU
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "steps:              {}", self.steps)?;
        writeln!(f, "duration:           {:.6} s", self.duration)?;
        writeln!(
            f,
            "peak current:       {:.4} A (phase {})",
            self.peak_current, self.peak_current_phase
        )?;
        writeln!(
            f,
            "final velocity:     {:.4} rad/s ({:.1} rpm)",
            self.final_velocity,
            self.final_rpm()
        )?;
        writeln!(f, "peak speed:         {:.4} rad/s", self.peak_speed)?;
        writeln!(f, "revolutions:        {:.4}", self.revolutions)?;
        write!(f, "mean torque (Te):   {:.6} Nm", self.mean_electrical_torque)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
