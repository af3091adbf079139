//! Fixed-step run loop: commutate, integrate, record.

use tracing::{debug, error, info, trace, warn};

use bldc_actuator_core::commutation::commutate;
use bldc_actuator_core::dynamics::{BldcDynamics, NonFiniteState, StepOutput};
use bldc_core::config::{MotorParameters, StateAssignment};
use bldc_core::error::{ConfigError, SimError};
use bldc_core::time::StepClock;
use bldc_core::types::MotorState;
use bldc_record::history::History;
use bldc_record::types::HistoryRecord;

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Single-motor simulation with its recorded history.
///
/// Parameters are validated at construction and never change afterwards.
#[derive(Debug, Clone)]
pub struct Simulator {
    params: MotorParameters,
    dynamics: BldcDynamics,
    state: MotorState,
    clock: StepClock,
    history: History,
    last_output: Option<StepOutput>,
}

impl Simulator {
    /// Simulator starting from the zero state.
    pub fn new(params: MotorParameters) -> Result<Self, ConfigError> {
        Self::from_state(params, MotorState::zero(), 0)
    }

    /// Simulator starting from `initial`, with history room for `capacity`
    /// steps. `initial` must already be finite.
    pub(crate) fn from_state(
        params: MotorParameters,
        initial: MotorState,
        capacity: usize,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        if params.integration.state_assignment == StateAssignment::LegacySwapped {
            warn!("Legacy swapped state assignment selected: position and velocity fields are exchanged every step");
        }
        debug!(
            dt = params.dt(),
            pole_pairs = params.electrical.num_pole_pairs,
            input_voltage = params.electrical.input_voltage,
            "Simulator created"
        );
        Ok(Self {
            dynamics: BldcDynamics::new(&params),
            state: initial,
            clock: StepClock::new(params.dt()),
            history: History::starting_from(params.dt(), initial, capacity),
            last_output: None,
            params,
        })
    }

    pub const fn params(&self) -> &MotorParameters {
        &self.params
    }

    /// Current (last valid) state.
    pub const fn state(&self) -> &MotorState {
        &self.state
    }

    pub const fn clock(&self) -> &StepClock {
        &self.clock
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }

    /// Diagnostics of the most recent successful step.
    pub const fn last_output(&self) -> Option<&StepOutput> {
        self.last_output.as_ref()
    }

    /// Run one iteration and return the record it appended.
    ///
    /// On divergence nothing is recorded and the state stays at the last
    /// valid value. The reported step is the history index the failed record
    /// would have had.
    pub fn step(&mut self) -> Result<HistoryRecord, SimError> {
        let inputs = commutate(self.state.angular_position, &self.params);
        let step = self.clock.step().saturating_add(1);

        match self.dynamics.step(&self.state, &inputs) {
            Ok(output) => {
                let record = HistoryRecord::new(output.state, inputs);
                self.state = output.state;
                self.clock.advance();
                self.history.push(record);
                self.last_output = Some(output);
                trace!(
                    step,
                    position = output.state.angular_position,
                    velocity = output.state.angular_velocity,
                    torque = output.torque.net,
                    "Step"
                );
                Ok(record)
            }
            Err(NonFiniteState { field, .. }) => {
                error!(step, %field, "Simulation diverged");
                Err(SimError::Diverged {
                    step,
                    field,
                    last_valid: self.state,
                })
            }
        }
    }

    /// Run `n_steps` iterations, stopping at the first divergence.
    pub fn run(&mut self, n_steps: u64) -> Result<&History, SimError> {
        info!(
            n_steps,
            start_step = self.clock.step(),
            dt = self.params.dt(),
            "Starting run"
        );
        for _ in 0..n_steps {
            self.step()?;
        }
        info!(
            steps = self.clock.step(),
            sim_time = self.clock.seconds(),
            velocity = self.state.angular_velocity,
            "Run finished"
        );
        Ok(&self.history)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
