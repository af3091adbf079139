//! Fluent construction of a [`Simulator`].
//!
//! # Example
//!
//! ```
//! use bldc_core::types::MotorState;
//! use bldc_sim::SimulatorBuilder;
//!
//! let sim = SimulatorBuilder::new()
//!     .with_initial_state(MotorState::zero().with_velocity(50.0))
//!     .with_history_capacity(500)
//!     .build()
//!     .unwrap();
//! assert!((sim.state().angular_velocity - 50.0).abs() < f64::EPSILON);
//! ```

use std::path::Path;

use bldc_actuator_core::presets;
use bldc_core::config::MotorParameters;
use bldc_core::error::{BldcError, ConfigError, SimError};
use bldc_core::types::MotorState;

use crate::driver::Simulator;

// ---------------------------------------------------------------------------
// SimulatorBuilder
// ---------------------------------------------------------------------------

/// Builder for [`Simulator`].
///
/// Defaults to the reference preset, the zero initial state, and no history
/// preallocation.
#[derive(Debug, Clone)]
pub struct SimulatorBuilder {
    params: MotorParameters,
    initial_state: MotorState,
    history_capacity: usize,
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            params: presets::reference(),
            initial_state: MotorState::zero(),
            history_capacity: 0,
        }
    }

    /// Builder preloaded with parameters read from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::new().with_params(MotorParameters::from_file(path)?))
    }

    #[must_use]
    pub fn with_params(mut self, params: MotorParameters) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub const fn with_initial_state(mut self, state: MotorState) -> Self {
        self.initial_state = state;
        self
    }

    /// Preallocate history for this many steps.
    #[must_use]
    pub const fn with_history_capacity(mut self, steps: usize) -> Self {
        self.history_capacity = steps;
        self
    }

    pub const fn params(&self) -> &MotorParameters {
        &self.params
    }

    /// Validate and build.
    pub fn build(self) -> Result<Simulator, BldcError> {
        if let Some(field) = self.initial_state.first_non_finite() {
            return Err(SimError::InvalidInitialState(field).into());
        }
        Ok(Simulator::from_state(
            self.params,
            self.initial_state,
            self.history_capacity,
        )?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
