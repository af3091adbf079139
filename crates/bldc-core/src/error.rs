use thiserror::Error;

use crate::types::{MotorState, StateField};

/// Top-level error type for the BLDC simulator.
#[derive(Debug, Error)]
pub enum BldcError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),
}

/// Configuration errors, raised before any stepping happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid {field}: {value} (must be > 0)")]
    NotPositive { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value} (must be >= 0)")]
    Negative { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value} (must be finite)")]
    NotFinite { field: &'static str, value: f64 },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Simulation runtime errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// A state field became NaN or infinite. `last_valid` is the state the
    /// failing step started from.
    #[error("Simulation diverged at step {step}: {field} is not finite (last valid state: {last_valid})")]
    Diverged {
        step: u64,
        field: StateField,
        last_valid: MotorState,
    },

    #[error("Initial state is not finite: {0}")]
    InvalidInitialState(StateField),
}

impl SimError {
    /// Step index at which the run stopped, if it diverged.
    pub const fn step(&self) -> Option<u64> {
        match self {
            Self::Diverged { step, .. } => Some(*step),
            Self::InvalidInitialState(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bldc_error_from_config_error() {
        let err = ConfigError::NotPositive {
            field: "dynamics_timestep",
            value: -1.0,
        };
        let bldc_err: BldcError = err.into();
        assert!(matches!(bldc_err, BldcError::Config(_)));
        assert!(bldc_err.to_string().contains("-1"));
    }

    #[test]
    fn bldc_error_from_sim_error() {
        let err = SimError::Diverged {
            step: 12,
            field: StateField::PhaseCurrentA,
            last_valid: MotorState::zero(),
        };
        let bldc_err: BldcError = err.into();
        assert!(matches!(bldc_err, BldcError::Simulation(_)));
        assert!(bldc_err.to_string().contains("not finite"));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
    }

    #[test]
    fn config_error_display_messages() {
        assert_eq!(
            ConfigError::NotPositive {
                field: "coil_inductance",
                value: 0.0
            }
            .to_string(),
            "Invalid coil_inductance: 0 (must be > 0)"
        );
        assert_eq!(
            ConfigError::Negative {
                field: "static_friction",
                value: -0.5
            }
            .to_string(),
            "Invalid static_friction: -0.5 (must be >= 0)"
        );
        assert_eq!(
            ConfigError::NotFinite {
                field: "input_voltage",
                value: f64::INFINITY
            }
            .to_string(),
            "Invalid input_voltage: inf (must be finite)"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                field: "num_pole_pairs".into(),
                message: "must be at least 1".into()
            }
            .to_string(),
            "Invalid value for num_pole_pairs: must be at least 1"
        );
    }

    #[test]
    fn sim_error_display_messages() {
        assert_eq!(
            SimError::Diverged {
                step: 7,
                field: StateField::AngularVelocity,
                last_valid: MotorState::zero(),
            }
            .to_string(),
            "Simulation diverged at step 7: angular_velocity is not finite \
             (last valid state: i = [0.0000e0, 0.0000e0, 0.0000e0] A, \
             theta = 0.0000e0 rad, omega = 0.0000e0 rad/s)"
        );
        assert_eq!(
            SimError::InvalidInitialState(StateField::PhaseCurrentB).to_string(),
            "Initial state is not finite: phase_current_b"
        );
    }

    #[test]
    fn sim_error_step_accessor() {
        let err = SimError::Diverged {
            step: 42,
            field: StateField::AngularPosition,
            last_valid: MotorState::zero(),
        };
        assert_eq!(err.step(), Some(42));
        assert_eq!(
            SimError::InvalidInitialState(StateField::AngularPosition).step(),
            None
        );
    }
}
