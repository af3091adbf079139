use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_pole_pairs() -> u32 {
    1
}
const fn default_commutation_phase_diff() -> f64 {
    120.0
}
const fn default_dynamics_timestep() -> f64 {
    1e-5
}

// ---------------------------------------------------------------------------
// ElectricalParams
// ---------------------------------------------------------------------------

/// Winding and supply parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalParams {
    /// Per-phase coil inductance `L` (H). Must be > 0.
    pub coil_inductance: f64,
    /// Per-phase coil resistance `R` (Ohm).
    pub coil_resistance: f64,
    /// Supply voltage magnitude `Vb` (V).
    pub input_voltage: f64,
    /// Back-EMF constant `Kw` (V/(rad/s)), also the per-phase torque constant.
    pub bemf_constant: f64,
    /// Pole-pair count `P` (default: 1).
    #[serde(default = "default_pole_pairs")]
    pub num_pole_pairs: u32,
    /// Commutation phase offset `phi` in degrees (default: 120).
    #[serde(default = "default_commutation_phase_diff")]
    pub commutation_phase_diff: f64,
}

impl ElectricalParams {
    /// Commutation phase offset in radians.
    pub fn phase_offset(&self) -> f64 {
        self.commutation_phase_diff.to_radians()
    }

    /// Pole-pair count as a float factor.
    pub fn pole_pairs(&self) -> f64 {
        f64::from(self.num_pole_pairs)
    }
}

// ---------------------------------------------------------------------------
// MechanicalParams
// ---------------------------------------------------------------------------

/// Rotor, load, and friction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicalParams {
    /// Viscous damping `Bm` (Nm/(rad/s)).
    pub damping_ratio: f64,
    /// Rotor inertia `J` (kg·m²). Must be > 0.
    pub rotational_inertia: f64,
    /// Stiction torque (Nm). Holds the rotor near zero speed.
    #[serde(default)]
    pub static_friction: f64,
    /// Constant kinetic friction torque (Nm) applied while moving.
    #[serde(default)]
    pub stribeck_friction: f64,
    /// Speed below which the stiction regime applies (rad/s).
    #[serde(default)]
    pub min_velocity: f64,
    /// External load torque `Tl` (Nm).
    #[serde(default)]
    pub load_torque: f64,
}

// ---------------------------------------------------------------------------
// IntegrationScheme
// ---------------------------------------------------------------------------

/// Velocity used to advance the rotor angle within one Euler step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionUpdate {
    /// `θ' = θ + ω·dt`: position lags velocity by one step.
    #[default]
    PreStepVelocity,
    /// `θ' = θ + ω'·dt`: semi-implicit Euler.
    PostStepVelocity,
}

/// How the updated mechanical values are written into the new state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateAssignment {
    /// Updated angle into `angular_position`, updated speed into
    /// `angular_velocity`.
    #[default]
    Physical,
    /// Updated speed into `angular_position` and updated angle into
    /// `angular_velocity`. Reproduces legacy recordings only; the resulting
    /// trajectories are not physically meaningful.
    LegacySwapped,
}

/// Numerical choices of the fixed-step integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationScheme {
    #[serde(default)]
    pub position_update: PositionUpdate,
    #[serde(default)]
    pub state_assignment: StateAssignment,
}

// ---------------------------------------------------------------------------
// MotorParameters
// ---------------------------------------------------------------------------

/// Complete, read-only parameter set for one simulation run.
///
/// Mirrors the on-disk layout:
///
/// ```toml
/// dynamics_timestep = 1e-5
///
/// [electrical]
/// coil_inductance = 0.0005
/// coil_resistance = 0.4
/// input_voltage = 12.0
/// bemf_constant = 0.02
/// num_pole_pairs = 4
/// commutation_phase_diff = 120.0
///
/// [mechanical]
/// damping_ratio = 1e-5
/// rotational_inertia = 2e-5
/// static_friction = 0.002
/// stribeck_friction = 0.001
/// min_velocity = 0.01
/// load_torque = 0.0
///
/// [integration]
/// position_update = "pre_step_velocity"
/// state_assignment = "physical"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorParameters {
    /// Fixed integration timestep `dt` (s). Must be > 0.
    #[serde(default = "default_dynamics_timestep")]
    pub dynamics_timestep: f64,
    pub electrical: ElectricalParams,
    pub mechanical: MechanicalParams,
    #[serde(default)]
    pub integration: IntegrationScheme,
}

impl MotorParameters {
    pub const fn new(electrical: ElectricalParams, mechanical: MechanicalParams) -> Self {
        Self {
            dynamics_timestep: default_dynamics_timestep(),
            electrical,
            mechanical,
            integration: IntegrationScheme {
                position_update: PositionUpdate::PreStepVelocity,
                state_assignment: StateAssignment::Physical,
            },
        }
    }

    #[must_use]
    pub const fn with_timestep(mut self, dt: f64) -> Self {
        self.dynamics_timestep = dt;
        self
    }

    #[must_use]
    pub const fn with_load_torque(mut self, load_torque: f64) -> Self {
        self.mechanical.load_torque = load_torque;
        self
    }

    #[must_use]
    pub const fn with_input_voltage(mut self, input_voltage: f64) -> Self {
        self.electrical.input_voltage = input_voltage;
        self
    }

    #[must_use]
    pub const fn with_integration(mut self, integration: IntegrationScheme) -> Self {
        self.integration = integration;
        self
    }

    /// Timestep `dt` in seconds.
    pub const fn dt(&self) -> f64 {
        self.dynamics_timestep
    }

    /// Validate parameter domains. Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.electrical;
        let m = &self.mechanical;

        positive("coil_inductance", e.coil_inductance)?;
        finite("coil_resistance", e.coil_resistance)?;
        finite("input_voltage", e.input_voltage)?;
        finite("bemf_constant", e.bemf_constant)?;
        finite("commutation_phase_diff", e.commutation_phase_diff)?;
        if e.num_pole_pairs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "num_pole_pairs".into(),
                message: "must be at least 1".into(),
            });
        }

        finite("damping_ratio", m.damping_ratio)?;
        positive("rotational_inertia", m.rotational_inertia)?;
        non_negative("static_friction", m.static_friction)?;
        non_negative("stribeck_friction", m.stribeck_friction)?;
        non_negative("min_velocity", m.min_velocity)?;
        finite("load_torque", m.load_torque)?;

        positive("dynamics_timestep", self.dynamics_timestep)?;
        Ok(())
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
