//! Explicit Euler integration of the BLDC electrical and mechanical
//! equations.
//!
//! Per phase `x ∈ {a, b, c}` with offsets `{0, -φ, +φ}` and `θe = P·θ`:
//!
//! ```text
//! e_x      = Kw · ω · sin(θe + off_x)                 back-EMF
//! di_x/dt  = (V_x - R·i_x - e_x) / L                  RL winding
//! T_x      = Kw · sin(θe + off_x) · i_x               pre-update current
//! Tm       = P·(Ta + Tb + Tc) - Bm·ω - Tl             before friction
//! dω/dt    = friction(ω, Tm) / J
//! ```
//!
//! Currents and speed advance with `x' = x + dx/dt · dt`. The angle uses the
//! pre-step speed by default (see [`PositionUpdate`]).

use thiserror::Error;

use bldc_core::config::{IntegrationScheme, MotorParameters, PositionUpdate, StateAssignment};
use bldc_core::types::{MotorState, Phase, PhaseCurrents, PhaseVoltages, StateField, ThreePhase};

use crate::friction::FrictionModel;

// ---------------------------------------------------------------------------
// Step output
// ---------------------------------------------------------------------------

/// Time derivatives evaluated at the start of the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derivatives {
    /// `di/dt` per phase (A/s).
    pub current: PhaseCurrents,
    /// `dω/dt` (rad/s²).
    pub angular_acceleration: f64,
}

/// Torques evaluated at the start of the step (Nm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorqueBreakdown {
    /// Per-phase electrical torque `T_x`.
    pub per_phase: ThreePhase,
    /// `Te = Ta + Tb + Tc`.
    pub electrical: f64,
    /// `P·Te - Bm·ω - Tl`, before friction.
    pub mechanical: f64,
    /// Mechanical torque after friction; drives the acceleration.
    pub net: f64,
}

/// Everything one Euler step produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    pub state: MotorState,
    pub derivatives: Derivatives,
    pub torque: TorqueBreakdown,
    /// Back-EMF per phase (V).
    pub back_emf: ThreePhase,
}

/// The integrated state holds NaN or ±Inf.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{field} is not finite after integration")]
pub struct NonFiniteState {
    pub field: StateField,
    /// The offending output, kept for diagnostics.
    pub output: StepOutput,
}

// ---------------------------------------------------------------------------
// BldcDynamics
// ---------------------------------------------------------------------------

/// Stateless integrator with parameters pre-resolved for the hot loop.
///
/// Built once per run from validated [`MotorParameters`]; `1/L`, `φ` in
/// radians, and the friction model are computed up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BldcDynamics {
    inv_inductance: f64,
    resistance: f64,
    bemf_constant: f64,
    pole_pairs: f64,
    phase_offset: f64,
    damping: f64,
    inertia: f64,
    load_torque: f64,
    dt: f64,
    friction: FrictionModel,
    scheme: IntegrationScheme,
}

impl BldcDynamics {
    pub fn new(params: &MotorParameters) -> Self {
        let e = &params.electrical;
        let m = &params.mechanical;
        Self {
            inv_inductance: 1.0 / e.coil_inductance,
            resistance: e.coil_resistance,
            bemf_constant: e.bemf_constant,
            pole_pairs: e.pole_pairs(),
            phase_offset: e.phase_offset(),
            damping: m.damping_ratio,
            inertia: m.rotational_inertia,
            load_torque: m.load_torque,
            dt: params.dt(),
            friction: FrictionModel::from_params(m),
            scheme: params.integration,
        }
    }

    /// `sin(θe + off_x)` per phase.
    fn phase_sines(&self, theta_e: f64) -> ThreePhase {
        ThreePhase::from_fn(|p| (theta_e + p.offset_sign() * self.phase_offset).sin())
    }

    /// Per-phase electrical torque `Kw · sin(θe + off_x) · i_x` at `state`.
    pub fn phase_torques(&self, state: &MotorState) -> ThreePhase {
        let sines = self.phase_sines(self.pole_pairs * state.angular_position);
        self.torques_from(&sines, &state.currents)
    }

    fn torques_from(&self, sines: &ThreePhase, currents: &PhaseCurrents) -> ThreePhase {
        ThreePhase::from_fn(|p| self.bemf_constant * sines.get(p) * currents.get(p))
    }

    /// One Euler step without the finiteness check.
    pub fn integrate(&self, state: &MotorState, inputs: &PhaseVoltages) -> StepOutput {
        let omega = state.angular_velocity;
        let theta_e = self.pole_pairs * state.angular_position;
        let sines = self.phase_sines(theta_e);

        // Electrical
        let back_emf = sines.map(|s| self.bemf_constant * omega * s);
        let di_dt = ThreePhase::from_fn(|p| {
            self.inv_inductance
                * (inputs.get(p) - self.resistance * state.currents.get(p) - back_emf.get(p))
        });
        let currents = ThreePhase::from_fn(|p| state.currents.get(p) + di_dt.get(p) * self.dt);

        // Torque
        let per_phase = self.torques_from(&sines, &state.currents);
        let electrical = per_phase.sum();
        let mechanical = self.pole_pairs * electrical - self.damping * omega - self.load_torque;
        let net = self.friction.apply(omega, mechanical);

        // Mechanical
        let angular_acceleration = net / self.inertia;
        let new_omega = omega + angular_acceleration * self.dt;
        let advance_with = match self.scheme.position_update {
            PositionUpdate::PreStepVelocity => omega,
            PositionUpdate::PostStepVelocity => new_omega,
        };
        let new_theta = state.angular_position + advance_with * self.dt;

        let (angular_position, angular_velocity) = match self.scheme.state_assignment {
            StateAssignment::Physical => (new_theta, new_omega),
            StateAssignment::LegacySwapped => (new_omega, new_theta),
        };

        StepOutput {
            state: MotorState {
                currents,
                angular_position,
                angular_velocity,
            },
            derivatives: Derivatives {
                current: di_dt,
                angular_acceleration,
            },
            torque: TorqueBreakdown {
                per_phase,
                electrical,
                mechanical,
                net,
            },
            back_emf,
        }
    }

    /// One Euler step; fails if any field of the new state is not finite.
    pub fn step(
        &self,
        state: &MotorState,
        inputs: &PhaseVoltages,
    ) -> Result<StepOutput, NonFiniteState> {
        let output = self.integrate(state, inputs);
        match output.state.first_non_finite() {
            Some(field) => Err(NonFiniteState { field, output }),
            None => Ok(output),
        }
    }
}

/// Advance `state` by one timestep under `inputs`.
///
/// Convenience wrapper over [`BldcDynamics`]; prefer building the integrator
/// once when stepping repeatedly.
pub fn step(
    state: &MotorState,
    inputs: &PhaseVoltages,
    params: &MotorParameters,
) -> Result<StepOutput, NonFiniteState> {
    BldcDynamics::new(params).step(state, inputs)
}

/// Phase with the largest absolute current.
pub fn dominant_phase(currents: &PhaseCurrents) -> Phase {
    currents
        .iter()
        .fold((Phase::A, f64::NEG_INFINITY), |best, (p, i)| {
            if i.abs() > best.1 {
                (p, i.abs())
            } else {
                best
            }
        })
        .0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
