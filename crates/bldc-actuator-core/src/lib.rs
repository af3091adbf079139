//! Framework-agnostic electromechanical model of a three-phase BLDC motor.
//!
//! Pure Rust library with no I/O. Maps rotor angle to six-step drive
//! voltages and advances phase currents, rotor speed, and rotor angle by one
//! explicit Euler step.
//!
//! # Step Pipeline
//!
//! ```text
//! Rotor angle → Commutation → Phase voltages → Electrical → Torque → Friction → Mechanical
//!               (six-step)                     (RL + EMF)            (stiction)  (Euler)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use bldc_actuator_core::prelude::*;
//! use bldc_core::types::MotorState;
//!
//! let params = presets::reference();
//! let dynamics = BldcDynamics::new(&params);
//!
//! let state = MotorState::zero();
//! let inputs = commutate(state.angular_position, &params);
//! let out = dynamics.step(&state, &inputs).unwrap();
//! assert!(out.state.currents.c > 0.0);
//! ```

pub mod commutation;
pub mod dynamics;
pub mod friction;
pub mod presets;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::commutation::{commutate, electrical_degrees, Sector};
    pub use crate::dynamics::{step, BldcDynamics, Derivatives, NonFiniteState, StepOutput, TorqueBreakdown};
    pub use crate::friction::{FrictionModel, FrictionRegime};
    pub use crate::presets;
}
