//! Rotor friction: stiction near standstill, decaying static term plus
//! constant kinetic term while moving.
//!
//! # Physics
//!
//! Stuck regime (`|ω| < min_velocity`):
//! - If `|T| < static_friction`: the rotor is held, net torque is zero.
//! - Otherwise: `T - static_friction`.
//!
//! Sliding regime:
//! `T - sign(ω) · (static_friction · exp(-5|ω|) + stribeck_friction)`.
//!
//! The map is discontinuous at `|ω| = min_velocity`.

use bldc_core::config::MechanicalParams;

/// Decay rate (s/rad) of the static term once the rotor slides.
pub const STATIC_DECAY_RATE: f64 = 5.0;

// ---------------------------------------------------------------------------
// FrictionRegime
// ---------------------------------------------------------------------------

/// Which branch of the friction model applies at a given speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrictionRegime {
    /// Below the velocity threshold: stiction can hold the rotor.
    Stuck,
    /// At or above the threshold: friction opposes motion.
    Sliding,
}

// ---------------------------------------------------------------------------
// FrictionModel
// ---------------------------------------------------------------------------

/// Velocity-dependent rotor friction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrictionModel {
    /// Stiction torque (Nm).
    pub static_friction: f64,
    /// Constant kinetic friction while sliding (Nm).
    pub stribeck_friction: f64,
    /// Velocity threshold for the stuck regime (rad/s).
    pub min_velocity: f64,
}

impl Default for FrictionModel {
    fn default() -> Self {
        Self::none()
    }
}

impl FrictionModel {
    /// No friction at all.
    pub const fn none() -> Self {
        Self {
            static_friction: 0.0,
            stribeck_friction: 0.0,
            min_velocity: 0.0,
        }
    }

    pub const fn new(static_friction: f64, stribeck_friction: f64, min_velocity: f64) -> Self {
        Self {
            static_friction,
            stribeck_friction,
            min_velocity,
        }
    }

    pub const fn from_params(mechanical: &MechanicalParams) -> Self {
        Self::new(
            mechanical.static_friction,
            mechanical.stribeck_friction,
            mechanical.min_velocity,
        )
    }

    pub fn regime(&self, velocity: f64) -> FrictionRegime {
        if velocity.abs() < self.min_velocity {
            FrictionRegime::Stuck
        } else {
            FrictionRegime::Sliding
        }
    }

    /// Friction magnitude while sliding at `velocity` (Nm, non-negative).
    pub fn sliding_magnitude(&self, velocity: f64) -> f64 {
        self.static_friction * (-STATIC_DECAY_RATE * velocity.abs()).exp() + self.stribeck_friction
    }

    /// Net torque after friction acts on `applied_torque` at `velocity`.
    pub fn apply(&self, velocity: f64, applied_torque: f64) -> f64 {
        match self.regime(velocity) {
            FrictionRegime::Stuck => {
                if applied_torque.abs() < self.static_friction {
                    0.0
                } else {
                    applied_torque - self.static_friction
                }
            }
            FrictionRegime::Sliding => {
                applied_torque - 1.0_f64.copysign(velocity) * self.sliding_magnitude(velocity)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
