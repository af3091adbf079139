//! Parameter sets for common small BLDC motor classes.
//!
//! Values are representative, not datasheet-exact. Every preset validates
//! and is stable under forward Euler at its default timestep
//! (`R·dt/L ≪ 1`).

use bldc_core::config::{ElectricalParams, MechanicalParams, MotorParameters};

/// General-purpose 4-pole-pair motor on a 12 V supply.
pub const fn reference() -> MotorParameters {
    MotorParameters::new(
        ElectricalParams {
            coil_inductance: 5e-4,
            coil_resistance: 0.4,
            input_voltage: 12.0,
            bemf_constant: 0.02,
            num_pole_pairs: 4,
            commutation_phase_diff: 120.0,
        },
        MechanicalParams {
            damping_ratio: 1e-5,
            rotational_inertia: 2e-5,
            static_friction: 0.002,
            stribeck_friction: 0.001,
            min_velocity: 0.01,
            load_torque: 0.0,
        },
    )
    .with_timestep(1e-5)
}

/// Drone-class outrunner (7 pole pairs, low winding resistance).
pub const fn outrunner() -> MotorParameters {
    MotorParameters::new(
        ElectricalParams {
            coil_inductance: 3e-5,
            coil_resistance: 0.08,
            input_voltage: 14.8,
            bemf_constant: 0.004,
            num_pole_pairs: 7,
            commutation_phase_diff: 120.0,
        },
        MechanicalParams {
            damping_ratio: 2e-6,
            rotational_inertia: 1.5e-5,
            static_friction: 0.001,
            stribeck_friction: 0.0005,
            min_velocity: 0.01,
            load_torque: 0.0,
        },
    )
    .with_timestep(2e-6)
}

/// Gimbal motor: high resistance, high torque constant, low speed.
pub const fn gimbal() -> MotorParameters {
    MotorParameters::new(
        ElectricalParams {
            coil_inductance: 2e-3,
            coil_resistance: 10.0,
            input_voltage: 12.0,
            bemf_constant: 0.1,
            num_pole_pairs: 11,
            commutation_phase_diff: 120.0,
        },
        MechanicalParams {
            damping_ratio: 1e-4,
            rotational_inertia: 5e-5,
            static_friction: 0.005,
            stribeck_friction: 0.002,
            min_velocity: 0.005,
            load_torque: 0.0,
        },
    )
    .with_timestep(1e-5)
}

/// Look up a preset by name (`reference`, `outrunner`, `gimbal`).
pub fn by_name(name: &str) -> Option<MotorParameters> {
    match name {
        "reference" => Some(reference()),
        "outrunner" => Some(outrunner()),
        "gimbal" => Some(gimbal()),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 3] = ["reference", "outrunner", "gimbal"];
