//! Parameter fixtures.

use bldc_core::config::{ElectricalParams, MechanicalParams, MotorParameters};

/// 4-pole-pair, 12 V motor with non-zero stiction and a 10 µs timestep.
pub fn reference_params() -> MotorParameters {
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

/// Valid parameters that blow up under forward Euler: `L = 1e-12` with a
/// megavolt supply.
pub fn unstable_params() -> MotorParameters {
    let mut p = reference_params().with_input_voltage(1e6);
    p.electrical.coil_inductance = 1e-12;
    p
}
