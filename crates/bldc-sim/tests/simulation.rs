//! End-to-end runs through the public driver API.

use bldc_actuator_core::commutation::{commutate, Sector};
use bldc_actuator_core::presets;
use bldc_core::config::{IntegrationScheme, PositionUpdate};
use bldc_core::error::{BldcError, SimError};
use bldc_core::time::StepClock;
use bldc_core::types::{MotorState, PhaseVoltages};
use bldc_record::series::PlotSeries;
use bldc_sim::{RunStats, Simulator, SimulatorBuilder, DEFAULT_STEPS};
use bldc_test_utils::{random_positions, reference_params, unstable_params};

#[test]
fn run_records_n_plus_one_entries() {
    let mut sim = Simulator::new(reference_params()).unwrap();
    let history = sim.run(DEFAULT_STEPS).unwrap();
    assert_eq!(history.len() as u64, DEFAULT_STEPS + 1);
}

#[test]
fn record_times_are_index_times_dt() {
    let params = reference_params();
    let dt = params.dt();
    let mut sim = Simulator::new(params).unwrap();
    sim.run(500).unwrap();
    for s in sim.history().samples() {
        assert_eq!(
            s.time.to_bits(),
            StepClock::time_of(s.index as u64, dt).to_bits()
        );
    }
}

#[test]
fn earlier_records_are_not_mutated_by_later_steps() {
    let mut sim = Simulator::new(reference_params()).unwrap();
    sim.run(100).unwrap();
    let snapshot: Vec<_> = sim.history().records().to_vec();
    sim.run(400).unwrap();
    assert_eq!(&sim.history().records()[..snapshot.len()], snapshot.as_slice());
}

#[test]
fn each_record_holds_the_commutation_of_the_previous_state() {
    let params = reference_params();
    let mut sim = Simulator::new(params.clone()).unwrap();
    sim.run(2_000).unwrap();
    let records = sim.history().records();
    assert_eq!(records[0].inputs, PhaseVoltages::ZERO);
    for pair in records.windows(2) {
        let expected = commutate(pair[0].state.angular_position, &params);
        assert_eq!(pair[1].inputs, expected);
    }
}

#[test]
fn zero_start_spins_up_under_drive() {
    let mut sim = Simulator::new(presets::reference()).unwrap();
    sim.run(20_000).unwrap();
    let stats = RunStats::from_history(sim.history(), sim.params());
    assert!(stats.final_velocity.abs() > 1.0, "{stats}");
    assert!(sim.history().records().iter().all(|r| r.state.is_finite()));
}

#[test]
fn first_step_from_rest_keeps_rotor_still() {
    // Zero currents give zero torque, which stiction holds.
    let mut sim = Simulator::new(reference_params()).unwrap();
    let rec = sim.step().unwrap();
    assert!(rec.state.angular_velocity.abs() < f64::EPSILON);
    assert!(rec.state.angular_position.abs() < f64::EPSILON);
    // Currents follow V·dt/L on the driven phases.
    let p = sim.params();
    let di = p.electrical.input_voltage * p.dt() / p.electrical.coil_inductance;
    assert!(rec.state.currents.a.abs() < f64::EPSILON);
    assert!((rec.state.currents.b + di).abs() < 1e-12);
    assert!((rec.state.currents.c - di).abs() < 1e-12);
}

#[test]
fn runs_are_bit_for_bit_reproducible() {
    let run = || {
        let mut sim = Simulator::new(reference_params()).unwrap();
        sim.run(3_000).unwrap();
        sim.into_history().into_records()
    };
    let a = run();
    let b = run();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(
            x.state.angular_position.to_bits(),
            y.state.angular_position.to_bits()
        );
        assert_eq!(
            x.state.angular_velocity.to_bits(),
            y.state.angular_velocity.to_bits()
        );
        assert_eq!(x.state.currents, y.state.currents);
    }
}

#[test]
fn divergence_stops_the_run_with_last_valid_state() {
    let mut sim = Simulator::new(unstable_params()).unwrap();
    let err = sim.run(DEFAULT_STEPS).unwrap_err();
    let report = err.to_string();
    match err {
        SimError::Diverged {
            step, last_valid, ..
        } => {
            assert!(step <= DEFAULT_STEPS);
            assert_eq!(sim.history().last().unwrap().state, last_valid);
            // The message names the step and the state the run stopped at.
            assert!(report.contains(&format!("step {step}")), "{report}");
            assert!(report.contains(&last_valid.to_string()), "{report}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn divergence_surfaces_through_top_level_error() {
    let result: Result<(), BldcError> = (|| {
        let mut sim = SimulatorBuilder::new().with_params(unstable_params()).build()?;
        sim.run(DEFAULT_STEPS)?;
        Ok(())
    })();
    let err = result.unwrap_err();
    assert!(err.to_string().contains("diverged"));
}

#[test]
fn post_step_velocity_scheme_changes_trajectory() {
    let base = reference_params();
    let semi = base.clone().with_integration(IntegrationScheme {
        position_update: PositionUpdate::PostStepVelocity,
        ..IntegrationScheme::default()
    });
    let mut a = Simulator::new(base).unwrap();
    let mut b = Simulator::new(semi).unwrap();
    a.run(5_000).unwrap();
    b.run(5_000).unwrap();
    assert_ne!(
        a.state().angular_position.to_bits(),
        b.state().angular_position.to_bits()
    );
}

#[test]
fn nonzero_initial_state_starts_in_its_sector() {
    let params = reference_params();
    let pole_pairs = f64::from(params.electrical.num_pole_pairs);
    // 100° electrical → sector 2.
    let init = MotorState::zero().with_position(100.0_f64.to_radians() / pole_pairs);
    let mut sim = SimulatorBuilder::new()
        .with_params(params.clone())
        .with_initial_state(init)
        .build()
        .unwrap();
    let rec = sim.step().unwrap();
    let vb = params.electrical.input_voltage;
    assert_eq!(rec.inputs, Sector::from_index(2).unwrap().voltages(vb));
}

#[test]
fn plot_series_cover_the_whole_run() {
    let mut sim = Simulator::new(reference_params()).unwrap();
    sim.run(DEFAULT_STEPS).unwrap();
    let series = PlotSeries::from_history(sim.history());
    assert_eq!(series.len(), sim.history().len());
    assert!(series.position_deg.iter().all(|d| (0.0..360.0).contains(d)));
    let json = serde_json::to_value(&series).unwrap();
    assert_eq!(json["time"].as_array().unwrap().len(), series.len());
}

#[test]
fn random_initial_positions_commutate_from_their_angle() {
    let params = reference_params();
    for pos in random_positions(50, 21) {
        let mut sim = SimulatorBuilder::new()
            .with_params(params.clone())
            .with_initial_state(MotorState::zero().with_position(pos))
            .build()
            .unwrap();
        let rec = sim.step().unwrap();
        assert_eq!(rec.inputs, commutate(pos, &params));
        assert!(sim.run(200).is_ok());
    }
}
