//! Simulation driver for the BLDC motor model.
//!
//! [`Simulator`] owns the motor state and its [`History`], and on every step
//! calls the commutation controller, then the dynamics integrator, then
//! appends a value snapshot of `{state, inputs}`.
//!
//! # Example
//!
//! ```
//! use bldc_actuator_core::presets;
//! use bldc_sim::SimulatorBuilder;
//!
//! let mut sim = SimulatorBuilder::new()
//!     .with_params(presets::reference())
//!     .build()
//!     .unwrap();
//! sim.run(1000).unwrap();
//! assert_eq!(sim.history().len(), 1001);
//! ```
//!
//! [`History`]: bldc_record::history::History

pub mod builder;
pub mod driver;
pub mod stats;
pub mod sweep;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use builder::SimulatorBuilder;
pub use driver::Simulator;
pub use stats::RunStats;
pub use sweep::{load_torque_grid, run_sweep, SweepOutcome};

/// Number of steps a run takes when none is given.
pub const DEFAULT_STEPS: u64 = 1000;
