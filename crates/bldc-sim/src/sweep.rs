//! Independent runs over a list of parameter sets.
//!
//! With the `parallel` feature (default) runs are spread across the rayon
//! thread pool. Each run owns its simulator; nothing is shared between runs.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use bldc_core::config::MotorParameters;
use bldc_core::error::BldcError;

use crate::driver::Simulator;
use crate::stats::RunStats;

/// Result of one run in a sweep.
#[derive(Debug)]
pub struct SweepOutcome {
    /// Position of the parameter set in the input slice.
    pub index: usize,
    pub params: MotorParameters,
    /// Statistics of the full run, or the error that stopped it.
    pub result: Result<RunStats, BldcError>,
}

impl SweepOutcome {
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn run_one(index: usize, params: &MotorParameters, n_steps: u64) -> SweepOutcome {
    let result = Simulator::new(params.clone())
        .map_err(BldcError::from)
        .and_then(|mut sim| {
            sim.run(n_steps)?;
            Ok(RunStats::from_history(sim.history(), params))
        });
    debug!(index, ok = result.is_ok(), "Sweep run finished");
    SweepOutcome {
        index,
        params: params.clone(),
        result,
    }
}

/// Run every parameter set for `n_steps`, returning outcomes in input order.
pub fn run_sweep(params: &[MotorParameters], n_steps: u64) -> Vec<SweepOutcome> {
    #[cfg(feature = "parallel")]
    let iter = params.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = params.iter();

    iter.enumerate()
        .map(|(index, p)| run_one(index, p, n_steps))
        .collect()
}

/// Copies of `base` with the load torque set to each value in `loads`.
pub fn load_torque_grid(base: &MotorParameters, loads: &[f64]) -> Vec<MotorParameters> {
    loads
        .iter()
        .map(|&tl| base.clone().with_load_torque(tl))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
