//! Snapshot types stored in a [`History`](crate::history::History).

use serde::{Deserialize, Serialize};

use bldc_core::types::{MotorState, PhaseVoltages};

// ---------------------------------------------------------------------------
// HistoryRecord
// ---------------------------------------------------------------------------

/// State and the voltages that produced it, copied by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::derive_partial_eq_without_eq)] // f64 fields prevent Eq
pub struct HistoryRecord {
    pub state: MotorState,
    /// Commutation output applied during the step that produced `state`.
    pub inputs: PhaseVoltages,
}

impl HistoryRecord {
    pub const fn new(state: MotorState, inputs: PhaseVoltages) -> Self {
        Self { state, inputs }
    }

    /// Initial entry: `state` with all phase voltages at zero.
    pub const fn initial(state: MotorState) -> Self {
        Self::new(state, PhaseVoltages::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// A record paired with its simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub index: usize,
    /// Seconds since the start of the run (`index * dt`).
    pub time: f64,
    pub state: MotorState,
    pub inputs: PhaseVoltages,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
