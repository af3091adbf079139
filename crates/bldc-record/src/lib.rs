//! `bldc-record`: in-memory time series of a BLDC simulation run.
//!
//! A [`History`] is an ordered, append-only list of [`HistoryRecord`]
//! snapshots. Index `i` corresponds to simulated time `i * dt`; entry 0 is
//! the initial state with zero inputs.
//!
//! ```
//! use bldc_core::prelude::*;
//! use bldc_record::prelude::*;
//!
//! let mut history = History::new(1e-5);
//! history.push(HistoryRecord::new(
//!     MotorState::zero().with_velocity(1.0),
//!     PhaseVoltages::new(0.0, -12.0, 12.0),
//! ));
//! assert_eq!(history.len(), 2);
//! assert!((history.time(1) - 1e-5).abs() < 1e-18);
//! ```

pub mod history;
pub mod series;
pub mod types;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        history::History,
        series::{PhaseSeries, PlotSeries},
        types::{HistoryRecord, Sample},
    };
}
