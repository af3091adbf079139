//! Append-only record of a simulation run.

use bldc_core::time::StepClock;
use bldc_core::types::MotorState;

use crate::types::{HistoryRecord, Sample};

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Ordered list of snapshots, one per completed step plus the initial state.
///
/// Records can only be appended; there is no mutable access to stored
/// entries.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    dt: f64,
    records: Vec<HistoryRecord>,
}

impl History {
    /// History seeded with the zero state and zero inputs.
    pub fn new(dt: f64) -> Self {
        Self::starting_from(dt, MotorState::zero(), 0)
    }

    /// History seeded with `initial` and zero inputs, reserving room for
    /// `capacity` further records.
    pub fn starting_from(dt: f64, initial: MotorState, capacity: usize) -> Self {
        let mut records = Vec::with_capacity(capacity.saturating_add(1));
        records.push(HistoryRecord::initial(initial));
        Self { dt, records }
    }

    /// Timestep between consecutive records (s).
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Append a snapshot.
    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// Number of records, including the initial one. Never zero.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of completed steps (`len - 1`).
    pub fn steps(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.records.get(index)
    }

    pub fn first(&self) -> Option<&HistoryRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Simulated time of record `index` (s).
    pub fn time(&self, index: usize) -> f64 {
        StepClock::time_of(index as u64, self.dt)
    }

    /// Timed view of record `index`.
    pub fn sample(&self, index: usize) -> Option<Sample> {
        self.records.get(index).map(|r| Sample {
            index,
            time: self.time(index),
            state: r.state,
            inputs: r.inputs,
        })
    }

    /// Timed views of every record in order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = Sample> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(index, r)| Sample {
                index,
                time: self.time(index),
                state: r.state,
                inputs: r.inputs,
            })
    }

    /// Consume the history, returning the raw records.
    pub fn into_records(self) -> Vec<HistoryRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryRecord;
    type IntoIter = std::slice::Iter<'a, HistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
