//! Column-oriented series ready for plotting.
//!
//! Phase voltages, phase currents, and rotor angle wrapped to `[0, 360)`
//! degrees are the three panels of a BLDC run plot. Rotor speed is carried
//! as an extra column. All share one time axis.

use serde::Serialize;

use bldc_core::types::{Phase, ThreePhase};

use crate::history::History;

/// Per-phase values over time, one `Vec` per phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhaseSeries {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub c: Vec<f64>,
}

impl PhaseSeries {
    fn with_capacity(n: usize) -> Self {
        Self {
            a: Vec::with_capacity(n),
            b: Vec::with_capacity(n),
            c: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, v: ThreePhase) {
        self.a.push(v.a);
        self.b.push(v.b);
        self.c.push(v.c);
    }

    pub fn phase(&self, phase: Phase) -> &[f64] {
        match phase {
            Phase::A => &self.a,
            Phase::B => &self.b,
            Phase::C => &self.c,
        }
    }
}

/// All plotted quantities of a run, aligned by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlotSeries {
    /// Seconds, `i * dt`.
    pub time: Vec<f64>,
    /// Applied phase voltages (V).
    pub voltages: PhaseSeries,
    /// Phase currents (A).
    pub currents: PhaseSeries,
    /// Mechanical rotor angle in degrees, wrapped into `[0, 360)`.
    pub position_deg: Vec<f64>,
    /// Rotor speed (rad/s).
    pub velocity: Vec<f64>,
}

impl PlotSeries {
    pub fn from_history(history: &History) -> Self {
        let n = history.len();
        let mut out = Self {
            time: Vec::with_capacity(n),
            voltages: PhaseSeries::with_capacity(n),
            currents: PhaseSeries::with_capacity(n),
            position_deg: Vec::with_capacity(n),
            velocity: Vec::with_capacity(n),
        };
        for s in history.samples() {
            out.time.push(s.time);
            out.voltages.push(s.inputs);
            out.currents.push(s.state.currents);
            out.position_deg.push(s.state.position_degrees_wrapped());
            out.velocity.push(s.state.angular_velocity);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

impl From<&History> for PlotSeries {
    fn from(history: &History) -> Self {
        Self::from_history(history)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
