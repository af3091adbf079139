use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// One of the three motor phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    /// All phases in winding order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Index of this phase into a `[_; 3]` array.
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    /// Sign applied to the commutation phase offset `phi` for this phase.
    ///
    /// Phase A sits on the rotor angle, B lags by `phi`, C leads by `phi`.
    pub const fn offset_sign(self) -> f64 {
        match self {
            Self::A => 0.0,
            Self::B => -1.0,
            Self::C => 1.0,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// ThreePhase
// ---------------------------------------------------------------------------

/// One real value per motor phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::derive_partial_eq_without_eq)] // f64 fields prevent Eq
pub struct ThreePhase {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Drive voltage command per phase (V).
pub type PhaseVoltages = ThreePhase;

/// Coil current per phase (A).
pub type PhaseCurrents = ThreePhase;

impl ThreePhase {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub const fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub const fn as_array(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    pub const fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::A => self.a,
            Phase::B => self.b,
            Phase::C => self.c,
        }
    }

    /// Build a value by evaluating `f` once per phase, in winding order.
    pub fn from_fn(mut f: impl FnMut(Phase) -> f64) -> Self {
        Self::new(f(Phase::A), f(Phase::B), f(Phase::C))
    }

    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(f(self.a), f(self.b), f(self.c))
    }

    pub fn sum(&self) -> f64 {
        self.a + self.b + self.c
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, f64)> + '_ {
        Phase::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

impl From<[f64; 3]> for ThreePhase {
    fn from(values: [f64; 3]) -> Self {
        Self::from_array(values)
    }
}

// ---------------------------------------------------------------------------
// StateField
// ---------------------------------------------------------------------------

/// Names a single scalar in [`MotorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateField {
    PhaseCurrentA,
    PhaseCurrentB,
    PhaseCurrentC,
    AngularPosition,
    AngularVelocity,
}

impl StateField {
    pub const ALL: [Self; 5] = [
        Self::PhaseCurrentA,
        Self::PhaseCurrentB,
        Self::PhaseCurrentC,
        Self::AngularPosition,
        Self::AngularVelocity,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhaseCurrentA => "phase_current_a",
            Self::PhaseCurrentB => "phase_current_b",
            Self::PhaseCurrentC => "phase_current_c",
            Self::AngularPosition => "angular_position",
            Self::AngularVelocity => "angular_velocity",
        }
    }
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MotorState
// ---------------------------------------------------------------------------

/// Electrical and mechanical state of the motor.
///
/// Recorded snapshots are independent copies of this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::derive_partial_eq_without_eq)] // f64 fields prevent Eq
pub struct MotorState {
    /// Phase currents (A).
    pub currents: PhaseCurrents,
    /// Rotor mechanical angle (rad). Unbounded, accumulates past 2π.
    pub angular_position: f64,
    /// Rotor angular velocity (rad/s).
    pub angular_velocity: f64,
}

impl MotorState {
    /// All currents zero, rotor at rest at angle zero.
    pub const fn zero() -> Self {
        Self {
            currents: ThreePhase::ZERO,
            angular_position: 0.0,
            angular_velocity: 0.0,
        }
    }

    pub const fn with_position(mut self, angular_position: f64) -> Self {
        self.angular_position = angular_position;
        self
    }

    pub const fn with_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub const fn with_currents(mut self, currents: PhaseCurrents) -> Self {
        self.currents = currents;
        self
    }

    pub const fn get(&self, field: StateField) -> f64 {
        match field {
            StateField::PhaseCurrentA => self.currents.a,
            StateField::PhaseCurrentB => self.currents.b,
            StateField::PhaseCurrentC => self.currents.c,
            StateField::AngularPosition => self.angular_position,
            StateField::AngularVelocity => self.angular_velocity,
        }
    }

    /// First field (in [`StateField::ALL`] order) holding NaN or ±Inf.
    pub fn first_non_finite(&self) -> Option<StateField> {
        StateField::ALL
            .into_iter()
            .find(|&field| !self.get(field).is_finite())
    }

    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    /// Rotor angle wrapped into `[0, 360)` degrees.
    pub fn position_degrees_wrapped(&self) -> f64 {
        wrap_degrees(self.angular_position.to_degrees())
    }
}

impl fmt::Display for MotorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "i = [{:.4e}, {:.4e}, {:.4e}] A, theta = {:.4e} rad, omega = {:.4e} rad/s",
            self.currents.a,
            self.currents.b,
            self.currents.c,
            self.angular_position,
            self.angular_velocity
        )
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// `rem_euclid` can round tiny negative inputs up to exactly `360.0`; that
/// case folds back to zero so the half-open range always holds.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
