// bldc-core: Parameters, state types, errors, and clock for the BLDC motor simulator.

pub mod config;
pub mod error;
pub mod time;
pub mod types;

pub mod prelude {
    pub use crate::config::{
        ElectricalParams, IntegrationScheme, MechanicalParams, MotorParameters, PositionUpdate,
        StateAssignment,
    };
    pub use crate::error::{BldcError, ConfigError, SimError};
    pub use crate::time::StepClock;
    pub use crate::types::{MotorState, Phase, PhaseCurrents, PhaseVoltages, StateField, ThreePhase};
}
