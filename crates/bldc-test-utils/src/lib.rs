//! Shared test fixtures and utilities for the BLDC simulator crates.
//!
//! Provides reference and deliberately unstable parameter sets, plus
//! deterministic RNG setup.

pub mod fixtures;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use fixtures::{reference_params, unstable_params};
pub use rng::{random_angles_deg, random_positions, seeded_rng};
