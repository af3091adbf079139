//! Six-step (trapezoidal) commutation.
//!
//! The electrical cycle `[0, 360)` degrees is split at
//! `0, 30, 90, 150, 210, 270, 330`. Each interval is half-open `[low, high)`
//! and maps to one row of drive polarities:
//!
//! | Sector | Interval     | A   | B   | C   |
//! |--------|--------------|-----|-----|-----|
//! | 0      | `[0, 30)`    | 0   | -Vb | +Vb |
//! | 1      | `[30, 90)`   | +Vb | -Vb | 0   |
//! | 2      | `[90, 150)`  | +Vb | 0   | -Vb |
//! | 3      | `[150, 210)` | 0   | +Vb | -Vb |
//! | 4      | `[210, 270)` | -Vb | +Vb | 0   |
//! | 5      | `[270, 330)` | -Vb | 0   | +Vb |
//! | 6      | `[330, 360)` | 0   | -Vb | +Vb |
//!
//! Sectors 0 and 6 are the two halves of the same 60° step, so the cycle has
//! six distinct voltage patterns.

use std::fmt;

use bldc_core::config::MotorParameters;
use bldc_core::types::{wrap_degrees, PhaseVoltages};

/// Lower edge of each sector (electrical degrees).
const SECTOR_LOWER_BOUNDS: [f64; Sector::COUNT] = [0.0, 30.0, 90.0, 150.0, 210.0, 270.0, 330.0];

/// Drive polarity per sector as `[A, B, C]`, in units of `Vb`.
const SIX_STEP_TABLE: [[i8; 3]; Sector::COUNT] = [
    [0, -1, 1],
    [1, -1, 0],
    [1, 0, -1],
    [0, 1, -1],
    [-1, 1, 0],
    [-1, 0, 1],
    [0, -1, 1],
];

// ---------------------------------------------------------------------------
// Sector
// ---------------------------------------------------------------------------

/// Row of the six-step table selected by the electrical angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sector(u8);

impl Sector {
    /// Number of table rows (including the split first/last half-sector).
    pub const COUNT: usize = 7;

    /// Sector by table row, `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&i| usize::from(i) < Self::COUNT)
            .map(Self)
    }

    /// Sector containing `degrees` (any real value; wrapped into `[0, 360)`).
    ///
    /// Non-finite input falls into sector 0.
    pub fn from_electrical_degrees(degrees: f64) -> Self {
        let theta = wrap_degrees(degrees);
        let idx = SECTOR_LOWER_BOUNDS
            .partition_point(|&low| low <= theta)
            .saturating_sub(1);
        // `idx < COUNT` by construction of `partition_point`.
        #[allow(clippy::cast_possible_truncation)]
        Self(idx as u8)
    }

    /// Table row index in `0..7`.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Inclusive lower edge in electrical degrees.
    pub const fn lower_bound(self) -> f64 {
        SECTOR_LOWER_BOUNDS[self.index()]
    }

    /// Exclusive upper edge in electrical degrees.
    pub const fn upper_bound(self) -> f64 {
        if self.index() + 1 < Self::COUNT {
            SECTOR_LOWER_BOUNDS[self.index() + 1]
        } else {
            360.0
        }
    }

    /// Drive polarity `[A, B, C]`, each in `{-1, 0, 1}`.
    pub const fn polarity(self) -> [i8; 3] {
        SIX_STEP_TABLE[self.index()]
    }

    /// Phase voltages for supply magnitude `vb`.
    pub fn voltages(self, vb: f64) -> PhaseVoltages {
        let [a, b, c] = self.polarity();
        PhaseVoltages::new(
            f64::from(a) * vb,
            f64::from(b) * vb,
            f64::from(c) * vb,
        )
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sector {} [{}, {})",
            self.0,
            self.lower_bound(),
            self.upper_bound()
        )
    }
}

// ---------------------------------------------------------------------------
// Commutation
// ---------------------------------------------------------------------------

/// Electrical angle in degrees, wrapped into `[0, 360)`.
pub fn electrical_degrees(angular_position: f64, pole_pairs: u32) -> f64 {
    wrap_degrees((angular_position * f64::from(pole_pairs)).to_degrees())
}

/// Six-step phase voltages for a rotor at `angular_position` (rad).
///
/// Pure function of the angle, the pole-pair count, and `Vb`.
pub fn commutate(angular_position: f64, params: &MotorParameters) -> PhaseVoltages {
    let e = &params.electrical;
    let theta_e = electrical_degrees(angular_position, e.num_pole_pairs);
    Sector::from_electrical_degrees(theta_e).voltages(e.input_voltage)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use bldc_core::types::Phase;
    use bldc_test_utils::{random_angles_deg, random_positions, reference_params};

    fn sector(deg: f64) -> usize {
        Sector::from_electrical_degrees(deg).index()
    }

    #[test]
    fn boundaries_open_their_own_sector() {
        assert_eq!(sector(0.0), 0);
        assert_eq!(sector(30.0), 1);
        assert_eq!(sector(90.0), 2);
        assert_eq!(sector(150.0), 3);
        assert_eq!(sector(210.0), 4);
        assert_eq!(sector(270.0), 5);
        assert_eq!(sector(330.0), 6);
    }

    #[test]
    fn values_just_below_boundaries_stay_in_previous_sector() {
        assert_eq!(sector(29.999_999), 0);
        assert_eq!(sector(89.999_999), 1);
        assert_eq!(sector(149.999_999), 2);
        assert_eq!(sector(209.999_999), 3);
        assert_eq!(sector(269.999_999), 4);
        assert_eq!(sector(329.999_999), 5);
        assert_eq!(sector(359.999_999), 6);
    }

    #[test]
    fn out_of_range_degrees_wrap() {
        assert_eq!(sector(360.0), 0);
        assert_eq!(sector(405.0), 1);
        assert_eq!(sector(-10.0), 6);
        assert_eq!(sector(-1e-20), 0);
    }

    #[test]
    fn nan_falls_into_first_sector() {
        assert_eq!(sector(f64::NAN), 0);
    }

    #[test]
    fn every_angle_lands_inside_its_sector() {
        for deg in random_angles_deg(2_000, 7) {
            let s = Sector::from_electrical_degrees(deg);
            assert!(s.lower_bound() <= deg && deg < s.upper_bound(), "{deg} vs {s}");
        }
    }

    #[test]
    fn table_matches_six_step_pattern() {
        let expected = [
            [0, -1, 1],
            [1, -1, 0],
            [1, 0, -1],
            [0, 1, -1],
            [-1, 1, 0],
            [-1, 0, 1],
            [0, -1, 1],
        ];
        for (i, row) in expected.iter().enumerate() {
            assert_eq!(Sector::from_index(i).unwrap().polarity(), *row);
        }
        assert!(Sector::from_index(7).is_none());
    }

    #[test]
    fn one_phase_floats_and_two_are_driven() {
        for deg in random_angles_deg(2_000, 11) {
            let v = Sector::from_electrical_degrees(deg).voltages(12.0);
            let mags: Vec<f64> = v.iter().map(|(_, x)| x.abs()).collect();
            assert!(mags.iter().all(|&m| m == 0.0 || (m - 12.0).abs() < f64::EPSILON));
            assert_eq!(mags.iter().filter(|&&m| m == 0.0).count(), 1);
            assert!(v.sum().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn phases_are_offset_by_120_degrees() {
        // Phase B at angle θ equals phase A at θ - 120°; phase C at θ + 120°.
        for deg in [45.0, 100.0, 200.0, 250.0, 300.0] {
            let here = Sector::from_electrical_degrees(deg).voltages(1.0);
            let a_lag = Sector::from_electrical_degrees(deg - 120.0).voltages(1.0);
            let a_lead = Sector::from_electrical_degrees(deg + 120.0).voltages(1.0);
            assert!((here.get(Phase::B) - a_lag.get(Phase::A)).abs() < f64::EPSILON);
            assert!((here.get(Phase::C) - a_lead.get(Phase::A)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn commutate_at_45_electrical_degrees() {
        let mut params = reference_params();
        params.electrical.num_pole_pairs = 4;
        params.electrical.input_voltage = 12.0;
        let position = 45.0_f64.to_radians() / 4.0;
        let v = commutate(position, &params);
        assert!((v.a - 12.0).abs() < f64::EPSILON);
        assert!((v.b + 12.0).abs() < f64::EPSILON);
        assert!(v.c.abs() < f64::EPSILON);
    }

    #[test]
    fn commutate_handles_negative_and_multi_turn_positions() {
        let mut params = reference_params();
        params.electrical.num_pole_pairs = 1;
        let vb = params.electrical.input_voltage;
        // -100° electrical ≡ 260° → sector 4.
        let v = commutate(-100.0_f64.to_radians(), &params);
        assert_eq!(v, Sector::from_index(4).unwrap().voltages(vb));
        // Ten full turns plus 100° → sector 2.
        let v = commutate(20.0 * std::f64::consts::PI + 100.0_f64.to_radians(), &params);
        assert_eq!(v, Sector::from_index(2).unwrap().voltages(vb));
    }

    #[test]
    fn random_positions_pick_the_sector_of_their_electrical_angle() {
        let params = reference_params();
        let pp = params.electrical.num_pole_pairs;
        let vb = params.electrical.input_voltage;
        for pos in random_positions(1_000, 3) {
            let deg = electrical_degrees(pos, pp);
            let s = Sector::from_electrical_degrees(deg);
            assert!(s.lower_bound() <= deg && deg < s.upper_bound(), "{pos} -> {deg}");
            assert_eq!(commutate(pos, &params), s.voltages(vb));
        }
    }

    #[test]
    fn zero_position_drives_b_negative_c_positive() {
        let params = reference_params();
        let vb = params.electrical.input_voltage;
        let v = commutate(0.0, &params);
        assert_eq!(v, PhaseVoltages::new(0.0, -vb, vb));
    }

    #[test]
    fn electrical_degrees_scales_and_wraps() {
        let d = electrical_degrees(std::f64::consts::PI, 3);
        assert!((d - 180.0).abs() < 1e-9);
    }

    #[test]
    fn sector_display() {
        assert_eq!(
            Sector::from_index(2).unwrap().to_string(),
            "sector 2 [90, 150)"
        );
    }
}
