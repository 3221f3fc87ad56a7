//! Lab setup and the unit conversions used by the interactive entries.

use crate::core::ballistics::{ConstraintPoint, EARTH_GRAVITY_MPS2, PhysicsConstants};
use crate::core::error::TrajectoryError;
use crate::core::sampler::{Samples, TimedPath, sample_path, sample_path_timed};
use crate::core::solver::{SearchBounds, Solution, SolverOptions, solve_angle, solve_speed};

/// Height of the table the target sits on; entries are offsets above it.
pub const TABLE_HEIGHT_M: f64 = 0.755;
pub const DEFAULT_TARGET_OFFSET_MM: i32 = 70;
pub const DEFAULT_TARGET_LATERAL_MM: i32 = 250;

pub fn target_height_from_offset_mm(offset_mm: i32) -> f64 {
    TABLE_HEIGHT_M + f64::from(offset_mm) / 1000.0
}

pub fn lateral_cm_from_mm(lateral_mm: i32) -> f64 {
    f64::from(lateral_mm) / 10.0
}

/// Linear map from launch speed to launcher drive voltage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LauncherCalibration {
    pub volts_per_mps: f64,
}

impl LauncherCalibration {
    pub fn drive_voltage(&self, speed_mps: f64) -> f64 {
        self.volts_per_mps * speed_mps
    }
}

impl Default for LauncherCalibration {
    fn default() -> Self {
        Self { volts_per_mps: 1.0 }
    }
}

/// Everything one solve needs, snapshotted from whatever the user last set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scenario {
    pub physics: PhysicsConstants,
    pub wall: ConstraintPoint,
    pub target: ConstraintPoint,
    pub angle_deg: f64,
    pub speed_bounds: SearchBounds,
    pub angle_bounds: SearchBounds,
    pub solver: SolverOptions,
    pub calibration: LauncherCalibration,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            physics: PhysicsConstants {
                gravity_mps2: EARTH_GRAVITY_MPS2,
                launch_height_m: 0.3,
            },
            wall: ConstraintPoint::new(1.0, 0.6),
            target: ConstraintPoint::new(2.0, target_height_from_offset_mm(DEFAULT_TARGET_OFFSET_MM)),
            angle_deg: 45.0,
            speed_bounds: SearchBounds::speed_default(),
            angle_bounds: SearchBounds::angle_default(),
            solver: SolverOptions::default(),
            calibration: LauncherCalibration::default(),
        }
    }
}

impl Scenario {
    pub fn with_target_height(mut self, height_m: f64) -> Self {
        self.target.height_m = height_m;
        self
    }

    pub fn with_angle(mut self, angle_deg: f64) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    pub fn solve_speed(&self) -> Result<Solution, TrajectoryError> {
        solve_speed(
            &self.physics,
            self.angle_deg,
            &self.wall,
            &self.target,
            self.speed_bounds,
            &self.solver,
        )
    }

    pub fn solve_angle(&self, speed_mps: f64) -> Result<Solution, TrajectoryError> {
        solve_angle(
            &self.physics,
            speed_mps,
            &self.wall,
            &self.target,
            self.angle_bounds,
            &self.solver,
        )
    }

    pub fn sample(&self, speed_mps: f64, angle_deg: f64, samples: usize) -> Result<Samples, TrajectoryError> {
        sample_path(
            speed_mps,
            angle_deg,
            self.physics.gravity_mps2,
            self.physics.launch_height_m,
            samples,
        )
    }

    pub fn sample_timed(
        &self,
        speed_mps: f64,
        angle_deg: f64,
        samples: usize,
    ) -> Result<TimedPath, TrajectoryError> {
        sample_path_timed(
            speed_mps,
            angle_deg,
            self.physics.gravity_mps2,
            self.physics.launch_height_m,
            samples,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn entry_offsets_convert_to_meters_and_centimeters() {
        assert_abs_diff_eq!(target_height_from_offset_mm(70), 0.825, epsilon = 1e-12);
        assert_abs_diff_eq!(target_height_from_offset_mm(0), TABLE_HEIGHT_M, epsilon = 1e-12);
        assert_abs_diff_eq!(lateral_cm_from_mm(250), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn default_lab_scenario_is_feasible() {
        let scenario = Scenario::default();
        let solution = scenario.solve_speed().expect("lab defaults are feasible");
        // v0^2 = g d^2 / (h0 + d - y) at 45 degrees.
        assert_abs_diff_eq!(solution.value, (39.24f64 / 1.475).sqrt(), epsilon = 1e-6);

        let back = scenario
            .solve_angle(solution.value)
            .expect("the solved speed works at 45 degrees");
        assert_abs_diff_eq!(back.value, 45.0, epsilon = 1e-4);
    }

    #[test]
    fn sampling_uses_scenario_physics() {
        let scenario = Scenario::default();
        let first = scenario
            .sample(5.0, 45.0, 10)
            .expect("valid")
            .next()
            .expect("non-empty");
        assert_abs_diff_eq!(first.y, scenario.physics.launch_height_m, epsilon = 1e-12);

        let timed = scenario.sample_timed(5.0, 45.0, 10).expect("valid");
        assert_eq!(timed.checkpoints.len(), 11);
    }

    #[test]
    fn calibration_scales_speed() {
        let calibration = LauncherCalibration { volts_per_mps: 1.5 };
        assert_abs_diff_eq!(calibration.drive_voltage(4.0), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(LauncherCalibration::default().drive_voltage(5.2), 5.2, epsilon = 1e-12);
    }

    #[test]
    fn builder_helpers_replace_single_fields() {
        let scenario = Scenario::default().with_target_height(1.125).with_angle(50.0);
        assert_eq!(scenario.target.height_m, 1.125);
        assert_eq!(scenario.angle_deg, 50.0);
        assert_eq!(scenario.wall, Scenario::default().wall);
    }
}
