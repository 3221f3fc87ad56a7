//! Bounded solves for the launch speed (fixed angle) or the launch angle
//! (fixed speed) that put the projectile on the target height while keeping
//! it above the wall.
//!
//! The target residual is scanned over the search bounds, every sign change is
//! refined by bisection and every tangent-like dip by a golden-section search
//! on `|residual|`. Candidates that miss the target by more than the tolerance
//! or pass under the wall are never returned; those cases come back as
//! [`TrajectoryError::TargetUnreachable`] and [`TrajectoryError::WallNotCleared`].

use log::{debug, trace};

use crate::core::ballistics::{
    ConstraintPoint, LaunchInputs, PhysicsConstants, height_at_distance, validate_angle_deg,
};
use crate::core::error::{TrajectoryError, ensure_finite};

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_894_9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchBounds {
    pub lower: f64,
    pub upper: f64,
}

impl SearchBounds {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `[1, 100]` m/s.
    pub const fn speed_default() -> Self {
        Self::new(1.0, 100.0)
    }

    /// `[1, 89]` degrees.
    pub const fn angle_default() -> Self {
        Self::new(1.0, 89.0)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    fn validate(&self, label: &str) -> Result<(), TrajectoryError> {
        ensure_finite(self.lower, label)?;
        ensure_finite(self.upper, label)?;
        if self.lower <= 0.0 || self.lower >= self.upper {
            return Err(TrajectoryError::invalid(format!(
                "{label} bounds must satisfy 0 < lower < upper, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverOptions {
    /// Largest accepted target miss, also the slack allowed on the wall margin.
    pub tolerance_m: f64,
    /// Number of cells the bounds are split into while looking for brackets.
    pub scan_steps: usize,
    /// Cap on bisection and golden-section iterations per candidate.
    pub max_iterations: usize,
    /// When several admissible speeds exist, the one nearest this wins.
    pub preferred_speed_mps: f64,
    /// Same tie-break for the angle solve.
    pub preferred_angle_deg: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance_m: 1e-4,
            scan_steps: 1000,
            max_iterations: 200,
            preferred_speed_mps: 10.0,
            preferred_angle_deg: 45.0,
        }
    }
}

impl SolverOptions {
    fn validate(&self) -> Result<(), TrajectoryError> {
        ensure_finite(self.tolerance_m, "tolerance")?;
        ensure_finite(self.preferred_speed_mps, "preferred speed")?;
        ensure_finite(self.preferred_angle_deg, "preferred angle")?;
        if self.tolerance_m <= 0.0 {
            return Err(TrajectoryError::invalid("tolerance must be positive"));
        }
        if self.scan_steps == 0 {
            return Err(TrajectoryError::invalid("scan steps must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(TrajectoryError::invalid(
                "max iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

/// A solved launch speed (m/s) or angle (degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solution {
    pub value: f64,
    /// `y(target distance) - target height`.
    pub target_miss_m: f64,
    /// `y(wall distance) - wall height`, never meaningfully negative.
    pub wall_margin_m: f64,
    pub iterations: usize,
}

/// Speed that lands on `target` for a fixed `angle_deg` while clearing `wall`.
pub fn solve_speed(
    physics: &PhysicsConstants,
    angle_deg: f64,
    wall: &ConstraintPoint,
    target: &ConstraintPoint,
    bounds: SearchBounds,
    options: &SolverOptions,
) -> Result<Solution, TrajectoryError> {
    validate_common(physics, wall, target, options)?;
    validate_angle_deg(angle_deg)?;
    bounds.validate("speed")?;

    debug!(
        "solving speed: angle={angle_deg} deg, wall=({}, {}), target=({}, {}), bounds=[{}, {}]",
        wall.distance_m, wall.height_m, target.distance_m, target.height_m, bounds.lower, bounds.upper
    );

    let residuals = |speed_mps: f64| {
        evaluate(
            LaunchInputs::new(angle_deg, speed_mps),
            physics,
            wall,
            target,
        )
    };
    let solution = solve_bounded(residuals, bounds, options.preferred_speed_mps, options)?;
    debug!(
        "solved speed {:.6} m/s (miss {:.2e} m, wall margin {:.4} m)",
        solution.value, solution.target_miss_m, solution.wall_margin_m
    );
    Ok(solution)
}

/// Angle that lands on `target` for a fixed `speed_mps` while clearing `wall`.
///
/// `bounds` are degrees and must stay inside the open interval (0, 90).
pub fn solve_angle(
    physics: &PhysicsConstants,
    speed_mps: f64,
    wall: &ConstraintPoint,
    target: &ConstraintPoint,
    bounds: SearchBounds,
    options: &SolverOptions,
) -> Result<Solution, TrajectoryError> {
    validate_common(physics, wall, target, options)?;
    ensure_finite(speed_mps, "launch speed")?;
    if speed_mps <= 0.0 {
        return Err(TrajectoryError::invalid(format!(
            "launch speed must be positive, got {speed_mps}"
        )));
    }
    bounds.validate("angle")?;
    if bounds.upper >= 90.0 {
        return Err(TrajectoryError::invalid(format!(
            "angle bounds must stay below 90 degrees, got upper bound {}",
            bounds.upper
        )));
    }

    debug!(
        "solving angle: speed={speed_mps} m/s, wall=({}, {}), target=({}, {}), bounds=[{}, {}]",
        wall.distance_m, wall.height_m, target.distance_m, target.height_m, bounds.lower, bounds.upper
    );

    let residuals = |angle_deg: f64| {
        evaluate(
            LaunchInputs::new(angle_deg, speed_mps),
            physics,
            wall,
            target,
        )
    };
    let solution = solve_bounded(residuals, bounds, options.preferred_angle_deg, options)?;
    debug!(
        "solved angle {:.6} deg (miss {:.2e} m, wall margin {:.4} m)",
        solution.value, solution.target_miss_m, solution.wall_margin_m
    );
    Ok(solution)
}

fn validate_common(
    physics: &PhysicsConstants,
    wall: &ConstraintPoint,
    target: &ConstraintPoint,
    options: &SolverOptions,
) -> Result<(), TrajectoryError> {
    physics.validate()?;
    options.validate()?;
    ensure_finite(wall.distance_m, "wall distance")?;
    ensure_finite(wall.height_m, "wall height")?;
    ensure_finite(target.distance_m, "target distance")?;
    ensure_finite(target.height_m, "target height")?;
    if wall.distance_m < 0.0 {
        return Err(TrajectoryError::invalid(format!(
            "wall distance cannot be negative, got {}",
            wall.distance_m
        )));
    }
    if target.distance_m <= wall.distance_m {
        return Err(TrajectoryError::invalid(format!(
            "target distance ({}) must be greater than wall distance ({})",
            target.distance_m, wall.distance_m
        )));
    }
    Ok(())
}

/// (target miss, wall margin) for one launch.
fn evaluate(
    inputs: LaunchInputs,
    physics: &PhysicsConstants,
    wall: &ConstraintPoint,
    target: &ConstraintPoint,
) -> (f64, f64) {
    let miss = height_at_distance(inputs, *physics, target.distance_m) - target.height_m;
    let margin = height_at_distance(inputs, *physics, wall.distance_m) - wall.height_m;
    (miss, margin)
}

fn solve_bounded<F>(
    residuals: F,
    bounds: SearchBounds,
    preferred: f64,
    options: &SolverOptions,
) -> Result<Solution, TrajectoryError>
where
    F: Fn(f64) -> (f64, f64),
{
    let miss = |x: f64| residuals(x).0;
    let steps = options.scan_steps;
    let span = bounds.upper - bounds.lower;
    let x_tolerance = 1e-12 * span.max(1.0);

    let grid: Vec<(f64, f64)> = (0..=steps)
        .map(|i| {
            let x = bounds.lower + span * (i as f64 / steps as f64);
            (x, miss(x))
        })
        .collect();

    let mut closest_miss = grid
        .iter()
        .map(|(_, m)| m.abs())
        .fold(f64::INFINITY, f64::min);
    let mut roots: Vec<(f64, usize)> = Vec::new();

    for (i, pair) in grid.windows(2).enumerate() {
        let (a, ma) = pair[0];
        let (b, mb) = pair[1];
        if ma == 0.0 {
            roots.push((a, 0));
        } else if ma.signum() != mb.signum() && mb != 0.0 {
            roots.push(bisect(&miss, a, b, ma, options.max_iterations, x_tolerance));
        } else if i > 0 {
            // No sign change: a dip in |miss| at `a` may still touch zero.
            let (_, m_prev) = grid[i - 1];
            let no_bracket_before = m_prev.signum() == ma.signum();
            if no_bracket_before && ma.abs() <= m_prev.abs() && ma.abs() <= mb.abs() {
                let (x_lo, _) = grid[i - 1];
                roots.push(golden_section(
                    |x| miss(x).abs(),
                    x_lo,
                    b,
                    options.max_iterations,
                    x_tolerance,
                ));
            }
        }
    }
    if let Some(&(last, m_last)) = grid.last() {
        if m_last == 0.0 {
            roots.push((last, 0));
        }
    }

    let mut accepted: Vec<Solution> = Vec::new();
    let mut wall_violation: Option<Solution> = None;
    for (x, iterations) in roots {
        let (target_miss_m, wall_margin_m) = residuals(x);
        closest_miss = closest_miss.min(target_miss_m.abs());
        trace!("candidate {x:.6}: miss {target_miss_m:.3e} m, wall margin {wall_margin_m:.4} m");
        if target_miss_m.abs() > options.tolerance_m {
            continue;
        }
        if accepted
            .iter()
            .any(|s| (s.value - x).abs() <= 1e-9 * span.max(1.0))
        {
            continue;
        }
        let candidate = Solution {
            value: x,
            target_miss_m,
            wall_margin_m,
            iterations,
        };
        if wall_margin_m >= -options.tolerance_m {
            accepted.push(candidate);
        } else if wall_violation.is_none_or(|w| wall_margin_m > w.wall_margin_m) {
            wall_violation = Some(candidate);
        }
    }

    if let Some(best) = accepted.into_iter().min_by(|a, b| {
        (a.value - preferred)
            .abs()
            .total_cmp(&(b.value - preferred).abs())
    }) {
        return Ok(best);
    }

    match wall_violation {
        Some(violation) => Err(TrajectoryError::WallNotCleared {
            candidate: violation.value,
            wall_margin_m: violation.wall_margin_m,
        }),
        None => Err(TrajectoryError::TargetUnreachable {
            lower: bounds.lower,
            upper: bounds.upper,
            closest_miss_m: closest_miss,
        }),
    }
}

fn bisect<F>(
    f: F,
    mut a: f64,
    mut b: f64,
    mut fa: f64,
    max_iterations: usize,
    x_tolerance: f64,
) -> (f64, usize)
where
    F: Fn(f64) -> f64,
{
    for iteration in 1..=max_iterations {
        let mid = 0.5 * (a + b);
        let fm = f(mid);
        if fm == 0.0 || 0.5 * (b - a) < x_tolerance {
            return (mid, iteration);
        }
        if fa.signum() == fm.signum() {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    (0.5 * (a + b), max_iterations)
}

fn golden_section<F>(
    f: F,
    mut a: f64,
    mut b: f64,
    max_iterations: usize,
    x_tolerance: f64,
) -> (f64, usize)
where
    F: Fn(f64) -> f64,
{
    let mut c = b - GOLDEN_RATIO_CONJUGATE * (b - a);
    let mut d = a + GOLDEN_RATIO_CONJUGATE * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);
    for iteration in 1..=max_iterations {
        if (b - a).abs() < x_tolerance {
            return (0.5 * (a + b), iteration);
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - GOLDEN_RATIO_CONJUGATE * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + GOLDEN_RATIO_CONJUGATE * (b - a);
            fd = f(d);
        }
    }
    (0.5 * (a + b), max_iterations)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const LAB: PhysicsConstants = PhysicsConstants {
        gravity_mps2: 9.81,
        launch_height_m: 0.3,
    };
    const WALL: ConstraintPoint = ConstraintPoint::new(1.0, 0.6);

    fn target(height_m: f64) -> ConstraintPoint {
        ConstraintPoint::new(2.0, height_m)
    }

    /// v0 = d / cos(theta) * sqrt(g / (2 (h0 + d tan(theta) - y)))
    fn closed_form_speed(angle_deg: f64, target: ConstraintPoint) -> f64 {
        let theta = angle_deg.to_radians();
        let drop = LAB.launch_height_m + target.distance_m * theta.tan() - target.height_m;
        target.distance_m / theta.cos() * (LAB.gravity_mps2 / (2.0 * drop)).sqrt()
    }

    #[test]
    fn reproduces_observed_lab_speed() {
        let solution = solve_speed(
            &LAB,
            45.0,
            &WALL,
            &target(1.125),
            SearchBounds::speed_default(),
            &SolverOptions::default(),
        )
        .expect("lab scenario is feasible");

        assert_abs_diff_eq!(solution.value, 5.778_905, epsilon = 1e-4);
        assert!(solution.target_miss_m.abs() < 1e-4);
        assert!(solution.wall_margin_m >= 0.0);
    }

    #[test]
    fn table_height_target_matches_closed_form() {
        let target = target(0.762);
        let solution = solve_speed(
            &LAB,
            45.0,
            &WALL,
            &target,
            SearchBounds::speed_default(),
            &SolverOptions::default(),
        )
        .expect("feasible");

        assert_abs_diff_eq!(solution.value, closed_form_speed(45.0, target), epsilon = 1e-8);
        assert_abs_diff_eq!(solution.value, 5.0511, epsilon = 1e-3);
    }

    #[test]
    fn solved_speed_round_trips_through_the_model() {
        for (angle_deg, height_m) in [(35.0, 0.4), (45.0, 0.9), (55.0, 1.6), (70.0, 0.1)] {
            let target = target(height_m);
            let solution = solve_speed(
                &LAB,
                angle_deg,
                &WALL,
                &target,
                SearchBounds::speed_default(),
                &SolverOptions::default(),
            )
            .unwrap_or_else(|err| panic!("angle {angle_deg}, height {height_m}: {err}"));

            let inputs = LaunchInputs::new(angle_deg, solution.value);
            let at_target = height_at_distance(inputs, LAB, target.distance_m);
            let at_wall = height_at_distance(inputs, LAB, WALL.distance_m);
            assert_abs_diff_eq!(at_target, height_m, epsilon = 1e-3);
            assert!(at_wall >= WALL.height_m - 1e-3, "wall at {at_wall}");
        }
    }

    #[test]
    fn target_above_asymptote_is_unreachable() {
        // At 45 degrees y(2) < h0 + 2 for every speed.
        let err = solve_speed(
            &LAB,
            45.0,
            &WALL,
            &target(3.0),
            SearchBounds::speed_default(),
            &SolverOptions::default(),
        )
        .expect_err("target is above every reachable height");

        assert!(err.is_infeasible());
        match err {
            TrajectoryError::TargetUnreachable { closest_miss_m, .. } => {
                assert!(closest_miss_m > 0.69, "closest miss {closest_miss_m}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wall_too_high_for_the_only_hitting_speed() {
        // Hitting the floor at 2 m needs ~4.13 m/s, which is only 0.72 m high at the wall.
        let err = solve_speed(
            &LAB,
            45.0,
            &ConstraintPoint::new(1.0, 1.0),
            &target(0.0),
            SearchBounds::speed_default(),
            &SolverOptions::default(),
        )
        .expect_err("wall blocks the only solution");

        match err {
            TrajectoryError::WallNotCleared {
                candidate,
                wall_margin_m,
            } => {
                assert_abs_diff_eq!(candidate, closed_form_speed(45.0, target(0.0)), epsilon = 1e-6);
                assert!(wall_margin_m < 0.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn narrow_bounds_make_a_reachable_target_infeasible() {
        let err = solve_speed(
            &LAB,
            45.0,
            &WALL,
            &target(1.125),
            SearchBounds::new(10.0, 100.0),
            &SolverOptions::default(),
        )
        .expect_err("5.78 m/s lies outside the bounds");
        assert!(matches!(err, TrajectoryError::TargetUnreachable { lower, .. } if lower == 10.0));
    }

    #[test]
    fn rejects_target_before_wall() {
        for target_distance in [1.0, 0.5] {
            let err = solve_speed(
                &LAB,
                45.0,
                &WALL,
                &ConstraintPoint::new(target_distance, 0.8),
                SearchBounds::speed_default(),
                &SolverOptions::default(),
            )
            .expect_err("degenerate geometry");
            assert!(matches!(err, TrajectoryError::InvalidInput(_)));
            assert!(!err.is_infeasible());
        }
    }

    #[test]
    fn rejects_degenerate_angles_gravity_and_bounds() {
        let run = |physics: PhysicsConstants, angle: f64, bounds: SearchBounds| {
            solve_speed(
                &physics,
                angle,
                &WALL,
                &target(0.8),
                bounds,
                &SolverOptions::default(),
            )
        };
        let speed = SearchBounds::speed_default();
        assert!(matches!(run(LAB, 90.0, speed), Err(TrajectoryError::InvalidInput(_))));
        assert!(matches!(run(LAB, 0.0, speed), Err(TrajectoryError::InvalidInput(_))));
        let flat = PhysicsConstants {
            gravity_mps2: 0.0,
            ..LAB
        };
        assert!(matches!(run(flat, 45.0, speed), Err(TrajectoryError::InvalidInput(_))));
        for bounds in [
            SearchBounds::new(0.0, 100.0),
            SearchBounds::new(50.0, 10.0),
            SearchBounds::new(-5.0, 10.0),
        ] {
            assert!(matches!(run(LAB, 45.0, bounds), Err(TrajectoryError::InvalidInput(_))));
        }
    }

    #[test]
    fn rejects_zero_iteration_budget() {
        let options = SolverOptions {
            max_iterations: 0,
            ..SolverOptions::default()
        };
        let err = solve_speed(
            &LAB,
            45.0,
            &WALL,
            &target(1.125),
            SearchBounds::speed_default(),
            &options,
        )
        .expect_err("no iterations allowed");
        assert!(matches!(err, TrajectoryError::InvalidInput(_)));
    }

    #[test]
    fn angle_solve_prefers_root_nearest_45_degrees() {
        let solution = solve_angle(
            &LAB,
            5.778_905_145_512_891,
            &WALL,
            &target(1.125),
            SearchBounds::angle_default(),
            &SolverOptions::default(),
        )
        .expect("feasible");

        assert_abs_diff_eq!(solution.value, 45.0, epsilon = 1e-3);
        assert!(solution.wall_margin_m >= 0.0);
    }

    #[test]
    fn angle_solve_finds_high_arc_when_preferred() {
        let options = SolverOptions {
            preferred_angle_deg: 80.0,
            ..SolverOptions::default()
        };
        let solution = solve_angle(
            &LAB,
            5.778_905_145_512_891,
            &WALL,
            &target(1.125),
            SearchBounds::angle_default(),
            &options,
        )
        .expect("feasible");

        // tan(theta) = 2.404 for the steep root.
        assert_abs_diff_eq!(solution.value.to_radians().tan(), 2.404, epsilon = 5e-3);
        let inputs = LaunchInputs::new(solution.value, 5.778_905_145_512_891);
        assert_abs_diff_eq!(height_at_distance(inputs, LAB, 2.0), 1.125, epsilon = 1e-4);
    }

    #[test]
    fn angle_solve_reports_unreachable_for_slow_launch() {
        let err = solve_angle(
            &LAB,
            2.0,
            &WALL,
            &target(1.125),
            SearchBounds::angle_default(),
            &SolverOptions::default(),
        )
        .expect_err("2 m/s cannot reach 2 m away at that height");
        assert!(matches!(err, TrajectoryError::TargetUnreachable { .. }));
    }

    #[test]
    fn angle_solve_rejects_bad_speed_and_bounds() {
        let solve = |speed: f64, bounds: SearchBounds| {
            solve_angle(
                &LAB,
                speed,
                &WALL,
                &target(1.125),
                bounds,
                &SolverOptions::default(),
            )
        };
        assert!(matches!(
            solve(0.0, SearchBounds::angle_default()),
            Err(TrajectoryError::InvalidInput(_))
        ));
        assert!(matches!(
            solve(5.0, SearchBounds::new(1.0, 90.0)),
            Err(TrajectoryError::InvalidInput(_))
        ));
    }

    #[test]
    fn bisection_converges_on_a_simple_root() {
        let (root, iterations) = bisect(|x| x * x - 2.0, 0.0, 2.0, -2.0, 200, 1e-12);
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(iterations < 200);
    }

    #[test]
    fn golden_section_finds_tangent_minimum() {
        let (x, _) = golden_section(|x| (x - 3.0).powi(2), 0.0, 10.0, 200, 1e-10);
        assert_abs_diff_eq!(x, 3.0, epsilon = 1e-6);
    }
}
