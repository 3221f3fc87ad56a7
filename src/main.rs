use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use wallshot::core::ballistics::{
    ConstraintPoint, LaunchInputs, PhysicsConstants, apex_time, flight_time_and_range,
    trajectory_at_time,
};
use wallshot::core::plot::{ChartOptions, render_svg};
use wallshot::core::sampler::DEFAULT_SAMPLES;
use wallshot::core::scenario::{LauncherCalibration, Scenario};
use wallshot::core::solver::{SearchBounds, Solution};

#[derive(Parser, Debug)]
#[command(name = "wallshot", version, about = "Solve a launch that clears a wall and lands on a target")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Solve the launch speed for a fixed angle
    Speed {
        #[command(flatten)]
        setup: SetupArgs,
        /// Launch angle (degrees)
        #[arg(long, default_value_t = Scenario::default().angle_deg)]
        angle: f64,
    },
    /// Solve the launch angle for a fixed speed
    Angle {
        #[command(flatten)]
        setup: SetupArgs,
        /// Launch speed (m/s)
        #[arg(long)]
        speed: f64,
    },
}

#[derive(Args, Debug)]
struct SetupArgs {
    /// Gravitational acceleration (m/s^2)
    #[arg(long, default_value_t = Scenario::default().physics.gravity_mps2)]
    gravity: f64,
    /// Height the projectile leaves the launcher at (m)
    #[arg(long, default_value_t = Scenario::default().physics.launch_height_m)]
    launch_height: f64,
    #[arg(long, default_value_t = Scenario::default().wall.distance_m)]
    wall_distance: f64,
    #[arg(long, default_value_t = Scenario::default().wall.height_m)]
    wall_height: f64,
    #[arg(long, default_value_t = Scenario::default().target.distance_m)]
    target_distance: f64,
    #[arg(long, default_value_t = Scenario::default().target.height_m)]
    target_height: f64,
    /// Lower search bound; defaults to 1 for either solve
    #[arg(long)]
    lower: Option<f64>,
    /// Upper search bound; defaults to 100 m/s or 89 degrees
    #[arg(long)]
    upper: Option<f64>,
    /// Largest accepted target miss (m)
    #[arg(long, default_value_t = Scenario::default().solver.tolerance_m)]
    tolerance: f64,
    /// Launcher drive volts per m/s of launch speed
    #[arg(long, default_value_t = LauncherCalibration::default().volts_per_mps)]
    volts_per_mps: f64,
    /// Samples used for the SVG chart
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,
    /// Print an SVG chart of the solved flight to stdout instead of the report
    #[arg(long)]
    svg: bool,
}

impl SetupArgs {
    fn scenario(&self) -> Scenario {
        let mut scenario = Scenario::default();
        scenario.physics = PhysicsConstants {
            gravity_mps2: self.gravity,
            launch_height_m: self.launch_height,
        };
        scenario.wall = ConstraintPoint::new(self.wall_distance, self.wall_height);
        scenario.target = ConstraintPoint::new(self.target_distance, self.target_height);
        scenario.solver.tolerance_m = self.tolerance;
        scenario.calibration.volts_per_mps = self.volts_per_mps;
        scenario.speed_bounds = self.bounds(scenario.speed_bounds);
        scenario.angle_bounds = self.bounds(scenario.angle_bounds);
        scenario
    }

    fn bounds(&self, default: SearchBounds) -> SearchBounds {
        SearchBounds::new(
            self.lower.unwrap_or(default.lower),
            self.upper.unwrap_or(default.upper),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Solved {
    Speed,
    Angle,
}

#[derive(Clone, Debug)]
struct Report {
    solved: Solved,
    launch: LaunchInputs,
    solution: Solution,
    apex_height_m: f64,
    flight_time_s: f64,
    range_m: f64,
    drive_voltage: f64,
    solved_at: DateTime<Local>,
}

impl Report {
    fn build(solved: Solved, launch: LaunchInputs, solution: Solution, scenario: &Scenario) -> Result<Self, String> {
        let (flight_time_s, range_m) =
            flight_time_and_range(launch, scenario.physics).map_err(|e| e.to_string())?;
        let (_, apex_height_m) = trajectory_at_time(
            launch,
            scenario.physics,
            apex_time(launch, scenario.physics),
        );
        Ok(Self {
            solved,
            launch,
            solution,
            apex_height_m,
            flight_time_s,
            range_m,
            drive_voltage: scenario.calibration.drive_voltage(launch.speed_mps),
            solved_at: Local::now(),
        })
    }

    fn lines(&self) -> Vec<String> {
        let headline = match self.solved {
            Solved::Speed => format!("Launch speed: {:.4} m/s", self.launch.speed_mps),
            Solved::Angle => format!("Launch angle: {:.4} deg", self.launch.angle_deg),
        };
        vec![
            format!("Solved at {}", self.solved_at.format("%Y-%m-%d %H:%M:%S")),
            headline,
            format!("Target miss: {:.2e} m", self.solution.target_miss_m),
            format!("Wall clearance: {:.4} m", self.solution.wall_margin_m),
            format!("Apex height: {:.4} m", self.apex_height_m),
            format!("Time of flight: {:.4} s", self.flight_time_s),
            format!("Horizontal distance: {:.4} m", self.range_m),
            format!("Drive voltage: {:.3} V", self.drive_voltage),
        ]
    }
}

fn solve(cmd: &Cmd) -> Result<(Report, Scenario, &SetupArgs), String> {
    match cmd {
        Cmd::Speed { setup, angle } => {
            let scenario = setup.scenario().with_angle(*angle);
            let solution = scenario.solve_speed().map_err(|e| e.to_string())?;
            let launch = LaunchInputs::new(*angle, solution.value);
            Ok((Report::build(Solved::Speed, launch, solution, &scenario)?, scenario, setup))
        }
        Cmd::Angle { setup, speed } => {
            let scenario = setup.scenario();
            let solution = scenario.solve_angle(*speed).map_err(|e| e.to_string())?;
            let launch = LaunchInputs::new(solution.value, *speed);
            Ok((Report::build(Solved::Angle, launch, solution, &scenario)?, scenario, setup))
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let (report, scenario, setup) = solve(&cli.cmd)?;
    info!(
        "solved {:?}: speed {:.4} m/s at {:.4} deg",
        report.solved, report.launch.speed_mps, report.launch.angle_deg
    );

    if setup.svg {
        let samples = scenario
            .sample(report.launch.speed_mps, report.launch.angle_deg, setup.samples)
            .map_err(|e| e.to_string())?;
        let svg = render_svg(samples, &scenario.wall, &scenario.target, &ChartOptions::default())
            .map_err(|e| e.to_string())?;
        println!("{svg}");
        return Ok(());
    }

    println!();
    for line in report.lines() {
        println!("{line}");
    }
    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} speed [--angle <deg>] [setup flags]");
    println!("  {program} angle --speed <m/s> [setup flags]");
    println!();
    println!("Examples:");
    println!("  {program} speed --angle 45 --target-height 1.125");
    println!("  {program} angle --speed 6 --svg > flight.svg");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        warn!("solve failed: {err}");
        eprintln!("Error: {err}");
        print_usage("wallshot");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wallshot").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn speed_defaults_to_the_lab_scenario() {
        let cli = parse(&["speed"]);
        let Cmd::Speed { setup, angle } = &cli.cmd else {
            panic!("expected the speed subcommand");
        };
        assert_eq!(*angle, 45.0);
        assert_eq!(setup.scenario(), Scenario::default());
    }

    #[test]
    fn bounds_flags_override_either_side() {
        let cli = parse(&["angle", "--speed", "6", "--lower", "20"]);
        let Cmd::Angle { setup, .. } = &cli.cmd else {
            panic!("expected the angle subcommand");
        };
        let scenario = setup.scenario();
        assert_eq!(scenario.angle_bounds, SearchBounds::new(20.0, 89.0));
        assert_eq!(scenario.speed_bounds, SearchBounds::new(20.0, 100.0));
    }

    #[test]
    fn angle_requires_a_speed() {
        assert!(Cli::try_parse_from(["wallshot", "angle"]).is_err());
    }

    #[test]
    fn solves_the_raised_target() {
        let cli = parse(&["speed", "--target-height", "1.125"]);
        let (report, _, _) = solve(&cli.cmd).expect("feasible");
        assert_close(report.launch.speed_mps, 5.7789, 1e-3);
        assert_close(report.drive_voltage, report.launch.speed_mps, 1e-12);
        assert!(report.range_m > 2.0);
        assert!(report.apex_height_m > 1.125);
        assert!(report.lines()[1].starts_with("Launch speed: 5.77"));
    }

    #[test]
    fn unreachable_target_surfaces_as_message() {
        let cli = parse(&["angle", "--speed", "2", "--target-height", "0.8"]);
        let err = solve(&cli.cmd).expect_err("too slow to reach");
        assert!(err.contains("reaches the target height"), "{err}");
    }
}
