use chrono::Local;
use log::{info, warn};

use wallshot::core::error::TrajectoryError;
use wallshot::core::plot::chart_window;
use wallshot::core::scenario::Scenario;

use crate::constants::PATH_SAMPLES;
use crate::controls::FrameActions;
use crate::input::update_target_entries;
use crate::model::{AppScene, Flight};
use crate::state::AppRuntime;

pub(crate) fn solve_flight(scenario: &Scenario) -> Result<Flight, TrajectoryError> {
    let solution = scenario.solve_speed()?;
    let path = scenario.sample_timed(solution.value, scenario.angle_deg, PATH_SAMPLES)?;
    let window = chart_window(&path.samples, &scenario.wall, &scenario.target);
    Ok(Flight {
        speed_mps: solution.value,
        angle_deg: scenario.angle_deg,
        drive_voltage: scenario.calibration.drive_voltage(solution.value),
        path,
        window,
        solved_at: Local::now(),
    })
}

fn calculate(state: &mut AppRuntime) {
    update_target_entries(state);
    let scenario = state.snapshot();
    state.playback.reset();
    match solve_flight(&scenario) {
        Ok(flight) => {
            info!(
                "solved v0={:.4} m/s at {:.1} deg for target height {:.3} m",
                flight.speed_mps, flight.angle_deg, scenario.target.height_m
            );
            state.status_line = format!("Solved v0 = {:.3} m/s", flight.speed_mps);
            state.flight = Some(flight);
        }
        Err(err) => {
            warn!("no launch for target height {:.3} m: {err}", scenario.target.height_m);
            state.status_line = if err.is_infeasible() {
                format!("Infeasible: {err}")
            } else {
                format!("Error: {err}")
            };
            state.flight = None;
        }
    }
    state.scene = AppScene::Simulation;
}

/// Returns true when the scene changed and the frame should start over.
pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) -> bool {
    match state.scene {
        AppScene::Setup => {
            if actions.calculate {
                calculate(state);
                return true;
            }
            if actions.apply {
                update_target_entries(state);
            }
        }
        AppScene::Simulation => {
            if actions.back {
                info!("back to setup");
                state.playback.reset();
                state.scene = AppScene::Setup;
                return true;
            }
            if actions.reset {
                state.playback.reset();
            }
            if actions.start_stop && state.flight.is_some() {
                state.playback.toggle();
            }
        }
    }
    false
}

pub(crate) fn step_playback(state: &mut AppRuntime, frame_dt: f32) {
    if let Some(flight) = &state.flight {
        state.playback.advance(f64::from(frame_dt), &flight.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_flight_is_sampled_and_framed() {
        let flight = solve_flight(&Scenario::default()).expect("feasible");
        assert_eq!(flight.path.samples.sample_count(), PATH_SAMPLES);
        assert_eq!(flight.path.checkpoints.len(), PATH_SAMPLES + 1);
        assert!(flight.window.max_x >= 2.0);
        assert!((flight.drive_voltage - flight.speed_mps).abs() < 1e-12);
    }

    #[test]
    fn unreachable_target_leaves_no_flight() {
        let mut state = AppRuntime::new();
        state.scenario.speed_bounds.upper = 2.0;
        calculate(&mut state);
        assert_eq!(state.scene, AppScene::Simulation);
        assert!(state.flight.is_none());
        assert!(state.status_line.starts_with("Infeasible"));
    }

    #[test]
    fn start_stop_is_ignored_without_a_flight() {
        let mut state = AppRuntime::new();
        state.scene = AppScene::Simulation;
        let changed = apply_actions(
            &mut state,
            FrameActions {
                start_stop: true,
                ..Default::default()
            },
        );
        assert!(!changed);
        assert!(!state.playback.is_running());
    }

    #[test]
    fn going_back_rewinds_playback() {
        let mut state = AppRuntime::new();
        calculate(&mut state);
        apply_actions(
            &mut state,
            FrameActions {
                start_stop: true,
                ..Default::default()
            },
        );
        step_playback(&mut state, 0.05);
        assert!(state.playback.index() > 0);

        let changed = apply_actions(
            &mut state,
            FrameActions {
                back: true,
                ..Default::default()
            },
        );
        assert!(changed);
        assert_eq!(state.scene, AppScene::Setup);
        assert_eq!(state.playback.index(), 0);
    }
}
