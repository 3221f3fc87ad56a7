use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use crate::model::AppScene;
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) apply: bool,
    pub(crate) calculate: bool,
    pub(crate) start_stop: bool,
    pub(crate) reset: bool,
    pub(crate) back: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            apply: self.apply || other.apply,
            calculate: self.calculate || other.calculate,
            start_stop: self.start_stop || other.start_stop,
            reset: self.reset || other.reset,
            back: self.back || other.back,
        }
    }
}

pub(crate) fn hotkey_actions(scene: AppScene) -> FrameActions {
    match scene {
        AppScene::Setup => FrameActions {
            apply: is_key_pressed(KeyCode::Enter),
            calculate: is_key_pressed(KeyCode::Space),
            ..Default::default()
        },
        AppScene::Simulation => FrameActions {
            start_stop: is_key_pressed(KeyCode::Space),
            reset: is_key_pressed(KeyCode::R),
            back: is_key_pressed(KeyCode::Escape),
            ..Default::default()
        },
    }
}

pub(crate) fn draw_setup_panel(state: &mut AppRuntime) -> FrameActions {
    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(18.0, 120.0), vec2(340.0, 280.0))
        .label("Target")
        .ui(&mut *root_ui(), |ui| {
            ui.label(None, "Y: height above the table (mm)");
            ui.input_text(hash!(), "Y (mm)", &mut state.y_entry.text);
            ui.label(None, "Z: lateral position (mm)");
            ui.input_text(hash!(), "Z (mm)", &mut state.z_entry.text);
            if ui.button(None, "Apply (Enter)") {
                actions.apply = true;
            }
            ui.separator();
            ui.slider(hash!(), "Angle (deg)", 1.0..89.0, &mut state.angle_deg);
            ui.separator();
            if ui.button(None, "Calculate (Space)") {
                actions.calculate = true;
            }
        });
    actions
}

pub(crate) fn draw_simulation_panel(state: &AppRuntime) -> FrameActions {
    let mut actions = FrameActions::default();
    let running = state.playback.is_running();
    widgets::Window::new(hash!(), vec2(18.0, 120.0), vec2(240.0, 170.0))
        .label("Playback")
        .ui(&mut *root_ui(), |ui| {
            if ui.button(None, "Go back (Esc)") {
                actions.back = true;
            }
            if ui.button(None, if running { "Stop (Space)" } else { "Start (Space)" }) {
                actions.start_stop = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            ui.separator();
            ui.label(None, playback_text(state));
        });
    actions
}

pub(crate) fn playback_text(state: &AppRuntime) -> &'static str {
    if state.flight.is_none() {
        "No flight"
    } else if state.playback.is_running() {
        "Flying"
    } else if state.playback.is_finished() {
        "Landed"
    } else if state.playback.elapsed_s() > 0.0 {
        "Paused"
    } else {
        "Ready"
    }
}
