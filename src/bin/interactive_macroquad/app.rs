use log::{info, warn};
use macroquad::prelude::*;

use wallshot::core::window::PlotRect;

use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN,
    MSAA_SAMPLES, RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH,
};
use crate::controls::{draw_setup_panel, draw_simulation_panel, hotkey_actions};
use crate::gameplay::{apply_actions, step_playback};
use crate::hud::draw_hud;
use crate::model::AppScene;
use crate::render::{
    draw_axis_tick_labels, draw_ball, draw_grid, draw_path, draw_target_region,
    draw_wall_and_target,
};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Wallshot".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("could not load '{UI_FONT_PATH}': {err}; falling back to default font");
            None
        }
    };

    let mut state = AppRuntime::new();
    info!("interactive launcher ready");

    loop {
        let frame_dt = get_frame_time();
        let screen_w = screen_width();
        let screen_h = screen_height();

        clear_background(BACKGROUND);

        let panel_actions = match state.scene {
            AppScene::Setup => draw_setup_panel(&mut state),
            AppScene::Simulation => draw_simulation_panel(&state),
        };
        let actions = hotkey_actions(state.scene).merge(panel_actions);
        if apply_actions(&mut state, actions) {
            next_frame().await;
            continue;
        }

        match state.scene {
            AppScene::Setup => {
                draw_target_region(&state.triangle, state.marker_center(), screen_w, screen_h);
            }
            AppScene::Simulation => {
                step_playback(&mut state, frame_dt);
                let rect = PlotRect {
                    left: f64::from(LEFT_MARGIN + 260.0),
                    right: f64::from(screen_w - RIGHT_MARGIN),
                    top: f64::from(TOP_MARGIN),
                    bottom: f64::from(screen_h - BOTTOM_MARGIN),
                };
                draw_grid(&rect, Color::from_rgba(227, 231, 236, 255));
                if let Some(flight) = &state.flight {
                    let scenario = state.snapshot();
                    draw_axis_tick_labels(&rect, flight.window, ui_font.as_ref());
                    draw_wall_and_target(&rect, flight.window, &scenario.wall, &scenario.target);
                    draw_path(flight.path.samples.clone(), &rect, flight.window, 3.0);
                    if let Some(sample) = state.playback.current(&flight.path) {
                        draw_ball(&rect, flight.window, sample);
                    }
                }
            }
        }

        draw_hud(&state, LEFT_MARGIN, screen_h, ui_font.as_ref());
        next_frame().await;
    }
}
