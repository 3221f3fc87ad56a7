use macroquad::prelude::*;

use crate::constants::TITLE_Y;
use crate::controls::playback_text;
use crate::model::AppScene;
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, left: f32, screen_h: f32, font: Option<&Font>) {
    draw_header_block(state, left, font);
    if state.scene == AppScene::Simulation {
        draw_flight_readouts(state, left, font);
    }
    draw_ui_text(
        &state.status_line,
        left,
        screen_h - 24.0,
        20,
        Color::from_rgba(60, 64, 72, 255),
        font,
    );
}

fn draw_header_block(state: &AppRuntime, left: f32, font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    let (title, subtitle) = match state.scene {
        AppScene::Setup => (
            "Wallshot - Target Setup",
            "Place the target inside the triangle, pick an angle, then Calculate",
        ),
        AppScene::Simulation => (
            "Wallshot - Simulation",
            "Space: start/stop | R: reset | Esc: back to setup",
        ),
    };
    draw_ui_text(title, left, TITLE_Y, 30, header_color, font);
    draw_ui_text(subtitle, left, TITLE_Y + 30.0, 18, DARKGRAY, font);
}

fn draw_flight_readouts(state: &AppRuntime, left: f32, font: Option<&Font>) {
    let x = left + 620.0;
    let color = Color::from_rgba(30, 30, 35, 255);
    let Some(flight) = &state.flight else {
        draw_ui_text("No path to show", x, TITLE_Y, 22, MAROON, font);
        return;
    };
    let lines = [
        format!(
            "v0 = {:.3} m/s at {:.1} deg | {:.2} V",
            flight.speed_mps, flight.angle_deg, flight.drive_voltage
        ),
        format!(
            "Target Y = {} mm | Z = {:.1} cm | {}",
            state.y_entry.value,
            state.lateral_cm(),
            playback_text(state)
        ),
        format!("Solved {}", flight.solved_at.format("%H:%M:%S")),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_ui_text(line, x, TITLE_Y + i as f32 * 24.0, 20, color, font);
    }
}
