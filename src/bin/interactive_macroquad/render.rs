use macroquad::prelude::*;

use wallshot::core::ballistics::ConstraintPoint;
use wallshot::core::geometry::{Point, Triangle};
use wallshot::core::sampler::Sample;
use wallshot::core::window::{AxisWindow, PlotRect};

use crate::constants::{
    BALL_RADIUS_PX, FRAME_HEIGHT_PX, FRAME_WIDTH_PX, MARKER_FILL, MARKER_RADIUS_PX, PATH_COLOR,
    TARGET_RADIUS_PX, TRIANGLE_EDGE, TRIANGLE_FILL, WALL_COLOR, X_GRID_LINES, Y_GRID_LINES,
};

fn format_axis_value(value: f32, axis_max: f32) -> String {
    if axis_max >= 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn world_to_screen(rect: &PlotRect, window: AxisWindow, x: f64, y: f64) -> Vec2 {
    let (sx, sy) = rect.world_to_screen(window, x, y);
    vec2(sx as f32, sy as f32)
}

/// Frame pixels scaled onto the current window.
fn frame_to_screen(point: Point, screen_w: f32, screen_h: f32) -> Vec2 {
    vec2(
        point.x as f32 * screen_w / FRAME_WIDTH_PX as f32,
        point.y as f32 * screen_h / FRAME_HEIGHT_PX as f32,
    )
}

pub(crate) fn draw_target_region(
    triangle: &Triangle,
    marker: Point,
    screen_w: f32,
    screen_h: f32,
) {
    let [a, b, c] = triangle.vertices.map(|v| frame_to_screen(v, screen_w, screen_h));
    draw_triangle(a, b, c, TRIANGLE_FILL);
    draw_triangle_lines(a, b, c, 3.0, TRIANGLE_EDGE);

    let center = frame_to_screen(marker, screen_w, screen_h);
    let radius = MARKER_RADIUS_PX as f32 * screen_w / FRAME_WIDTH_PX as f32;
    draw_circle(center.x, center.y, radius, MARKER_FILL);
    draw_circle_lines(center.x, center.y, radius, 2.0, MAROON);
    draw_line(center.x - 8.0, center.y, center.x + 8.0, center.y, 2.0, MAROON);
    draw_line(center.x, center.y - 8.0, center.x, center.y + 8.0, 2.0, MAROON);
}

pub(crate) fn draw_grid(rect: &PlotRect, color: Color) {
    let (left, right, top, bottom) = (
        rect.left as f32,
        rect.right as f32,
        rect.top as f32,
        rect.bottom as f32,
    );
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        draw_line(x, top, x, bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        draw_line(left, y, right, y, 1.0, color);
    }
    draw_line(left, bottom, right, bottom, 2.0, DARKGRAY);
    draw_line(left, top, left, bottom, 2.0, DARKGRAY);
}

pub(crate) fn draw_axis_tick_labels(rect: &PlotRect, window: AxisWindow, font: Option<&Font>) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let tick_font_size: u16 = 16;
    let (left, right, top, bottom) = (
        rect.left as f32,
        rect.right as f32,
        rect.top as f32,
        rect.bottom as f32,
    );
    let (max_x, max_y) = (window.max_x as f32, window.max_y as f32);

    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let label = format_axis_value(t * max_x, max_x);
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            left + t * (right - left) - (size.width * 0.5),
            bottom + 22.0,
            tick_font_size,
            label_color,
            font,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let label = format_axis_value(t * max_y, max_y);
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (left - 8.0) - size.width,
            bottom - t * (bottom - top) + (size.height * 0.35),
            tick_font_size,
            label_color,
            font,
        );
    }

    draw_ui_text("Distance (m)", right - 130.0, bottom + 48.0, 18, label_color, font);
    draw_ui_text("Height (m)", left + 10.0, top - 8.0, 18, label_color, font);
}

pub(crate) fn draw_wall_and_target(
    rect: &PlotRect,
    window: AxisWindow,
    wall: &ConstraintPoint,
    target: &ConstraintPoint,
) {
    let wall_base = world_to_screen(rect, window, wall.distance_m, 0.0);
    let wall_top = world_to_screen(rect, window, wall.distance_m, wall.height_m);
    draw_line(wall_base.x, wall_base.y, wall_top.x, wall_top.y, 6.0, WALL_COLOR);

    let post_base = world_to_screen(rect, window, target.distance_m, 0.0);
    let center = world_to_screen(rect, window, target.distance_m, target.height_m);
    draw_line(post_base.x, post_base.y, center.x, center.y, 2.0, GRAY);
    draw_circle(center.x, center.y, TARGET_RADIUS_PX, MARKER_FILL);
    draw_circle_lines(center.x, center.y, TARGET_RADIUS_PX, 2.0, MAROON);
}

/// Polyline through the above-ground samples.
pub(crate) fn draw_path<I>(samples: I, rect: &PlotRect, window: AxisWindow, thickness: f32)
where
    I: IntoIterator<Item = Sample>,
{
    let mut prev: Option<Vec2> = None;
    for sample in samples.into_iter().filter(Sample::is_above_ground) {
        let cur = world_to_screen(rect, window, sample.x, sample.y);
        if let Some(p) = prev {
            draw_line(p.x, p.y, cur.x, cur.y, thickness, PATH_COLOR);
        }
        prev = Some(cur);
    }
}

pub(crate) fn draw_ball(rect: &PlotRect, window: AxisWindow, sample: Sample) {
    let p = world_to_screen(rect, window, sample.x, sample.y);
    draw_circle(p.x, p.y, BALL_RADIUS_PX, RED);
    draw_circle_lines(p.x, p.y, BALL_RADIUS_PX, 2.0, MAROON);
}
