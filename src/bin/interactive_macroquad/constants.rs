use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 900;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

// Setup scene geometry, in pixels of the 1600x900 frame.
pub const FRAME_WIDTH_PX: f64 = 1600.0;
pub const FRAME_HEIGHT_PX: f64 = 900.0;
pub const TRIANGLE_SIDE_PX: f64 = 500.0;
pub const MARKER_RADIUS_PX: f64 = 69.0;

pub const LEFT_MARGIN: f32 = 120.0;
pub const RIGHT_MARGIN: f32 = 40.0;
pub const TOP_MARGIN: f32 = 140.0;
pub const BOTTOM_MARGIN: f32 = 110.0;

pub const TITLE_Y: f32 = 46.0;
pub const PATH_SAMPLES: usize = 1000;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 5;
pub const BALL_RADIUS_PX: f32 = 8.0;
pub const TARGET_RADIUS_PX: f32 = 9.0;

pub const BACKGROUND: Color = Color::new(0.98, 0.98, 0.99, 1.0);
pub const TRIANGLE_FILL: Color = Color::new(0.86, 0.90, 0.97, 1.0);
pub const TRIANGLE_EDGE: Color = Color::new(0.20, 0.33, 0.60, 1.0);
pub const MARKER_FILL: Color = Color::new(0.95, 0.45, 0.20, 0.85);
pub const WALL_COLOR: Color = Color::new(0.30, 0.30, 0.34, 1.0);
pub const PATH_COLOR: Color = Color::new(0.21, 0.48, 0.96, 1.0);
