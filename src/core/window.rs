pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;
const MIN_SPAN_M: f64 = 0.5;

/// World extent shown on a chart, `[0, max_x] x [0, max_y]` meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisWindow {
    pub max_x: f64,
    pub max_y: f64,
}

impl AxisWindow {
    /// Pads the raw extent and widens one axis so `max_x / max_y` is exactly
    /// [`DISTANCE_TO_HEIGHT_RATIO`].
    pub fn fit(raw_max_x: f64, raw_max_y: f64) -> Self {
        let raw_x_span = raw_max_x.max(MIN_SPAN_M);
        let raw_y_span = raw_max_y.max(MIN_SPAN_M);
        let mut x_span = raw_x_span * (1.0 + X_PADDING_RATIO);
        let mut y_span = raw_y_span * (1.0 + Y_PADDING_RATIO);

        if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
            x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
        } else {
            y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
        }

        Self {
            max_x: x_span,
            max_y: y_span,
        }
    }

    /// Smallest fitted window showing every point.
    pub fn covering<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (raw_max_x, raw_max_y) = points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold((0.0f64, 0.0f64), |(mx, my), (x, y)| (mx.max(x), my.max(y)));
        Self::fit(raw_max_x, raw_max_y)
    }
}

/// Screen rectangle a window is drawn into; y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotRect {
    pub fn world_to_screen(&self, window: AxisWindow, x: f64, y: f64) -> (f64, f64) {
        let plot_w = (self.right - self.left).max(1.0);
        let plot_h = (self.bottom - self.top).max(1.0);
        (
            self.left + (x / window.max_x) * plot_w,
            self.bottom - (y / window.max_y) * plot_h,
        )
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

    #[test]
    fn fitted_window_keeps_the_aspect_ratio() {
        for (x, y) in [(2.2, 1.3), (10.0, 0.2), (0.1, 0.1), (3.0, 9.0)] {
            let window = AxisWindow::fit(x, y);
            assert_close(window.max_x / window.max_y, DISTANCE_TO_HEIGHT_RATIO, 1e-12);
            assert!(window.max_x >= x && window.max_y >= y);
        }
    }

    #[test]
    fn covering_ignores_non_finite_points() {
        let window = AxisWindow::covering([(2.0, 1.0), (f64::NAN, 50.0), (1.0, f64::INFINITY)]);
        assert_eq!(window, AxisWindow::fit(2.0, 1.0));
    }

    #[test]
    fn world_origin_maps_to_bottom_left() {
        let rect = PlotRect {
            left: 100.0,
            right: 900.0,
            top: 50.0,
            bottom: 450.0,
        };
        let window = AxisWindow {
            max_x: 4.0,
            max_y: 2.0,
        };
        assert_eq!(rect.world_to_screen(window, 0.0, 0.0), (100.0, 450.0));
        assert_eq!(rect.world_to_screen(window, 4.0, 2.0), (900.0, 50.0));
    }
}
