//! Static SVG chart of a solved flight: the path, the wall and the target.

use plotters::prelude::*;

use crate::core::ballistics::ConstraintPoint;
use crate::core::error::TrajectoryError;
use crate::core::sampler::Samples;
use crate::core::window::AxisWindow;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    /// Mesh, tick labels and axis descriptions. Needs a system font.
    pub axis_labels: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
            title: Some("Launch over the wall".to_string()),
            axis_labels: true,
        }
    }
}

fn render_error(err: impl std::fmt::Display) -> TrajectoryError {
    TrajectoryError::Render(err.to_string())
}

/// Window covering the above-ground part of the path, the wall top and the
/// target.
pub fn chart_window(samples: &Samples, wall: &ConstraintPoint, target: &ConstraintPoint) -> AxisWindow {
    AxisWindow::covering(
        samples
            .clone()
            .filter(|s| s.is_above_ground())
            .map(|s| (s.x, s.y))
            .chain([
                (wall.distance_m, wall.height_m),
                (target.distance_m, target.height_m),
            ]),
    )
}

/// Renders the flight into an in-memory SVG document.
pub fn render_svg(
    samples: Samples,
    wall: &ConstraintPoint,
    target: &ConstraintPoint,
    options: &ChartOptions,
) -> Result<String, TrajectoryError> {
    let window = chart_window(&samples, wall, target);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if let Some(title) = &options.title {
            builder.caption(title, ("sans-serif", 24));
        }
        if options.axis_labels {
            builder.x_label_area_size(40).y_label_area_size(50);
        }
        let mut chart = builder
            .build_cartesian_2d(0.0..window.max_x, 0.0..window.max_y)
            .map_err(render_error)?;

        if options.axis_labels {
            chart
                .configure_mesh()
                .x_desc("distance (m)")
                .y_desc("height (m)")
                .draw()
                .map_err(render_error)?;
        }

        chart
            .draw_series(LineSeries::new(
                samples.filter(|s| s.is_above_ground()).map(|s| (s.x, s.y)),
                BLUE.stroke_width(2),
            ))
            .map_err(render_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(wall.distance_m, 0.0), (wall.distance_m, wall.height_m)],
                BLACK.stroke_width(4),
            )))
            .map_err(render_error)?;
        chart
            .draw_series(std::iter::once(Circle::new(
                (target.distance_m, target.height_m),
                6,
                RED.filled(),
            )))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::sample_path;

    fn lab_points() -> (ConstraintPoint, ConstraintPoint) {
        (ConstraintPoint::new(1.0, 0.6), ConstraintPoint::new(2.0, 0.825))
    }

    #[test]
    fn window_covers_path_wall_and_target() {
        let (wall, target) = lab_points();
        let samples = sample_path(5.34, 45.0, 9.81, 0.3, 200).expect("valid");
        let window = chart_window(&samples, &wall, &target);
        let highest = samples
            .clone()
            .map(|s| s.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(window.max_y >= highest);
        assert!(window.max_x >= target.distance_m);
    }

    #[test]
    fn below_ground_tail_does_not_stretch_the_window() {
        let (wall, target) = lab_points();
        let samples = sample_path(5.0, 45.0, 9.81, -0.5, 200).expect("valid");
        let window = chart_window(&samples, &wall, &target);
        // The visible arc stays short of the target, so the target sets both extents.
        assert_eq!(window, AxisWindow::fit(target.distance_m, target.height_m));
        let tail = samples.clone().last().expect("non-empty");
        assert!(tail.y < 0.0 && tail.x > window.max_x);
    }

    #[test]
    fn renders_svg_without_text() {
        let (wall, target) = lab_points();
        let samples = sample_path(5.34, 45.0, 9.81, 0.3, 100).expect("valid");
        let options = ChartOptions {
            title: None,
            axis_labels: false,
            ..ChartOptions::default()
        };
        let svg = render_svg(samples, &wall, &target, &options).expect("renders");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn render_failures_map_to_render_errors() {
        let err = render_error("backend gone");
        assert_eq!(err, TrajectoryError::Render("backend gone".to_string()));
        assert!(!err.is_infeasible());
    }
}
