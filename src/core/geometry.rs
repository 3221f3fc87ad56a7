//! Containment checks for the target marker's allowed region.
//!
//! Coordinates are screen-like: x to the right, y down.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

fn edge_side(p: Point, a: Point, b: Point) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// True when `point` lies strictly on the same side of all three edges.
/// Points on an edge count as outside. Either winding order works.
pub fn point_in_triangle(point: Point, v1: Point, v2: Point, v3: Point) -> bool {
    let d1 = edge_side(point, v1, v2);
    let d2 = edge_side(point, v2, v3);
    let d3 = edge_side(point, v3, v1);
    (d1 < 0.0 && d2 < 0.0 && d3 < 0.0) || (d1 > 0.0 && d2 > 0.0 && d3 > 0.0)
}

/// Approximate containment: checks 360 boundary points at 1 degree steps.
///
/// A circle whose edge bulges past a triangle side between two sampled
/// points still passes. At the marker radius used here the gap is well under
/// a pixel.
pub fn circle_in_triangle(center: Point, radius: f64, v1: Point, v2: Point, v3: Point) -> bool {
    (0..360).all(|deg| {
        let angle = f64::from(deg).to_radians();
        let boundary = Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        );
        point_in_triangle(boundary, v1, v2, v3)
    })
}

/// Apex-up equilateral triangle centered in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Point; 3],
    pub horizontal_margin: f64,
    pub vertical_margin: f64,
    frame_height: f64,
}

impl Triangle {
    pub fn equilateral_centered(frame_width: f64, frame_height: f64, side: f64) -> Self {
        let triangle_height = (3f64.sqrt() / 2.0) * side;
        let horizontal_margin = (frame_width - side) / 2.0;
        let vertical_margin = (frame_height - triangle_height) / 2.0;
        Self {
            vertices: [
                Point::new(frame_width / 2.0, vertical_margin),
                Point::new(horizontal_margin, frame_height - vertical_margin),
                Point::new(frame_width - horizontal_margin, frame_height - vertical_margin),
            ],
            horizontal_margin,
            vertical_margin,
            frame_height,
        }
    }

    pub fn centroid(&self) -> Point {
        let [a, b, c] = self.vertices;
        Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    /// Frame point `lateral` to the right of the left margin and `above_base`
    /// above the triangle's base line.
    pub fn point_from_base(&self, lateral: f64, above_base: f64) -> Point {
        Point::new(
            self.horizontal_margin + lateral,
            self.frame_height - self.vertical_margin - above_base,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        let [a, b, c] = self.vertices;
        point_in_triangle(point, a, b, c)
    }

    pub fn contains_circle(&self, center: Point, radius: f64) -> bool {
        let [a, b, c] = self.vertices;
        circle_in_triangle(center, radius, a, b, c)
    }
}
