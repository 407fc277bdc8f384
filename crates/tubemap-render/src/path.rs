//! Line -> SVG path data.

use crate::scale::{Scale, unit_length};
use crate::svg::fmt;
use crate::transform::CoordTransform;
use std::fmt::Write as _;
use tubemap_core::ResolvedLine;
use tubemap_core::geom::{Point, Vector, cross, vector};

/// Minimal SVG path writer (`M`, `L`, `Q` only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathData(String);

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        debug_assert_finite(p);
        let _ = write!(&mut self.0, "M{},{}", fmt(p.x), fmt(p.y));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        debug_assert_finite(p);
        let _ = write!(&mut self.0, "L{},{}", fmt(p.x), fmt(p.y));
        self
    }

    pub fn quad_to(&mut self, control: Point, end: Point) -> &mut Self {
        debug_assert_finite(control);
        debug_assert_finite(end);
        let _ = write!(
            &mut self.0,
            "Q{},{},{},{}",
            fmt(control.x),
            fmt(control.y),
            fmt(end.x),
            fmt(end.y)
        );
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// `fmt` prints non-finite numbers as `0`, which would silently misplace a point.
fn debug_assert_finite(p: Point) {
    debug_assert!(p.x.is_finite() && p.y.is_finite(), "non-finite path point {p:?}");
}

/// Grid direction `v` as a display-space direction under the given scales.
fn display_direction(x: &dyn Scale, y: &dyn Scale, v: Vector) -> Vector {
    vector(x.scale(v.x) - x.scale(0.0), y.scale(v.y) - y.scale(0.0))
}

/// Where the ray through `from` along `from_dir` meets the line through `to` along `to_dir`.
///
/// `None` when the tangents are parallel.
fn tangent_intersection(from: Point, from_dir: Vector, to: Point, to_dir: Vector) -> Option<Point> {
    let denom = cross(from_dir, to_dir);
    if denom == 0.0 {
        return None;
    }
    let t = cross(to - from, to_dir) / denom;
    Some(from + from_dir * t)
}

/// Builds the path for a bearing-resolved line (or river).
///
/// Straight runs become `L` segments; bearing changes become a `Q` curve whose control point is
/// where the incoming and outgoing tangents meet. The first and last points are pulled back /
/// pushed out along the tangent by `line_width / (2 * tick_ratio * unit_length)` so the stroke
/// ends flush with the station ticks.
pub fn line_path(
    line: &ResolvedLine,
    x: &dyn Scale,
    y: &dyn Scale,
    line_width: f64,
    tick_ratio: f64,
) -> String {
    let unit_length = unit_length(x, y);
    let transform = CoordTransform::new(x, y, line_width, unit_length)
        .with_shift(line.shift_normal, line.shift_coords);
    let end_correction = line_width / (2.0 * tick_ratio * unit_length);

    let mut path = PathData::new();
    let last = line.nodes.len().saturating_sub(1);
    for (idx, pair) in line.nodes.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        let prev_tangent = prev.bearing.unit_vector();
        let next_tangent = next.bearing.unit_vector();

        if idx == 0 {
            path.move_to(transform.apply(prev.point(), prev_tangent, -end_correction));
        }

        let prev_point = transform.apply(prev.point(), prev_tangent, 0.0);
        let next_shift = if idx + 1 == last { end_correction } else { 0.0 };
        let next_point = transform.apply(next.point(), next_tangent, next_shift);

        let control = (next.bearing != prev.bearing)
            .then(|| {
                tangent_intersection(
                    prev_point,
                    display_direction(x, y, prev.bearing.vector()),
                    next_point,
                    display_direction(x, y, next.bearing.vector()),
                )
            })
            .flatten();
        match control {
            Some(control) => path.quad_to(control, next_point),
            // Straight run, or a reversal with no corner to draw.
            None => path.line_to(next_point),
        };
    }

    path.into_string()
}
