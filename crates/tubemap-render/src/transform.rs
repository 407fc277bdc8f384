use crate::scale::Scale;
use tubemap_core::geom::{Point, Vector, point, vector};

/// Grid coordinates -> display coordinates for one line.
///
/// Three displacements are added in grid space before scaling:
/// - the line's fixed `shift_coords`,
/// - `shift_normal` along the normal `(t.y, -t.x)` of the unit tangent `t`,
/// - an optional tangential shift along `t` (end caps).
///
/// The first two are measured in line widths and converted with `line_width / unit_length`.
pub struct CoordTransform<'a> {
    x: &'a dyn Scale,
    y: &'a dyn Scale,
    shift_scale: f64,
    shift_normal: f64,
    shift_coords: Vector,
}

impl<'a> CoordTransform<'a> {
    pub fn new(x: &'a dyn Scale, y: &'a dyn Scale, line_width: f64, unit_length: f64) -> Self {
        Self {
            x,
            y,
            shift_scale: line_width / unit_length,
            shift_normal: 0.0,
            shift_coords: vector(0.0, 0.0),
        }
    }

    pub fn with_shift(mut self, shift_normal: f64, shift_coords: Vector) -> Self {
        self.shift_normal = shift_normal;
        self.shift_coords = shift_coords;
        self
    }

    pub fn apply(&self, coords: Point, tangent: Vector, shift_tangential: f64) -> Point {
        let s = self.shift_scale;
        point(
            self.x.scale(
                coords.x
                    + shift_tangential * tangent.x
                    + s * (self.shift_coords.x + self.shift_normal * tangent.y),
            ),
            self.y.scale(
                coords.y + shift_tangential * tangent.y
                    + s * (self.shift_coords.y - self.shift_normal * tangent.x),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(v: f64) -> f64 {
        v
    }

    #[test]
    fn unshifted_transform_is_the_scale() {
        let x = |v: f64| 10.0 * v;
        let y = |v: f64| -10.0 * v;
        let t = CoordTransform::new(&x, &y, 8.0, 10.0);
        assert_eq!(
            t.apply(point(1.0, 2.0), vector(1.0, 0.0), 0.0),
            point(10.0, -20.0)
        );
    }

    #[test]
    fn normal_shift_is_perpendicular_to_the_tangent() {
        // shift_scale = 0.5
        let t = CoordTransform::new(&identity, &identity, 1.0, 2.0).with_shift(2.0, vector(0.0, 0.0));
        // heading east: normal is (0, -1)
        assert_eq!(
            t.apply(point(0.0, 0.0), vector(1.0, 0.0), 0.0),
            point(0.0, -1.0)
        );
        // heading north: normal is (1, 0)
        assert_eq!(
            t.apply(point(0.0, 0.0), vector(0.0, 1.0), 0.0),
            point(1.0, 0.0)
        );
    }

    #[test]
    fn coordinate_and_tangential_shifts_add_up() {
        let t = CoordTransform::new(&identity, &identity, 1.0, 1.0).with_shift(0.0, vector(0.5, -0.5));
        assert_eq!(
            t.apply(point(3.0, 3.0), vector(0.0, 1.0), -0.25),
            point(3.5, 2.25)
        );
    }
}
