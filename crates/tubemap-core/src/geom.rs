#![forbid(unsafe_code)]

//! 2D vector primitives shared by the resolver and the layout pass.
//!
//! Grid coordinates and display coordinates both use the same untyped euclid unit; the
//! distinction is carried by the call site, not the type.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Component `i` (0 = x, 1 = y) of a vector.
pub fn axis(v: Vector, i: usize) -> f64 {
    if i == 0 { v.x } else { v.y }
}

/// Builds a vector by evaluating `f` for each axis index.
pub fn apply(f: impl Fn(usize) -> f64) -> Vector {
    vector(f(0), f(1))
}

pub fn norm(v: Vector) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

pub fn dot(a: Vector, b: Vector) -> f64 {
    a.x * b.x + a.y * b.y
}

pub fn cross(a: Vector, b: Vector) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Same direction, same sense.
///
/// Anti-parallel vectors (`v` and `-v`) are *not* parallel here: a line heading west is a
/// different bearing than one heading east.
pub fn parallel(a: Vector, b: Vector) -> bool {
    cross(a, b) == 0.0 && sign(a.x) == sign(b.x) && sign(a.y) == sign(b.y)
}

/// Returns `v / |v|`, or `None` for the zero vector.
pub fn normalize(v: Vector) -> Option<Vector> {
    let n = norm(v);
    if n == 0.0 || !n.is_finite() {
        return None;
    }
    Some(apply(|i| axis(v, i) / n))
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_requires_matching_sense() {
        assert!(parallel(vector(1.0, 0.0), vector(1.0, 0.0)));
        assert!(parallel(vector(1.0, 1.0), vector(3.0, 3.0)));
        assert!(!parallel(vector(1.0, 0.0), vector(-1.0, 0.0)));
        assert!(!parallel(vector(1.0, -1.0), vector(-1.0, 1.0)));
        assert!(!parallel(vector(1.0, 0.0), vector(0.0, 1.0)));
    }

    #[test]
    fn every_grid_step_is_parallel_to_itself_but_not_its_reverse() {
        for x in -1..=1 {
            for y in -1..=1 {
                if x == 0 && y == 0 {
                    continue;
                }
                let v = vector(x as f64, y as f64);
                assert!(parallel(v, v), "{v:?}");
                assert!(!parallel(v, -v), "{v:?}");
            }
        }
    }

    #[test]
    fn normalize_diagonal_has_unit_length() {
        let n = normalize(vector(1.0, -1.0)).unwrap();
        assert!((norm(n) - 1.0).abs() < 1e-12);
        assert!((n.x - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((n.y + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        assert_eq!(normalize(vector(0.0, 0.0)), None);
    }

    #[test]
    fn dot_and_cross() {
        let a = vector(1.0, 2.0);
        let b = vector(3.0, -1.0);
        assert_eq!(dot(a, b), 1.0);
        assert_eq!(cross(a, b), -7.0);
        assert_eq!(axis(b, 0), 3.0);
        assert_eq!(axis(b, 1), -1.0);
        assert_eq!(apply(|i| axis(a, i) * 2.0), vector(2.0, 4.0));
    }
}
