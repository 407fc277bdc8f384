//! Interchange glyph centering.
//!
//! Lines that meet at an interchange come in at most two direction families on a real map. The
//! glyph is moved to the middle of each family's band of parallel lines; with two families that
//! is the intersection of the two band midlines.

use tubemap_core::Bearing;
use tubemap_core::geom::{Vector, apply, axis, cross, dot, vector};

#[derive(Debug, Clone, Copy)]
struct Family {
    vector: Vector,
    min: f64,
    max: f64,
}

impl Family {
    fn new(vector: Vector, shift_normal: f64) -> Self {
        Self {
            vector,
            min: shift_normal,
            max: shift_normal,
        }
    }

    /// Collinear with this family (either sense).
    fn accepts(&self, v: Vector) -> bool {
        cross(self.vector, v) == 0.0
    }

    fn add(&mut self, v: Vector, shift_normal: f64) {
        // A reversed member's normal points the other way.
        let projected = shift_normal * dot(v, self.vector);
        self.min = self.min.min(projected);
        self.max = self.max.max(projected);
    }

    fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Grid-space shift (in line widths) that centers an interchange among the lines through it.
///
/// `markers` yields each line's bearing at the station and its lateral offset. Only the first
/// two direction families are considered; members of a third are ignored.
pub fn interchange_shift(markers: impl IntoIterator<Item = (Bearing, f64)>) -> Vector {
    let mut first: Option<Family> = None;
    let mut second: Option<Family> = None;

    for (bearing, shift_normal) in markers {
        let v = bearing.unit_vector();
        match first {
            None => first = Some(Family::new(v, shift_normal)),
            Some(ref mut f) if f.accepts(v) => f.add(v, shift_normal),
            Some(_) => match second {
                None => second = Some(Family::new(v, shift_normal)),
                Some(ref mut s) if s.accepts(v) => s.add(v, shift_normal),
                Some(_) => {
                    tracing::debug!(%bearing, "third direction family at interchange ignored");
                }
            },
        }
    }

    match (first, second) {
        (None, _) => vector(0.0, 0.0),
        (Some(f), None) => {
            let mid = f.mid();
            vector(mid * f.vector.y, -mid * f.vector.x)
        }
        (Some(f1), Some(f2)) => {
            let c = cross(f1.vector, f2.vector);
            let (mid1, mid2) = (f1.mid(), f2.mid());
            apply(|i| (mid2 * axis(f1.vector, i) - mid1 * axis(f2.vector, i)) / c)
        }
    }
}
