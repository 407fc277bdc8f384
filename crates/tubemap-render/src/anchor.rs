//! Station tick and label placement relative to the label bearing.

use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use tubemap_core::geom::{Point, Vector, point, vector};
use tubemap_core::{Bearing, Marker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    Baseline,
    Middle,
    Hanging,
}

impl Baseline {
    pub fn as_str(self) -> &'static str {
        match self {
            Baseline::Baseline => "baseline",
            Baseline::Middle => "middle",
            Baseline::Hanging => "hanging",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    /// Pixel offset from the station point, +y up.
    pub offset: Vector,
    pub text_anchor: TextAnchor,
    pub baseline: Baseline,
}

/// Label offset and alignment for a label drawn on the `label_pos` side of a station.
///
/// Labels above the station (N, NE, NW) are pushed further out by one row per extra line so
/// multi-line text grows away from the line.
pub fn label_anchor(
    label_pos: Bearing,
    line_width: f64,
    line_width_multiplier: f64,
    line_count: usize,
) -> LabelAnchor {
    let offset = line_width * 1.8;
    let extra = line_count.saturating_sub(1) as f64;

    let (pos, text_anchor, baseline) = match label_pos {
        Bearing::N => (
            vector(0.0, 2.1 * line_width * extra + offset),
            TextAnchor::Middle,
            Baseline::Baseline,
        ),
        Bearing::NE => (
            vector(offset / SQRT_2, (line_width * extra + offset) / SQRT_2),
            TextAnchor::Start,
            Baseline::Baseline,
        ),
        Bearing::E => (vector(offset, 0.0), TextAnchor::Start, Baseline::Middle),
        Bearing::SE => (
            vector(offset / SQRT_2, -offset / SQRT_2),
            TextAnchor::Start,
            Baseline::Hanging,
        ),
        Bearing::S => (
            vector(0.0, -line_width_multiplier * offset),
            TextAnchor::Middle,
            Baseline::Hanging,
        ),
        Bearing::SW => (
            vector(-offset / SQRT_2, -offset / SQRT_2),
            TextAnchor::End,
            Baseline::Hanging,
        ),
        Bearing::W => (vector(-offset, 0.0), TextAnchor::End, Baseline::Middle),
        Bearing::NW => (
            vector(
                -(line_width * extra + offset) / SQRT_2,
                (line_width * extra + offset) / SQRT_2,
            ),
            TextAnchor::End,
            Baseline::Baseline,
        ),
    };

    LabelAnchor {
        offset: pos,
        text_anchor,
        baseline,
    }
}

/// Grid-space endpoints of the tick drawn for one marker of an ordinary station.
///
/// The tick starts just outside the line (`m / 2.05` from its centre) and runs `m / tick_ratio`
/// further towards the label, where `m` is the line width in grid units.
pub fn tick_points(
    station: Point,
    marker: &Marker,
    label_pos: Bearing,
    line_width_multiplier: f64,
    tick_ratio: f64,
) -> [Point; 2] {
    let m = line_width_multiplier;
    let tangent = marker.dir.unit_vector();
    let label = label_pos.unit_vector();

    let shift = vector(
        marker.shift.x + marker.shift_normal * tangent.y,
        marker.shift.y - marker.shift_normal * tangent.x,
    );
    let base = station + shift * m;

    let inner = m / 2.05;
    let outer = m / 2.0 + m / tick_ratio;
    [
        point(base.x + inner * label.x, base.y + inner * label.y),
        point(base.x + outer * label.x, base.y + outer * label.y),
    ]
}
