//! Grid -> display scales.
//!
//! The geometry code only ever evaluates a scale; it never inspects its domain or range, so any
//! monotone `Fn(f64) -> f64` can stand in for the linear scales the viewport fitter produces.

use crate::options::LayoutOptions;
use crate::{Error, Result};
use tubemap_core::ResolvedLine;

pub trait Scale {
    fn scale(&self, v: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Scale for F {
    fn scale(&self, v: f64) -> f64 {
        self(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }
}

impl Scale for LinearScale {
    fn scale(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Display length of one grid unit: `|x(1) - x(0)|`, or the y equivalent when x is degenerate.
pub fn unit_length(x: &dyn Scale, y: &dyn Scale) -> f64 {
    let dx = x.scale(1.0) - x.scale(0.0);
    if dx != 0.0 {
        dx.abs()
    } else {
        (y.scale(1.0) - y.scale(0.0)).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl GridBounds {
    /// Bounds of every node of `lines`, padded by one grid unit on each side.
    pub fn of_lines<'a>(lines: impl IntoIterator<Item = &'a ResolvedLine>) -> Option<Self> {
        let mut it = lines.into_iter().flat_map(|l| l.grid_points());
        let p0 = it.next()?;
        let mut b = Self {
            min_x: p0.x,
            min_y: p0.y,
            max_x: p0.x,
            max_y: p0.y,
        };
        for p in it {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(Self {
            min_x: b.min_x - 1.0,
            min_y: b.min_y - 1.0,
            max_x: b.max_x + 1.0,
            max_y: b.max_y + 1.0,
        })
    }
}

/// The pair of scales for one map, plus the derived stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub unit_length: f64,
    pub line_width: f64,
}

impl MapScales {
    /// Fits `bounds` into the margin box, preserving aspect ratio. Grid y points up, display y
    /// points down.
    pub fn fit(bounds: GridBounds, options: &LayoutOptions) -> Result<Self> {
        options.validate()?;

        let inner_w = options.inner_width();
        let inner_h = options.inner_height();
        let desired = (bounds.max_x - bounds.min_x) / (bounds.max_y - bounds.min_y);
        let actual = inner_w / inner_h;
        let ratio = actual / desired;

        let (x_extent, y_extent) = if desired > actual {
            (inner_w, inner_h * ratio)
        } else {
            (inner_w / ratio, inner_h)
        };

        let m = options.margin;
        let x = LinearScale::new((bounds.min_x, bounds.max_x), (m.left, m.left + x_extent));
        let y = LinearScale::new((bounds.min_y, bounds.max_y), (m.top + y_extent, m.top));

        let unit_length = unit_length(&x, &y);
        if !(unit_length.is_finite() && unit_length > 0.0) {
            return Err(Error::InvalidOptions {
                message: format!("degenerate grid unit length {unit_length}"),
            });
        }

        Ok(Self {
            x,
            y,
            unit_length,
            line_width: options.line_width_multiplier * unit_length,
        })
    }

    pub fn fit_lines(lines: &[ResolvedLine], options: &LayoutOptions) -> Result<Self> {
        let bounds = GridBounds::of_lines(lines).ok_or(Error::EmptyMap)?;
        Self::fit(bounds, options)
    }
}
