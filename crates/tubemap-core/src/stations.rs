//! Station extraction: folds every named node of every resolved line into per-station records.

use crate::bearing::Bearing;
use crate::geom::{Point, Vector, vector};
use crate::model::{MarkerKind, StationDef};
use crate::resolve::{ResolvedLine, ResolvedNode};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// One line's pass through a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub line: String,
    pub color: String,
    pub dir: Bearing,
    pub label_pos: Option<Bearing>,
    pub kind: MarkerKind,
    pub shift: Vector,
    pub shift_normal: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub label: String,
    pub closed: bool,
    pub highlighted: bool,
    pub hidden: bool,
    /// Grid position (last node referring to the station).
    pub coords: Point,
    /// Interchange iff the first marker is one; fixed at extraction.
    pub kind: MarkerKind,
    pub label_pos: Bearing,
    /// Bearing of the line at the canonical node; label normal shifts are taken against it.
    pub dir: Bearing,
    pub label_shift: Vector,
    pub label_shift_normal: f64,
    pub markers: Vec<Marker>,
}

impl Station {
    pub fn is_interchange(&self) -> bool {
        self.kind == MarkerKind::Interchange
    }

    /// Number of text rows in the label.
    pub fn label_line_count(&self) -> usize {
        self.label.split('\n').count()
    }
}

#[derive(Debug, Clone)]
struct CanonicalLabel {
    label_pos: Option<Bearing>,
    dir: Bearing,
    label_shift: Vector,
    label_shift_normal: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    coords: Option<Point>,
    canonical: Option<CanonicalLabel>,
    markers: Vec<Marker>,
}

fn pair(v: [f64; 2]) -> Vector {
    vector(v[0], v[1])
}

fn canonical_label(line: &ResolvedLine, node: &ResolvedNode) -> CanonicalLabel {
    let label_shift = node
        .node
        .label_shift_coords
        .or(node.node.shift_coords)
        .map(pair)
        .unwrap_or(line.shift_coords);
    CanonicalLabel {
        label_pos: node.node.label_pos,
        dir: node.bearing,
        label_shift,
        label_shift_normal: line.shift_normal,
    }
}

fn marker(line: &ResolvedLine, node: &ResolvedNode) -> Marker {
    Marker {
        line: line.name.clone(),
        color: line.color.clone(),
        dir: node.bearing,
        label_pos: node.node.label_pos,
        kind: node.node.marker.unwrap_or_default(),
        shift: node
            .node
            .shift_coords
            .map(pair)
            .unwrap_or(line.shift_coords),
        shift_normal: line.shift_normal,
    }
}

/// Builds station records in `defs` key order.
///
/// Stations no line refers to are dropped.
pub fn extract_stations(
    defs: &IndexMap<String, StationDef>,
    lines: &[ResolvedLine],
) -> Result<Vec<Station>> {
    let mut acc: IndexMap<&str, Accumulator> = IndexMap::new();

    for line in lines {
        for node in &line.nodes {
            let Some(name) = node.node.name.as_deref() else {
                continue;
            };
            let Some((key, _)) = defs.get_key_value(name) else {
                return Err(Error::UnknownStation {
                    name: name.to_string(),
                });
            };

            let entry = acc.entry(key.as_str()).or_default();
            entry.coords = Some(node.point());

            let take_label = match &entry.canonical {
                None => true,
                Some(c) => c.label_pos.is_none() || node.node.canonical,
            };
            if take_label {
                entry.canonical = Some(canonical_label(line, node));
            }

            if !node.node.hide {
                entry.markers.push(marker(line, node));
            }
        }
    }

    let mut out = Vec::with_capacity(acc.len());
    for (name, def) in defs {
        let Some(entry) = acc.swap_remove(name.as_str()) else {
            tracing::warn!(station = %name, "station is not on any line; skipping");
            continue;
        };
        let (Some(coords), Some(canonical)) = (entry.coords, entry.canonical) else {
            continue;
        };
        let Some(label_pos) = canonical.label_pos else {
            return Err(Error::MissingLabelPosition {
                station: name.clone(),
            });
        };
        let kind = entry.markers.first().map(|m| m.kind).unwrap_or_default();

        out.push(Station {
            name: name.clone(),
            label: def.label.clone(),
            closed: def.closed,
            highlighted: def.visited,
            hidden: def.hide,
            coords,
            kind,
            label_pos,
            dir: canonical.dir,
            label_shift: canonical.label_shift,
            label_shift_normal: canonical.label_shift_normal,
            markers: entry.markers,
        });
    }

    Ok(out)
}
