#![forbid(unsafe_code)]

//! Tube map data model + direction resolution (headless).
//!
//! The pipeline is:
//! - load a [`MapDescription`] (usually from JSON),
//! - [`resolve`] it into a [`ResolvedMap`]: every node tagged with a compass [`Bearing`],
//!   every station folded into a [`Station`] with one [`Marker`] per line.
//!
//! Turning a resolved map into display geometry lives in `tubemap-render`.

pub mod bearing;
pub mod error;
pub mod geom;
pub mod model;
pub mod resolve;
pub mod stations;

pub use bearing::{Bearing, compass_bearing, direction_vector};
pub use error::{Error, Result};
pub use model::{LineDef, MapDescription, MarkerKind, NodeDef, StationDef};
pub use resolve::{ResolvedLine, ResolvedNode, line_bearings, resolve_line};
pub use stations::{Marker, Station, extract_stations};

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedMap {
    pub lines: Vec<ResolvedLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub river: Option<ResolvedLine>,
    pub stations: Vec<Station>,
}

impl ResolvedMap {
    pub fn interchanges(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(|s| s.is_interchange())
    }

    pub fn normal_stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(|s| !s.is_interchange())
    }
}

/// Resolves bearings for every line (and the river) and extracts stations.
///
/// The description is only borrowed; repeated calls on the same input give identical results.
pub fn resolve(map: &MapDescription) -> Result<ResolvedMap> {
    let lines = map
        .lines
        .iter()
        .map(resolve_line)
        .collect::<Result<Vec<_>>>()?;
    let river = map.river.as_ref().map(resolve_line).transpose()?;
    let stations = extract_stations(&map.stations, &lines)?;

    tracing::debug!(
        lines = lines.len(),
        river = river.is_some(),
        stations = stations.len(),
        "resolved map"
    );

    Ok(ResolvedMap {
        lines,
        river,
        stations,
    })
}

/// Convenience: parse JSON and resolve in one step.
pub fn resolve_json(text: &str) -> Result<ResolvedMap> {
    resolve(&MapDescription::from_json_str(text)?)
}
