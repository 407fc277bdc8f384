//! Input map description, as supplied by the caller (usually deserialized from JSON).
//!
//! These types are never mutated by the resolver; see [`crate::resolve`] for the
//! bearing-tagged output.

use crate::bearing::Bearing;
use crate::geom::{Point, Vector, point, vector};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapDescription {
    /// Keyed by the station id nodes refer to; key order is preserved.
    #[serde(default)]
    pub stations: IndexMap<String, StationDef>,
    #[serde(default)]
    pub lines: Vec<LineDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub river: Option<LineDef>,
}

impl MapDescription {
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDef {
    pub label: String,
    #[serde(default)]
    pub closed: bool,
    /// Rendered highlighted (inverted interchange glyph, `highlighted` label class).
    #[serde(default)]
    pub visited: bool,
    /// Suppresses the label (markers are still drawn).
    #[serde(default)]
    pub hide: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDef {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub shift_coords: [f64; 2],
    #[serde(default)]
    pub shift_normal: f64,
    #[serde(default)]
    pub highlighted: bool,
    pub nodes: Vec<NodeDef>,
}

impl LineDef {
    pub fn shift(&self) -> Vector {
        vector(self.shift_coords[0], self.shift_coords[1])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDef {
    pub coords: [f64; 2],
    /// Station key; nodes without a name are pure routing points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Bearing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_pos: Option<Bearing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerKind>,
    #[serde(default)]
    pub hide: bool,
    #[serde(default)]
    pub canonical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_coords: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_shift_coords: Option<[f64; 2]>,
}

impl NodeDef {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            coords: [x, y],
            ..Default::default()
        }
    }

    pub fn point(&self) -> Point {
        point(self.coords[0], self.coords[1])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    #[default]
    Station,
    Interchange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let map = MapDescription::from_json_str(
            r##"{
              "stations": { "b": { "label": "Bank" }, "a": { "label": "Angel", "closed": true } },
              "lines": [{
                "name": "northern",
                "color": "#000000",
                "shiftNormal": 1,
                "nodes": [
                  { "coords": [0, 0], "name": "a", "labelPos": "w" },
                  { "coords": [0, 2], "name": "b", "labelPos": "E", "marker": "interchange",
                    "shiftCoords": [0.5, 0], "canonical": true }
                ]
              }]
            }"##,
        )
        .unwrap();

        assert_eq!(
            map.stations.keys().collect::<Vec<_>>(),
            vec!["b", "a"],
            "station key order is preserved"
        );
        assert!(map.stations["a"].closed);
        assert!(!map.stations["b"].visited);
        assert!(map.river.is_none());

        let line = &map.lines[0];
        assert_eq!(line.shift_coords, [0.0, 0.0]);
        assert_eq!(line.shift_normal, 1.0);
        assert_eq!(line.nodes[0].label_pos, Some(Bearing::W));
        assert_eq!(line.nodes[0].marker, None);
        assert_eq!(line.nodes[1].marker, Some(MarkerKind::Interchange));
        assert_eq!(line.nodes[1].shift_coords, Some([0.5, 0.0]));
        assert!(line.nodes[1].canonical);
    }

    #[test]
    fn unknown_bearing_fails_to_load() {
        let err = MapDescription::from_json_str(
            r#"{ "lines": [{ "name": "x", "nodes": [{ "coords": [0, 0], "dir": "up" }] }] }"#,
        )
        .unwrap_err();
        assert!(
            err.to_string().contains("'UP' is not a recognised compass bearing"),
            "{err}"
        );
    }
}
