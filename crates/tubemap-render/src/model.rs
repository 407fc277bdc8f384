use crate::anchor::{Baseline, TextAnchor};
use serde::{Deserialize, Serialize};
use tubemap_core::geom::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for LayoutPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRiver {
    pub d: String,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutLine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub color: String,
    pub d: String,
    pub stroke_width: f64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInterchange {
    /// Station key.
    pub name: String,
    pub translate: LayoutPoint,
    pub radius: f64,
    pub stroke_width: f64,
    pub highlighted: bool,
}

/// Tick mark for one line passing through an ordinary station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStationTick {
    pub name: String,
    pub line: String,
    pub color: String,
    pub points: [LayoutPoint; 2],
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutLabel {
    pub name: String,
    /// Label text split into rows.
    pub lines: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub text_anchor: TextAnchor,
    pub baseline: Baseline,
    pub font_size: f64,
    /// Names of the lines serving the station, first-seen order.
    pub classes: Vec<String>,
    pub highlighted: bool,
    pub closed: bool,
    pub hidden: bool,
}

/// Display geometry for one map, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TubeMapLayout {
    pub width: f64,
    pub height: f64,
    pub unit_length: f64,
    pub line_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub river: Option<LayoutRiver>,
    pub lines: Vec<LayoutLine>,
    pub interchanges: Vec<LayoutInterchange>,
    pub stations: Vec<LayoutStationTick>,
    pub labels: Vec<LayoutLabel>,
}
