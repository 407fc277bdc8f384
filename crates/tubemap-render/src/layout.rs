//! Resolved map -> display geometry.

use crate::anchor::{label_anchor, tick_points};
use crate::interchange::interchange_shift;
use crate::model::{
    LayoutInterchange, LayoutLabel, LayoutLine, LayoutPoint, LayoutRiver, LayoutStationTick,
    TubeMapLayout,
};
use crate::options::LayoutOptions;
use crate::path::line_path;
use crate::scale::{MapScales, Scale};
use crate::Result;
use rustc_hash::FxHashSet;
use tubemap_core::geom::{Point, point, vector};
use tubemap_core::{ResolvedMap, Station};

const RIVER_STROKE: &str = "#CCECF4";

/// Lays out a resolved map inside the chart described by `options`.
///
/// The viewport is fitted to the lines only; a river that runs past them is clipped by the
/// consumer, not allowed to shrink the map.
pub fn layout_map(map: &ResolvedMap, options: &LayoutOptions) -> Result<TubeMapLayout> {
    let scales = MapScales::fit_lines(&map.lines, options)?;
    let ctx = LayoutCtx {
        scales: &scales,
        multiplier: options.line_width_multiplier,
        tick_ratio: options.line_width_tick_ratio,
    };

    let river = map.river.as_ref().map(|river| LayoutRiver {
        d: line_path(
            river,
            &scales.x,
            &scales.y,
            scales.line_width,
            ctx.tick_ratio,
        ),
        stroke: RIVER_STROKE.to_string(),
        stroke_width: scales.line_width * 1.8,
    });

    let lines = map
        .lines
        .iter()
        .map(|line| LayoutLine {
            name: line.name.clone(),
            label: line.label.clone(),
            color: line.color.clone(),
            d: line_path(
                line,
                &scales.x,
                &scales.y,
                scales.line_width,
                ctx.tick_ratio,
            ),
            stroke_width: if line.highlighted {
                scales.line_width * 1.3
            } else {
                scales.line_width
            },
            highlighted: line.highlighted,
        })
        .collect::<Vec<_>>();

    let interchanges = map
        .interchanges()
        .map(|s| ctx.interchange(s))
        .collect::<Vec<_>>();

    let stations = map
        .normal_stations()
        .flat_map(|s| ctx.ticks(s))
        .collect::<Vec<_>>();

    let labels = map.stations.iter().map(|s| ctx.label(s)).collect::<Vec<_>>();

    tracing::debug!(
        lines = lines.len(),
        interchanges = interchanges.len(),
        ticks = stations.len(),
        labels = labels.len(),
        unit_length = scales.unit_length,
        "laid out map"
    );

    Ok(TubeMapLayout {
        width: options.width,
        height: options.height,
        unit_length: scales.unit_length,
        line_width: scales.line_width,
        river,
        lines,
        interchanges,
        stations,
        labels,
    })
}

struct LayoutCtx<'a> {
    scales: &'a MapScales,
    multiplier: f64,
    tick_ratio: f64,
}

impl LayoutCtx<'_> {
    fn to_display(&self, p: Point) -> LayoutPoint {
        LayoutPoint {
            x: self.scales.x.scale(p.x),
            y: self.scales.y.scale(p.y),
        }
    }

    fn interchange(&self, station: &Station) -> LayoutInterchange {
        let m = self.multiplier;
        let lw = self.scales.line_width;
        let shift = interchange_shift(station.markers.iter().map(|mk| (mk.dir, mk.shift_normal)));
        let base = station
            .markers
            .first()
            .map(|mk| mk.shift)
            .unwrap_or(vector(0.0, 0.0));

        LayoutInterchange {
            name: station.name.clone(),
            translate: self.to_display(station.coords + (shift + base) * m),
            radius: lw * 1.25,
            stroke_width: lw / 2.0,
            highlighted: station.highlighted,
        }
    }

    fn ticks(&self, station: &Station) -> Vec<LayoutStationTick> {
        let lw = self.scales.line_width;
        station
            .markers
            .iter()
            .map(|marker| {
                let [a, b] = tick_points(
                    station.coords,
                    marker,
                    station.label_pos,
                    self.multiplier,
                    self.tick_ratio,
                );
                LayoutStationTick {
                    name: station.name.clone(),
                    line: marker.line.clone(),
                    color: marker.color.clone(),
                    points: [self.to_display(a), self.to_display(b)],
                    stroke_width: lw / self.tick_ratio,
                }
            })
            .collect()
    }

    fn label(&self, station: &Station) -> LayoutLabel {
        let m = self.multiplier;
        let lw = self.scales.line_width;
        let lines = station
            .label
            .split('\n')
            .map(str::to_string)
            .collect::<Vec<_>>();
        let anchor = label_anchor(station.label_pos, lw, m, lines.len());

        let dir = station.dir.unit_vector();
        let shift_x = station.label_shift.x + station.label_shift_normal * dir.y;
        let shift_y = station.label_shift.y - station.label_shift_normal * dir.x;
        let at = self.to_display(point(
            station.coords.x + shift_x * m,
            station.coords.y + shift_y * m,
        ));

        let mut seen = FxHashSet::default();
        let classes = station
            .markers
            .iter()
            .filter(|mk| seen.insert(mk.line.as_str()))
            .map(|mk| mk.line.clone())
            .collect();

        LayoutLabel {
            name: station.name.clone(),
            lines,
            x: at.x + anchor.offset.x,
            y: at.y - anchor.offset.y,
            text_anchor: anchor.text_anchor,
            baseline: anchor.baseline,
            font_size: lw * 1.96,
            classes,
            highlighted: station.highlighted,
            closed: station.closed,
            hidden: station.hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Baseline, TextAnchor};
    use crate::Error;
    use tubemap_core::resolve_json;

    const MAP: &str = r##"{
        "stations": {
            "a": { "label": "Alpha" },
            "b": { "label": "Bravo\nJunction", "visited": true },
            "c": { "label": "Charlie", "closed": true }
        },
        "lines": [
            { "name": "red", "color": "#f00", "nodes": [
                { "coords": [0, 0], "name": "a", "labelPos": "S" },
                { "coords": [2, 0], "name": "b", "labelPos": "N", "marker": "interchange" },
                { "coords": [4, 0], "name": "c", "labelPos": "E" }
            ] },
            { "name": "blue", "color": "#00f", "highlighted": true, "nodes": [
                { "coords": [2, -2] },
                { "coords": [2, 0], "name": "b", "marker": "interchange" },
                { "coords": [2, 2] }
            ] }
        ],
        "river": { "name": "river", "nodes": [ { "coords": [-3, 1] }, { "coords": [7, 1] } ] }
    }"##;

    fn layout() -> TubeMapLayout {
        layout_map(&resolve_json(MAP).unwrap(), &LayoutOptions::default()).unwrap()
    }

    #[test]
    fn scales_ignore_the_river() {
        let l = layout();
        // Lines span 4x4 grid units, padded to 6x6; the 540 px height binds.
        assert!((l.unit_length - 90.0).abs() < 1e-9, "{}", l.unit_length);
        assert!((l.line_width - 72.0).abs() < 1e-9);
        let river = l.river.as_ref().unwrap();
        assert_eq!(river.stroke, "#CCECF4");
        assert!((river.stroke_width - 72.0 * 1.8).abs() < 1e-9);
    }

    #[test]
    fn highlighted_lines_are_thicker() {
        let l = layout();
        assert_eq!(l.lines[0].stroke_width, l.line_width);
        assert!((l.lines[1].stroke_width - l.line_width * 1.3).abs() < 1e-9);
        assert!(l.lines[1].highlighted);
    }

    #[test]
    fn interchange_sits_on_the_crossing() {
        let l = layout();
        assert_eq!(l.interchanges.len(), 1);
        let ic = &l.interchanges[0];
        assert_eq!(ic.name, "b");
        assert!(ic.highlighted);
        assert!((ic.radius - 90.0).abs() < 1e-9);
        assert!((ic.stroke_width - 36.0).abs() < 1e-9);

        let scales = MapScales::fit_lines(&resolve_json(MAP).unwrap().lines, &LayoutOptions::default())
            .unwrap();
        assert!((ic.translate.x - scales.x.scale(2.0)).abs() < 1e-9);
        assert!((ic.translate.y - scales.y.scale(0.0)).abs() < 1e-9);
    }

    #[test]
    fn interchange_moves_to_band_middle_plus_marker_shift() {
        let map = resolve_json(
            r##"{
            "stations": { "x": { "label": "X" } },
            "lines": [
                { "name": "red", "color": "#f00", "nodes": [
                    { "coords": [0, 0] },
                    { "coords": [1, 0], "name": "x", "labelPos": "N", "marker": "interchange",
                      "shiftCoords": [0.5, 0] },
                    { "coords": [2, 0] }
                ] },
                { "name": "blue", "color": "#00f", "shiftNormal": 2, "nodes": [
                    { "coords": [0, 0] },
                    { "coords": [1, 0], "name": "x", "marker": "interchange" },
                    { "coords": [2, 0] }
                ] }
            ]
        }"##,
        )
        .unwrap();
        let opts = LayoutOptions::default();
        let l = layout_map(&map, &opts).unwrap();
        let scales = MapScales::fit_lines(&map.lines, &opts).unwrap();
        let m = opts.line_width_multiplier;

        // Eastbound band at offsets 0 and 2 centers on offset 1, one line width south (-y);
        // the first marker's own shift adds half a line width east.
        let ic = &l.interchanges[0];
        assert!((ic.translate.x - scales.x.scale(1.0 + 0.5 * m)).abs() < 1e-9, "{ic:?}");
        assert!((ic.translate.y - scales.y.scale(-m)).abs() < 1e-9, "{ic:?}");
        assert!((ic.translate.y - scales.y.scale(0.0)).abs() > 1e-6);
    }

    #[test]
    fn ordinary_stations_get_one_tick_per_line() {
        let l = layout();
        let names = l.stations.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["a", "c"]);
        for t in &l.stations {
            assert_eq!(t.line, "red");
            assert!((t.stroke_width - 48.0).abs() < 1e-9);
        }
        // "a" is labelled south: the tick hangs below the line (larger display y).
        let a = &l.stations[0];
        assert!(a.points[1].y > a.points[0].y);
        assert!((a.points[0].x - a.points[1].x).abs() < 1e-9);
    }

    #[test]
    fn labels_carry_text_rows_and_flags() {
        let l = layout();
        assert_eq!(l.labels.len(), 3);
        let b = &l.labels[1];
        assert_eq!(b.lines, ["Bravo", "Junction"]);
        assert_eq!(b.text_anchor, TextAnchor::Middle);
        assert_eq!(b.baseline, Baseline::Baseline);
        assert_eq!(b.classes, ["red", "blue"]);
        assert!(b.highlighted);
        assert!((b.font_size - 72.0 * 1.96).abs() < 1e-9);

        let c = &l.labels[2];
        assert!(c.closed);
        assert_eq!(c.text_anchor, TextAnchor::Start);
        assert_eq!(c.baseline, Baseline::Middle);
    }

    #[test]
    fn label_offsets_follow_the_anchor_table() {
        let l = layout();
        let map = resolve_json(MAP).unwrap();
        let scales = MapScales::fit_lines(&map.lines, &LayoutOptions::default()).unwrap();
        let c = &l.labels[2];
        // East of the station by 1.8 line widths.
        assert!((c.x - (scales.x.scale(4.0) + 72.0 * 1.8)).abs() < 1e-9);
        assert!((c.y - scales.y.scale(0.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_map_cannot_be_fitted() {
        let map = resolve_json(r#"{ "stations": {}, "lines": [] }"#).unwrap();
        let err = layout_map(&map, &LayoutOptions::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyMap));
    }

    #[test]
    fn layout_is_repeatable() {
        assert_eq!(layout(), layout());
    }
}
