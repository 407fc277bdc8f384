//! Standalone SVG output for a [`TubeMapLayout`].
//!
//! Groups are written in paint order: river, lines, interchanges, stations, labels. Every
//! station, interchange and label group carries `id` = station key so a host page can bind
//! click handlers by id.

use crate::model::{LayoutInterchange, LayoutLabel, LayoutStationTick, TubeMapLayout};
use std::fmt::Write as _;

const FG_COLOR: &str = "#000000";
const BG_COLOR: &str = "#ffffff";
const LABEL_FILL: &str = "#10137E";

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Optional `id` for the root `<svg>` element.
    pub diagram_id: Option<String>,
    /// When false, the river group is omitted.
    pub include_river: bool,
    /// When false, the labels group is omitted.
    pub include_labels: bool,
    /// When true, embed a small `<style>` block (pointer cursor, unselectable labels).
    pub include_style: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            include_river: true,
            include_labels: true,
            include_style: true,
        }
    }
}

impl SvgRenderOptions {
    pub fn with_diagram_id(mut self, id: impl Into<String>) -> Self {
        self.diagram_id = Some(id.into());
        self
    }

    pub fn with_river(mut self, include: bool) -> Self {
        self.include_river = include;
        self
    }

    pub fn with_labels(mut self, include: bool) -> Self {
        self.include_labels = include;
        self
    }

    pub fn with_style(mut self, include: bool) -> Self {
        self.include_style = include;
        self
    }
}

pub fn render_svg(layout: &TubeMapLayout, options: &SvgRenderOptions) -> String {
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    if let Some(id) = options.diagram_id.as_deref() {
        let _ = write!(&mut out, r#" id="{}""#, escape_attr(id));
    }
    let _ = writeln!(
        &mut out,
        r#" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(layout.width),
        h = fmt(layout.height)
    );
    if options.include_style {
        out.push_str(
            r#"<style>
.interchanges g, .stations g, .labels g { cursor: pointer; }
.labels text { -webkit-user-select: none; user-select: none; }
</style>
"#,
        );
    }

    if options.include_river {
        if let Some(river) = &layout.river {
            let _ = writeln!(
                &mut out,
                r#"<g class="river"><path d="{}" stroke="{}" fill="none" stroke-width="{}" /></g>"#,
                escape_attr(&river.d),
                escape_attr(&river.stroke),
                fmt(river.stroke_width)
            );
        }
    }

    out.push_str(r#"<g class="lines">"#);
    for line in &layout.lines {
        let _ = write!(
            &mut out,
            r#"<path class="line" id="{}" d="{}" stroke="{}" fill="none" stroke-width="{}" />"#,
            escape_attr(&line.name),
            escape_attr(&line.d),
            escape_attr(&line.color),
            fmt(line.stroke_width)
        );
    }
    out.push_str("</g>\n");

    out.push_str(r#"<g class="interchanges">"#);
    for ic in &layout.interchanges {
        render_interchange(&mut out, ic);
    }
    out.push_str("</g>\n");

    out.push_str(r#"<g class="stations">"#);
    for ticks in layout.stations.chunk_by(|a, b| a.name == b.name) {
        render_station(&mut out, ticks);
    }
    out.push_str("</g>\n");

    if options.include_labels {
        out.push_str(r#"<g class="labels">"#);
        for label in &layout.labels {
            render_label(&mut out, label);
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn render_interchange(out: &mut String, ic: &LayoutInterchange) {
    let (fill, stroke) = if ic.highlighted {
        (FG_COLOR, BG_COLOR)
    } else {
        (BG_COLOR, FG_COLOR)
    };
    let _ = write!(
        out,
        r#"<g id="{}"><circle class="interchange" r="{}" transform="translate({},{})" stroke-width="{}" fill="{}" stroke="{}" /></g>"#,
        escape_attr(&ic.name),
        fmt(ic.radius),
        fmt(ic.translate.x),
        fmt(ic.translate.y),
        fmt(ic.stroke_width),
        fill,
        stroke
    );
}

/// `ticks` all belong to one station.
fn render_station(out: &mut String, ticks: &[LayoutStationTick]) {
    let Some(first) = ticks.first() else {
        return;
    };
    let _ = write!(out, r#"<g id="{}">"#, escape_attr(&first.name));
    for t in ticks {
        let [a, b] = t.points;
        let _ = write!(
            out,
            r#"<path class="station {}" d="M{},{}L{},{}" stroke="{}" stroke-width="{}" fill="none" />"#,
            escape_attr(&t.line),
            fmt(a.x),
            fmt(a.y),
            fmt(b.x),
            fmt(b.y),
            escape_attr(&t.color),
            fmt(t.stroke_width)
        );
    }
    out.push_str("</g>");
}

fn render_label(out: &mut String, label: &LayoutLabel) {
    let mut classes = label.classes.join(" ");
    if label.highlighted {
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str("highlighted");
    }

    let mut style = format!("font-size: {}px;", fmt(label.font_size));
    if label.closed {
        style.push_str(" text-decoration: line-through;");
    }
    if label.hidden {
        style.push_str(" display: none;");
    }

    let x = fmt(label.x);
    let y = fmt(label.y);
    let _ = write!(
        out,
        r#"<g class="label" id="{}"><text class="{}" fill="{}" x="{}" y="{}" text-anchor="{}" style="{}">"#,
        escape_attr(&label.name),
        escape_attr(&classes),
        LABEL_FILL,
        x,
        y,
        label.text_anchor.as_str(),
        style
    );
    for (i, row) in label.lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{}" y="{}" dy="{}em" dominant-baseline="{}">{}</tspan>"#,
            x,
            y,
            fmt(i as f64 * 1.1),
            label.baseline.as_str(),
            escape_xml(row)
        );
    }
    out.push_str("</text></g>");
}

/// Round-trippable number formatting for SVG attributes, without `-0` or float noise.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Baseline, TextAnchor};
    use crate::model::{LayoutLine, LayoutPoint, LayoutRiver};

    #[test]
    fn fmt_suppresses_noise_and_negative_zero() {
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1e-12), "0");
        assert_eq!(fmt(2.0000000001), "2");
        assert_eq!(fmt(12.5), "12.5");
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn escape_xml_covers_markup_characters() {
        assert_eq!(escape_xml(r#"A & B <"x">'"#), "A &amp; B &lt;&quot;x&quot;&gt;&#39;");
    }

    fn sample() -> TubeMapLayout {
        let p = |x: f64, y: f64| LayoutPoint { x, y };
        TubeMapLayout {
            width: 200.0,
            height: 100.0,
            unit_length: 10.0,
            line_width: 8.0,
            river: Some(LayoutRiver {
                d: "M0,50L200,50".to_string(),
                stroke: "#CCECF4".to_string(),
                stroke_width: 14.4,
            }),
            lines: vec![LayoutLine {
                name: "red".to_string(),
                label: None,
                color: "#f00".to_string(),
                d: "M10,10L90,10".to_string(),
                stroke_width: 8.0,
                highlighted: false,
            }],
            interchanges: vec![LayoutInterchange {
                name: "bank".to_string(),
                translate: p(50.0, 10.0),
                radius: 10.0,
                stroke_width: 4.0,
                highlighted: true,
            }],
            stations: vec![
                LayoutStationTick {
                    name: "oval".to_string(),
                    line: "red".to_string(),
                    color: "#f00".to_string(),
                    points: [p(20.0, 6.0), p(20.0, 0.0)],
                    stroke_width: 5.0,
                },
                LayoutStationTick {
                    name: "oval".to_string(),
                    line: "blue".to_string(),
                    color: "#00f".to_string(),
                    points: [p(21.0, 6.0), p(21.0, 0.0)],
                    stroke_width: 5.0,
                },
            ],
            labels: vec![LayoutLabel {
                name: "bank".to_string(),
                lines: vec!["Bank &".to_string(), "Monument".to_string()],
                x: 50.0,
                y: -4.4,
                text_anchor: TextAnchor::Middle,
                baseline: Baseline::Baseline,
                font_size: 15.68,
                classes: vec!["red".to_string()],
                highlighted: true,
                closed: true,
                hidden: false,
            }],
        }
    }

    #[test]
    fn groups_are_written_in_paint_order() {
        let svg = render_svg(&sample(), &SvgRenderOptions::default());
        let order = ["river", "lines", "interchanges", "stations", "labels"]
            .map(|g| svg.find(&format!(r#"<g class="{g}">"#)).unwrap());
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{svg}");
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn highlighted_interchange_swaps_fill_and_stroke() {
        let svg = render_svg(&sample(), &SvgRenderOptions::default());
        assert!(svg.contains(
            r##"<g id="bank"><circle class="interchange" r="10" transform="translate(50,10)" stroke-width="4" fill="#000000" stroke="#ffffff" /></g>"##
        ));
    }

    #[test]
    fn ticks_of_one_station_share_a_group() {
        let svg = render_svg(&sample(), &SvgRenderOptions::default());
        assert_eq!(svg.matches(r#"<g id="oval">"#).count(), 1);
        assert!(svg.contains(r#"<path class="station red" d="M20,6L20,0""#));
        assert!(svg.contains(r#"<path class="station blue" d="M21,6L21,0""#));
    }

    #[test]
    fn labels_render_rows_and_styles() {
        let svg = render_svg(&sample(), &SvgRenderOptions::default());
        assert!(svg.contains(r#"class="red highlighted""#));
        assert!(svg.contains("text-decoration: line-through;"));
        assert!(!svg.contains("display: none"));
        assert!(svg.contains(
            r#"<tspan x="50" y="-4.4" dy="0em" dominant-baseline="baseline">Bank &amp;</tspan>"#
        ));
        assert!(svg.contains(r#"dy="1.1em" dominant-baseline="baseline">Monument</tspan>"#));
    }

    #[test]
    fn options_drop_optional_groups() {
        let opts = SvgRenderOptions::default()
            .with_diagram_id("map<1>")
            .with_river(false)
            .with_labels(false)
            .with_style(false);
        let svg = render_svg(&sample(), &opts);
        assert!(svg.contains(r#"id="map&lt;1&gt;""#));
        assert!(!svg.contains(r#"<g class="river">"#));
        assert!(!svg.contains(r#"<g class="labels">"#));
        assert!(!svg.contains("<style>"));
    }
}
