#![forbid(unsafe_code)]

//! `tubemap` is a headless geometry engine for 45-degree schematic transit maps.
//!
//! A JSON map description (lines of grid nodes, stations, an optional river) is resolved into
//! compass bearings, fitted to a viewport and turned into SVG path data, interchange glyphs,
//! station ticks and label anchors.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`tubemap::render`)

pub use tubemap_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use tubemap_render::model::{
        LayoutInterchange, LayoutLabel, LayoutLine, LayoutPoint, LayoutRiver, LayoutStationTick,
        TubeMapLayout,
    };
    pub use tubemap_render::svg::{SvgRenderOptions, render_svg};
    pub use tubemap_render::{LayoutOptions, Margin, layout_map};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Resolve(#[from] tubemap_core::Error),
        #[error(transparent)]
        Render(#[from] tubemap_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several maps can be
    /// inlined into one page.
    ///
    /// Unsupported characters become `-`, and the id is prefixed with `m-` unless it starts
    /// with an ASCII letter.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "m-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "m-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "m" {
            return "m-untitled".to_string();
        }
        out.to_string()
    }

    /// Parses, resolves and lays out a JSON map description.
    pub fn layout_map_sync(text: &str, layout_options: &LayoutOptions) -> Result<TubeMapLayout> {
        let map = tubemap_core::resolve_json(text)?;
        Ok(layout_map(&map, layout_options)?)
    }

    /// JSON map description straight to an SVG document.
    pub fn render_svg_sync(
        text: &str,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_map_sync(text, layout_options)?;
        Ok(render_svg(&layout, svg_options))
    }

    /// Bundles layout and SVG options for hosts that render many maps the same way.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
            self.layout = layout;
            self
        }

        pub fn resolve_sync(&self, text: &str) -> Result<tubemap_core::ResolvedMap> {
            Ok(tubemap_core::resolve_json(text)?)
        }

        pub fn layout_map_sync(&self, text: &str) -> Result<TubeMapLayout> {
            layout_map_sync(text, &self.layout)
        }

        pub fn render_svg_sync(&self, text: &str) -> Result<String> {
            render_svg_sync(text, &self.layout, &self.svg)
        }

        pub fn render_svg_sync_with_diagram_id(&self, text: &str, diagram_id: &str) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            render_svg_sync(text, &self.layout, &svg)
        }
    }

}
