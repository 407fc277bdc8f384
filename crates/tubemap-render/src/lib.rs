#![forbid(unsafe_code)]

//! Headless layout for tube maps: resolved grid geometry in, display geometry (and SVG) out.

pub mod anchor;
pub mod interchange;
pub mod layout;
pub mod model;
pub mod options;
pub mod path;
pub mod scale;
pub mod svg;
pub mod transform;

pub use layout::layout_map;
pub use model::TubeMapLayout;
pub use options::{LayoutOptions, Margin};
pub use svg::{SvgRenderOptions, render_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] tubemap_core::Error),
    #[error("map has no line nodes to fit a viewport to")]
    EmptyMap,
    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },
    #[error("layout options JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses, resolves and lays out a JSON map description.
pub fn layout_json(text: &str, options: &LayoutOptions) -> Result<TubeMapLayout> {
    let map = tubemap_core::resolve_json(text)?;
    layout_map(&map, options)
}
