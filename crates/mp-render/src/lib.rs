//! # mp-render
//!
//! Renders a [`mp_resolution::ResolutionArtifact`] to SVG, and converts the
//! SVG to PNG (resvg) or PDF (svg2pdf). Layout, themes and drawing
//! primitives live in the submodules; the public surface is the three
//! `render_*` functions.

pub mod canvas;
pub mod color;
pub mod config;
pub mod header;
pub mod layout;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

mod output;

use std::path::Path;

use mp_resolution::ResolutionArtifact;
use thiserror::Error;

use config::VizConfig;

/// Rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

/// Result alias for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Render a resolution artifact to an SVG string.
pub fn render_svg(artifact: &ResolutionArtifact, config: &VizConfig) -> Result<String> {
    plots::resolution::render(artifact, config)
}

/// Render a resolution artifact to bytes in `format` ("svg", "png", "pdf").
pub fn render_to_bytes(
    artifact: &ResolutionArtifact,
    format: &str,
    config: &VizConfig,
) -> Result<Vec<u8>> {
    let svg = render_svg(artifact, config)?;
    match format {
        "svg" => Ok(svg.into_bytes()),
        "png" => output::png::svg_to_png(&svg, config.output.dpi),
        "pdf" => output::pdf::svg_to_pdf(&svg),
        other => Err(RenderError::UnknownFormat(other.to_string())),
    }
}

/// Render to a file, inferring the format from the extension. An existing
/// file of the same name is overwritten.
pub fn render_to_file(
    artifact: &ResolutionArtifact,
    path: &Path,
    config: &VizConfig,
) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("svg");
    let bytes = render_to_bytes(artifact, ext, config)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
