//! FlowSnap Render Library
//!
//! Renderer abstraction for alignment guide lines, plus an SVG backend.

mod renderer;
mod svg;

pub use renderer::{
    GuideRenderContext, GuideRenderer, GuideStyle, RenderResult, RendererError, guide_path,
};
pub use svg::SvgRenderer;
