//! Renderer trait abstraction.

use flowsnap_core::entity::{EntityGeometry, EntityId};
use flowsnap_core::guides::{GuideLines, Orientation};
use flowsnap_core::viewport::Viewport;
use kurbo::{BezPath, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Visual style of guide lines and entity outlines.
#[derive(Debug, Clone, Copy)]
pub struct GuideStyle {
    /// Guide line color.
    pub guide_color: Color,
    /// Guide stroke width in screen pixels.
    pub guide_width: f64,
    /// Outline color of entities.
    pub entity_color: Color,
    /// Outline color of the dragged entity.
    pub dragged_color: Color,
    /// Background color.
    pub background_color: Color,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            guide_color: Color::from_rgba8(236, 72, 153, 180), // Pink
            guide_width: 1.0,
            entity_color: Color::from_rgba8(71, 85, 105, 255),
            dragged_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            background_color: Color::from_rgba8(250, 250, 250, 255),
        }
    }
}

impl GuideStyle {
    /// Stroke width in world units for a constant on-screen width at `zoom`.
    pub fn world_stroke_width(&self, zoom: f64) -> f64 {
        self.guide_width / zoom
    }
}

/// Context for a single render frame.
pub struct GuideRenderContext<'a> {
    /// Entities of the frame.
    pub entities: &'a [EntityGeometry],
    /// Guide lines to draw.
    pub guides: &'a GuideLines,
    /// Host viewport.
    pub viewport: Viewport,
    /// Canvas size in screen pixels.
    pub canvas_size: Size,
    /// Entity being dragged (highlighted).
    pub dragged_id: Option<&'a EntityId>,
    pub style: GuideStyle,
}

impl<'a> GuideRenderContext<'a> {
    /// Create a new render context.
    pub fn new(entities: &'a [EntityGeometry], guides: &'a GuideLines, canvas_size: Size) -> Self {
        Self {
            entities,
            guides,
            viewport: Viewport::default(),
            canvas_size,
            dragged_id: None,
            style: GuideStyle::default(),
        }
    }

    /// Set the host viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the dragged entity to highlight.
    pub fn with_dragged(mut self, dragged_id: Option<&'a EntityId>) -> Self {
        self.dragged_id = dragged_id;
        self
    }

    /// Set the visual style.
    pub fn with_style(mut self, style: GuideStyle) -> Self {
        self.style = style;
        self
    }
}

/// Trait for guide rendering backends.
pub trait GuideRenderer {
    /// Build the drawing for a frame.
    fn build_scene(&mut self, ctx: &GuideRenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &GuideRenderContext) -> Color {
        ctx.style.background_color
    }
}

/// One path holding every guide line of the given orientation.
pub fn guide_path(guides: &GuideLines, orientation: Orientation) -> BezPath {
    let mut path = BezPath::new();
    for (line_orientation, line) in guides.iter() {
        if line_orientation != orientation {
            continue;
        }
        let segment = line.to_kurbo(orientation);
        path.move_to(segment.p0);
        path.line_to(segment.p1);
    }
    path
}
