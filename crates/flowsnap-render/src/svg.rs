//! SVG overlay backend.
//!
//! Draws the visible part of the world: entity outlines, the dragged entity
//! highlighted, and the guide lines on top. Dots are drawn as circles.

use std::fmt::Write;

use flowsnap_core::guides::Orientation;
use kurbo::Rect;
use peniko::Color;

use crate::renderer::{GuideRenderContext, GuideRenderer, RenderResult, RendererError, guide_path};

/// Renders a frame into an SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document built by the last `build_scene` call.
    pub fn svg(&self) -> &str {
        &self.document
    }

    /// Consume the renderer, returning the document.
    pub fn into_svg(self) -> String {
        self.document
    }

    fn write_scene(&self, ctx: &GuideRenderContext, out: &mut String) -> std::fmt::Result {
        let zoom = ctx.viewport.effective_zoom();
        let visible = ctx.viewport.visible_world_rect(ctx.canvas_size);
        let stroke = ctx.style.world_stroke_width(zoom);

        writeln!(
            out,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
                r#"width="{}" height="{}" viewBox="{} {} {} {}">"#
            ),
            ctx.canvas_size.width,
            ctx.canvas_size.height,
            visible.x0,
            visible.y0,
            visible.width(),
            visible.height()
        )?;
        writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            visible.x0,
            visible.y0,
            visible.width(),
            visible.height(),
            svg_color(self.background_color(ctx))
        )?;

        for entity in ctx.entities {
            let Some(bounds) = entity.bounds() else {
                continue;
            };
            let color = if ctx.dragged_id == Some(&entity.id) {
                ctx.style.dragged_color
            } else {
                ctx.style.entity_color
            };
            write_entity(out, bounds, entity.is_dot(), color, stroke)?;
        }

        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let path = guide_path(ctx.guides, orientation);
            if path.elements().is_empty() {
                continue;
            }
            writeln!(
                out,
                concat!(
                    r#"  <path d="{}" fill="none" "#,
                    r#"stroke="{}" stroke-opacity="{:.3}" stroke-width="{}"/>"#
                ),
                path.to_svg(),
                svg_color(ctx.style.guide_color),
                alpha(ctx.style.guide_color),
                stroke
            )?;
        }

        writeln!(out, "</svg>")
    }
}

impl GuideRenderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &GuideRenderContext) -> RenderResult<()> {
        let size = ctx.canvas_size;
        let finite = size.width.is_finite() && size.height.is_finite();
        if !finite || size.width <= 0.0 || size.height <= 0.0 {
            return Err(RendererError::InvalidCanvas {
                width: size.width,
                height: size.height,
            });
        }

        let mut document = String::new();
        self.write_scene(ctx, &mut document)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;
        log::debug!("Rendered SVG overlay with {} guide lines", ctx.guides.len());
        self.document = document;
        Ok(())
    }
}

fn write_entity(
    out: &mut String,
    bounds: Rect,
    is_dot: bool,
    color: Color,
    stroke: f64,
) -> std::fmt::Result {
    if is_dot {
        let center = bounds.center();
        writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            center.x,
            center.y,
            bounds.width() / 2.0,
            svg_color(color)
        )
    } else {
        writeln!(
            out,
            concat!(
                r#"  <rect x="{}" y="{}" width="{}" height="{}" "#,
                r#"fill="none" stroke="{}" stroke-width="{}"/>"#
            ),
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height(),
            svg_color(color),
            stroke
        )
    }
}

fn svg_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn alpha(color: Color) -> f64 {
    color.to_rgba8().a as f64 / 255.0
}
