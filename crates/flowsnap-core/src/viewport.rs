//! Host viewport (pan/zoom) transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// The host canvas's pan/zoom state.
///
/// Maps world to screen as `screen = world * zoom + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal translation in screen pixels.
    pub x: f64,
    /// Vertical translation in screen pixels.
    pub y: f64,
    /// Zoom factor (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// Current translation offset (pan).
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Zoom factor; unusable values fall back to 1.0.
    pub fn effective_zoom(&self) -> f64 {
        if self.zoom.is_finite() && self.zoom > 0.0 { self.zoom } else { 1.0 }
    }

    /// World to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset()) * Affine::scale(self.effective_zoom())
    }

    /// Screen to world transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.effective_zoom()) * Affine::translate(-self.offset())
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// The world-space area visible on a canvas of `canvas_size` screen pixels.
    pub fn visible_world_rect(&self, canvas_size: Size) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(canvas_size.width, canvas_size.height));
        Rect::from_points(top_left, bottom_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_viewport() {
        let viewport = Viewport::default();
        let screen = Point::new(100.0, 200.0);
        let world = viewport.screen_to_world(screen);
        assert!((world.x - screen.x).abs() < f64::EPSILON);
        assert!((world.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_pan_and_zoom() {
        let viewport = Viewport::new(50.0, 100.0, 2.0);
        let world = viewport.screen_to_world(Point::new(150.0, 300.0));
        assert!((world.x - 50.0).abs() < 1e-10);
        assert!((world.y - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let viewport = Viewport::new(30.0, -20.0, 1.5);
        let original = Point::new(123.0, 456.0);
        let back = viewport.world_to_screen(viewport.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_visible_world_rect() {
        let viewport = Viewport::new(-100.0, 50.0, 0.5);
        let rect = viewport.visible_world_rect(Size::new(800.0, 600.0));
        assert!((rect.x0 - 200.0).abs() < 1e-10);
        assert!((rect.y0 + 100.0).abs() < 1e-10);
        assert!((rect.x1 - 1800.0).abs() < 1e-10);
        assert!((rect.y1 - 1100.0).abs() < 1e-10);
    }

    #[test]
    fn test_bad_zoom_falls_back() {
        assert!((Viewport::new(0.0, 0.0, 0.0).effective_zoom() - 1.0).abs() < f64::EPSILON);
        assert!((Viewport::new(0.0, 0.0, f64::NAN).effective_zoom() - 1.0).abs() < f64::EPSILON);
        assert!((Viewport::new(0.0, 0.0, 3.0).effective_zoom() - 3.0).abs() < f64::EPSILON);
    }
}
