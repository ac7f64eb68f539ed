//! Geometry helpers shared by the alignment index and the snap resolver.

use kurbo::{Point, Rect, Size};

/// Scale used to round alignment coordinates to two decimal places.
const COORD_SCALE: f64 = 100.0;

/// Round a coordinate to two decimal places.
///
/// Applied before every map insertion and every comparison so that
/// floating-point jitter from layout and zoom does not split one alignment
/// into several.
pub fn round_coord(value: f64) -> f64 {
    (value * COORD_SCALE).round() / COORD_SCALE
}

/// A rounded coordinate usable as an ordered map key.
///
/// Stores the coordinate in hundredths of a unit, so two values that round
/// to the same two-decimal coordinate produce equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordKey(i64);

impl CoordKey {
    /// Key for an unrounded coordinate.
    pub fn new(value: f64) -> Self {
        Self((value * COORD_SCALE).round() as i64)
    }

    /// The rounded coordinate this key stands for.
    pub fn value(self) -> f64 {
        self.0 as f64 / COORD_SCALE
    }
}

/// Near edge, center and far edge of a box along the X axis.
pub fn x_stops(bounds: Rect) -> [f64; 3] {
    [bounds.x0, bounds.center().x, bounds.x1]
}

/// Near edge, center and far edge of a box along the Y axis.
pub fn y_stops(bounds: Rect) -> [f64; 3] {
    [bounds.y0, bounds.center().y, bounds.y1]
}

/// Offsets from the box origin to each of its stops, in `x_stops`/`y_stops` order.
pub fn stop_offsets(extent: f64) -> [f64; 3] {
    [0.0, extent / 2.0, extent]
}

/// Bounding box of an entity placed with its top-left corner at `origin`.
pub fn bounds_at(origin: Point, size: Size) -> Rect {
    Rect::from_origin_size(origin, size)
}

/// Clamp a reported extent to a usable, non-negative value.
pub(crate) fn sanitize_extent(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.max(0.0))
}
