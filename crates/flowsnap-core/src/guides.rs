//! Guide lines drawn across the canvas while a drag is in progress.
//!
//! These are looser than the snap decision: every coordinate shared by at
//! least two entities gets a line, not just the best match per axis. Lines
//! extend `guide_span` world units beyond the visible area so they appear to
//! run off-screen at any pan position.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::geometry::{CoordKey, round_coord};
use crate::index::{AlignmentIndex, CoordinateMap};
use crate::viewport::Viewport;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Constant Y, spanning X.
    Horizontal,
    /// Constant X, spanning Y.
    Vertical,
}

/// One guide line in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Y for horizontal lines, X for vertical lines.
    pub coordinate: f64,
    pub span_start: f64,
    pub span_end: f64,
}

impl Line {
    /// Segment endpoints for drawing.
    pub fn to_kurbo(&self, orientation: Orientation) -> kurbo::Line {
        match orientation {
            Orientation::Horizontal => kurbo::Line::new(
                Point::new(self.span_start, self.coordinate),
                Point::new(self.span_end, self.coordinate),
            ),
            Orientation::Vertical => kurbo::Line::new(
                Point::new(self.coordinate, self.span_start),
                Point::new(self.coordinate, self.span_end),
            ),
        }
    }
}

/// Guide lines for one frame, each list sorted by coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideLines {
    pub horizontal: Vec<Line>,
    pub vertical: Vec<Line>,
}

impl GuideLines {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    /// All lines with their orientation.
    pub fn iter(&self) -> impl Iterator<Item = (Orientation, &Line)> {
        self.horizontal
            .iter()
            .map(|line| (Orientation::Horizontal, line))
            .chain(self.vertical.iter().map(|line| (Orientation::Vertical, line)))
    }
}

/// Extract the guide lines to draw for the current frame.
pub fn extract_guide_lines(
    index: &AlignmentIndex,
    dragged_id: &EntityId,
    viewport: &Viewport,
    canvas_size: Size,
    guide_span: f64,
) -> GuideLines {
    let visible = viewport.visible_world_rect(canvas_size);
    let (x_start, x_end) = (visible.x0 - guide_span, visible.x1 + guide_span);
    let (y_start, y_end) = (visible.y0 - guide_span, visible.y1 + guide_span);

    let mut horizontal = shared_lines(&index.horizontal, dragged_id, x_start, x_end);
    let mut vertical = shared_lines(&index.vertical, dragged_id, y_start, y_end);

    // A lone dragged dot has no sharing group, so its center is drawn directly
    if let Some(center) = index.dragged_dot_center {
        inject(&mut horizontal, center.y, x_start, x_end);
        inject(&mut vertical, center.x, y_start, y_end);
    }

    GuideLines { horizontal, vertical }
}

/// Lines for every coordinate shared by at least two entities.
fn shared_lines(
    map: &CoordinateMap,
    dragged_id: &EntityId,
    span_start: f64,
    span_end: f64,
) -> Vec<Line> {
    map.iter()
        .filter(|(_, ids)| ids.iter().filter(|id| *id != dragged_id).count() >= 2)
        .map(|(key, _)| Line {
            coordinate: key.value(),
            span_start,
            span_end,
        })
        .collect()
}

fn inject(lines: &mut Vec<Line>, coordinate: f64, span_start: f64, span_end: f64) {
    let key = CoordKey::new(coordinate);
    if lines.iter().any(|line| CoordKey::new(line.coordinate) == key) {
        return;
    }
    let position = lines.partition_point(|line| CoordKey::new(line.coordinate) < key);
    lines.insert(
        position,
        Line {
            coordinate: round_coord(coordinate),
            span_start,
            span_end,
        },
    );
}
