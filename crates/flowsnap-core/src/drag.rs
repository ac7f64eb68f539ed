//! Per-drag driver tying the index, the resolver and the guide extractor together.

use kurbo::{Point, Size, Vec2};

use crate::config::SnapConfig;
use crate::entity::{EntityGeometry, EntityId};
use crate::guides::{GuideLines, extract_guide_lines};
use crate::index::AlignmentIndex;
use crate::snap::{SnapResult, resolve_snap_detailed};
use crate::viewport::Viewport;

/// Output of one pointer-move frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DragFrame {
    /// Corrected position for the dragged entity.
    pub snap: SnapResult,
    /// Guide lines to draw for this frame.
    pub guides: GuideLines,
}

impl DragFrame {
    pub fn position(&self) -> Point {
        self.snap.point
    }
}

/// State of an active pointer drag of a single entity.
///
/// Holds nothing that needs teardown: dropping the session cancels the drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    dragged_id: EntityId,
    /// Position of the entity when the drag started.
    start_point: Point,
    /// Last corrected position.
    current_point: Point,
    config: SnapConfig,
}

impl DragSession {
    /// Start dragging `dragged_id` from `start_point`.
    pub fn begin(dragged_id: impl Into<EntityId>, start_point: Point, config: SnapConfig) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            start_point,
            current_point: start_point,
            config,
        }
    }

    pub fn dragged_id(&self) -> &EntityId {
        &self.dragged_id
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn current_point(&self) -> Point {
        self.current_point
    }

    /// Corrected displacement since the drag started.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Handle a pointer move to `candidate`.
    ///
    /// The index is rebuilt before the resolver runs, and both finish before
    /// returning, so the frame's guides and position always agree.
    pub fn pointer_move(
        &mut self,
        entities: &[EntityGeometry],
        candidate: Point,
        viewport: &Viewport,
        canvas_size: Size,
    ) -> DragFrame {
        let index = AlignmentIndex::build_at(entities, &self.dragged_id, Some(candidate));
        let snap = resolve_snap_detailed(entities, &self.dragged_id, candidate, &self.config);
        let guides = extract_guide_lines(
            &index,
            &self.dragged_id,
            viewport,
            canvas_size,
            self.config.guide_span,
        );

        self.current_point = snap.point;
        DragFrame { snap, guides }
    }

    /// Handle the pointer release at `candidate`, fixing the final rest position.
    pub fn pointer_up(mut self, entities: &[EntityGeometry], candidate: Point) -> SnapResult {
        let snap = resolve_snap_detailed(entities, &self.dragged_id, candidate, &self.config);
        self.current_point = snap.point;
        log::debug!(
            "Drag of {} ended at ({}, {}), moved by ({}, {})",
            self.dragged_id,
            snap.point.x,
            snap.point.y,
            self.delta().x,
            self.delta().y
        );
        snap
    }
}
