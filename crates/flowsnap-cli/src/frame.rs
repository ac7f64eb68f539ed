//! Frame input and output documents.

use flowsnap_core::guides::GuideLines;
use flowsnap_core::{
    DragSession, EntityGeometry, EntityId, EntitySnapshot, NodeRecord, SnapConfig, SnapResult,
    Viewport,
};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Default canvas size when the frame does not give one.
pub const DEFAULT_CANVAS: Size = Size::new(1280.0, 720.0);

fn default_canvas() -> Size {
    DEFAULT_CANVAS
}

/// One drag frame as handed over by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInput {
    /// Declared (pre-layout) node list.
    #[serde(default)]
    pub declared: Vec<NodeRecord>,
    /// Resolved (post-layout) node lookup; wins over `declared` per id.
    #[serde(default)]
    pub resolved: Vec<NodeRecord>,
    pub dragged_id: EntityId,
    /// Position proposed by the pointer before snapping.
    pub candidate: Point,
    /// Position of the dragged node when the drag started.
    #[serde(default)]
    pub start: Option<Point>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default = "default_canvas")]
    pub canvas: Size,
}

/// Result of processing a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutput {
    pub position: Point,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub guides: GuideLines,
}

impl FrameOutput {
    fn new(snap: SnapResult, guides: GuideLines) -> Self {
        Self {
            position: snap.point,
            snapped_x: snap.snapped_x,
            snapped_y: snap.snapped_y,
            guides,
        }
    }
}

impl FrameInput {
    /// Merge and resolve the node lists.
    pub fn snapshot(&self, config: &SnapConfig) -> EntitySnapshot {
        EntitySnapshot::from_sources(&self.declared, &self.resolved, config)
    }

    /// Run the frame through a drag session.
    ///
    /// A release frame applies the final snap and yields no guides.
    pub fn process(
        &self,
        snapshot: &EntitySnapshot,
        config: &SnapConfig,
        release: bool,
    ) -> FrameOutput {
        let start = self
            .start
            .or_else(|| snapshot.get(&self.dragged_id).and_then(|entity| entity.position))
            .unwrap_or(self.candidate);
        let mut session = DragSession::begin(self.dragged_id.clone(), start, config.clone());

        if release {
            let snap = session.pointer_up(snapshot, self.candidate);
            return FrameOutput::new(snap, GuideLines::default());
        }

        let frame = session.pointer_move(snapshot, self.candidate, &self.viewport, self.canvas);
        FrameOutput::new(frame.snap, frame.guides)
    }
}

/// Entities with the dragged one moved to its corrected position.
pub fn placed_entities(
    snapshot: &EntitySnapshot,
    dragged_id: &EntityId,
    position: Point,
) -> Vec<EntityGeometry> {
    snapshot
        .iter()
        .map(|entity| {
            let mut entity = entity.clone();
            if &entity.id == dragged_id {
                entity.position = Some(position);
            }
            entity
        })
        .collect()
}
