//! FlowSnap Core Library
//!
//! Helper-line alignment for flow diagram editors: given the entities of a
//! diagram and the one being dragged, compute a snapped position for the
//! dragged entity and the guide lines to draw. Everything is recomputed from
//! a read-only snapshot on every pointer event; nothing is cached.

pub mod config;
pub mod drag;
pub mod entity;
pub mod geometry;
pub mod guides;
pub mod index;
pub mod snap;
pub mod viewport;

pub use config::{ConfigError, SnapConfig};
pub use drag::{DragFrame, DragSession};
pub use entity::{
    EntityGeometry, EntityId, EntityKind, EntitySnapshot, NodeInternals, NodeRecord, merge_sources,
};
pub use guides::{GuideLines, Line, Orientation, extract_guide_lines};
pub use index::{AlignmentIndex, build_alignment_index};
pub use snap::{
    SnapMode, SnapResult, resolve_snap, resolve_snap_detailed, snap_to_entities, snap_to_grid,
};
pub use viewport::Viewport;
