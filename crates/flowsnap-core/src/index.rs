//! Alignment index: which entities share each rounded coordinate.

use std::collections::{BTreeMap, BTreeSet};

use kurbo::Point;

use crate::entity::{EntityGeometry, EntityId};
use crate::geometry::{CoordKey, x_stops, y_stops};

/// Rounded coordinate to the ids of every entity producing it.
pub type CoordinateMap = BTreeMap<CoordKey, BTreeSet<EntityId>>;

/// Per-axis coordinate maps for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentIndex {
    /// Y coordinates (tops, centers, bottoms).
    pub horizontal: CoordinateMap,
    /// X coordinates (lefts, centers, rights).
    pub vertical: CoordinateMap,
    /// Center of the dragged entity when it is a dot.
    pub dragged_dot_center: Option<Point>,
}

impl AlignmentIndex {
    /// Build the index using the dragged entity's current position.
    pub fn build(entities: &[EntityGeometry], dragged_id: &EntityId) -> Self {
        Self::build_at(entities, dragged_id, None)
    }

    /// Build the index, placing the dragged entity at `candidate` when given.
    ///
    /// The dragged entity never enters the maps; its position only matters
    /// for the out-of-band dot center.
    pub fn build_at(
        entities: &[EntityGeometry],
        dragged_id: &EntityId,
        candidate: Option<Point>,
    ) -> Self {
        let mut index = Self::default();

        for entity in entities {
            if &entity.id == dragged_id {
                if entity.is_dot() {
                    index.dragged_dot_center = candidate
                        .or(entity.position)
                        .map(|origin| entity.bounds_at(origin).center());
                }
                continue;
            }

            let Some(bounds) = entity.bounds() else {
                log::trace!("Skipping {}: no resolvable position", entity.id);
                continue;
            };
            if entity.is_degenerate() {
                log::trace!("Skipping {}: zero-area regular entity", entity.id);
                continue;
            }

            if entity.is_dot() {
                let center = bounds.center();
                insert(&mut index.vertical, center.x, &entity.id);
                insert(&mut index.horizontal, center.y, &entity.id);
                continue;
            }

            for x in x_stops(bounds) {
                insert(&mut index.vertical, x, &entity.id);
            }
            for y in y_stops(bounds) {
                insert(&mut index.horizontal, y, &entity.id);
            }
        }

        index
    }

    /// Check if neither map holds any coordinate.
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    /// Entities sharing a Y coordinate.
    pub fn horizontal_sharers(&self, y: f64) -> Option<&BTreeSet<EntityId>> {
        self.horizontal.get(&CoordKey::new(y))
    }

    /// Entities sharing an X coordinate.
    pub fn vertical_sharers(&self, x: f64) -> Option<&BTreeSet<EntityId>> {
        self.vertical.get(&CoordKey::new(x))
    }
}

fn insert(map: &mut CoordinateMap, value: f64, id: &EntityId) {
    map.entry(CoordKey::new(value)).or_default().insert(id.clone());
}

/// Build the alignment index for a drag of `dragged_id`.
pub fn build_alignment_index(entities: &[EntityGeometry], dragged_id: &EntityId) -> AlignmentIndex {
    AlignmentIndex::build(entities, dragged_id)
}
