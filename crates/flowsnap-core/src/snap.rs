//! Snap resolution for a dragged entity.
//!
//! Each axis is resolved independently: among all other entities, the
//! dragged entity's stop (near edge, center or far edge) closest to the
//! matching stop of another entity wins, provided the difference is below
//! the threshold. Dots only ever match by center.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::config::SnapConfig;
use crate::entity::{EntityGeometry, EntityId};
use crate::geometry::{round_coord, stop_offsets, x_stops, y_stops};

/// Snap mode for aligning a dragged entity to the grid or other entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// No snapping.
    None,
    /// Snap to grid intersections.
    Grid,
    /// Snap to other entities' edges and centers.
    #[default]
    Entities,
    /// Snap to entities, falling back to the grid per axis.
    All,
}

impl SnapMode {
    /// Check if grid snapping is enabled.
    pub fn snaps_to_grid(self) -> bool {
        matches!(self, SnapMode::Grid | SnapMode::All)
    }

    /// Check if entity snapping is enabled.
    pub fn snaps_to_entities(self) -> bool {
        matches!(self, SnapMode::Entities | SnapMode::All)
    }

    /// Check if any snapping is enabled.
    pub fn is_enabled(self) -> bool {
        self != SnapMode::None
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapResult {
    /// The corrected top-left position.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    let snapped_x = (point.x / grid_size).round() * grid_size;
    let snapped_y = (point.y / grid_size).round() * grid_size;

    SnapResult {
        point: Point::new(snapped_x, snapped_y),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Best match found so far on one axis.
struct AxisMatch {
    best_diff: f64,
    snapped: Option<f64>,
}

impl AxisMatch {
    fn new(threshold: f64) -> Self {
        Self {
            best_diff: threshold,
            snapped: None,
        }
    }

    /// Offer a pair of matching stops. `offset` is the distance from the
    /// dragged origin to its stop, so the snapped origin puts the stop on `other`.
    fn offer(&mut self, dragged: f64, other: f64, offset: f64) {
        let diff = (round_coord(dragged) - round_coord(other)).abs();
        // Strict comparison: ties keep the first entity seen.
        if diff < self.best_diff {
            self.best_diff = diff;
            self.snapped = Some(other - offset);
        }
    }

    fn resolve(&self, candidate: f64) -> f64 {
        self.snapped.unwrap_or(candidate)
    }
}

/// Snap the dragged entity's top-left position against the other entities.
///
/// Returns the candidate unchanged when the dragged entity is not part of
/// `entities`. `entities` is expected to hold one geometry per id, as an
/// [`EntitySnapshot`](crate::entity::EntitySnapshot) does.
pub fn snap_to_entities(
    entities: &[EntityGeometry],
    dragged_id: &EntityId,
    candidate: Point,
    threshold: f64,
) -> SnapResult {
    let Some(dragged) = entities.iter().find(|entity| &entity.id == dragged_id) else {
        log::debug!("Dragged entity {} not found, skipping snap", dragged_id);
        return SnapResult::none(candidate);
    };

    let dragged_box = dragged.bounds_at(candidate);
    let dragged_center = dragged_box.center();
    let x_offsets = stop_offsets(dragged_box.width());
    let y_offsets = stop_offsets(dragged_box.height());

    let mut best_x = AxisMatch::new(threshold);
    let mut best_y = AxisMatch::new(threshold);

    for other in entities.iter().filter(|entity| &entity.id != dragged_id) {
        let Some(other_box) = other.bounds() else {
            log::trace!("Skipping {}: no resolvable position", other.id);
            continue;
        };
        if other.is_degenerate() {
            continue;
        }

        if dragged.is_dot() || other.is_dot() {
            let other_center = other_box.center();
            best_x.offer(dragged_center.x, other_center.x, x_offsets[1]);
            best_y.offer(dragged_center.y, other_center.y, y_offsets[1]);
            continue;
        }

        // Like stops only: left to left, center to center, right to right
        let x_pairs = x_stops(dragged_box).into_iter().zip(x_stops(other_box));
        for ((dragged_x, other_x), offset) in x_pairs.zip(x_offsets) {
            best_x.offer(dragged_x, other_x, offset);
        }
        let y_pairs = y_stops(dragged_box).into_iter().zip(y_stops(other_box));
        for ((dragged_y, other_y), offset) in y_pairs.zip(y_offsets) {
            best_y.offer(dragged_y, other_y, offset);
        }
    }

    let result = SnapResult {
        point: Point::new(best_x.resolve(candidate.x), best_y.resolve(candidate.y)),
        snapped_x: best_x.snapped.is_some(),
        snapped_y: best_y.snapped.is_some(),
    };
    if result.is_snapped() {
        log::debug!(
            "Snapped {} from ({}, {}) to ({}, {})",
            dragged_id,
            candidate.x,
            candidate.y,
            result.point.x,
            result.point.y
        );
    }
    result
}

/// Snap the dragged entity according to the configured mode.
pub fn resolve_snap_detailed(
    entities: &[EntityGeometry],
    dragged_id: &EntityId,
    candidate: Point,
    config: &SnapConfig,
) -> SnapResult {
    if !config.mode.is_enabled() {
        return SnapResult::none(candidate);
    }

    let entity_result = if config.mode.snaps_to_entities() {
        snap_to_entities(entities, dragged_id, candidate, config.threshold)
    } else {
        SnapResult::none(candidate)
    };
    if !config.mode.snaps_to_grid() {
        return entity_result;
    }

    // Entity alignment takes priority; the grid only fills unsnapped axes
    let grid_result = snap_to_grid(candidate, config.grid_size);
    let x = if entity_result.snapped_x {
        entity_result.point.x
    } else {
        grid_result.point.x
    };
    let y = if entity_result.snapped_y {
        entity_result.point.y
    } else {
        grid_result.point.y
    };
    SnapResult {
        point: Point::new(x, y),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Corrected position of the dragged entity.
pub fn resolve_snap(
    entities: &[EntityGeometry],
    dragged_id: &EntityId,
    candidate: Point,
    config: &SnapConfig,
) -> Point {
    resolve_snap_detailed(entities, dragged_id, candidate, config).point
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    const BOX: Size = Size::new(150.0, 100.0);

    fn regular(id: &str, x: f64, y: f64) -> EntityGeometry {
        EntityGeometry::regular(id, Point::new(x, y), BOX)
    }

    fn dot(id: &str, x: f64, y: f64) -> EntityGeometry {
        EntityGeometry::dot(id, Point::new(x, y), 12.0)
    }

    fn snap(entities: &[EntityGeometry], candidate: Point) -> SnapResult {
        resolve_snap_detailed(entities, &"dragged".into(), candidate, &SnapConfig::default())
    }

    #[test]
    fn test_snap_to_grid() {
        let result = snap_to_grid(Point::new(23.0, 47.0), 20.0);
        assert_eq!(result.point, Point::new(20.0, 40.0));
        assert!(result.snapped_x);
        assert!(result.snapped_y);
    }

    #[test]
    fn test_snap_to_grid_round_up() {
        let result = snap_to_grid(Point::new(31.0, 51.0), 20.0);
        assert_eq!(result.point, Point::new(40.0, 60.0));
    }

    #[test]
    fn test_snap_mode_flags() {
        assert!(!SnapMode::None.snaps_to_grid());
        assert!(SnapMode::Grid.snaps_to_grid());
        assert!(!SnapMode::Entities.snaps_to_grid());
        assert!(SnapMode::All.snaps_to_grid());

        assert!(!SnapMode::None.snaps_to_entities());
        assert!(!SnapMode::Grid.snaps_to_entities());
        assert!(SnapMode::Entities.snaps_to_entities());
        assert!(SnapMode::All.snaps_to_entities());

        assert!(!SnapMode::None.is_enabled());
        assert!(SnapMode::Grid.is_enabled());
    }

    #[test]
    fn test_left_edge_alignment() {
        let entities = vec![regular("dragged", 202.0, 100.0), regular("other", 200.0, 150.0)];
        let result = snap(&entities, Point::new(202.0, 100.0));
        assert_eq!(result.point, Point::new(200.0, 100.0));
        assert!(result.snapped_x);
        assert!(!result.snapped_y);
    }

    #[test]
    fn test_exact_match_returns_exact_coordinate() {
        let entities = vec![regular("dragged", 0.0, 0.0), regular("other", 300.0, 40.0)];
        // Top edges coincide
        let result = snap(&entities, Point::new(900.0, 40.0));
        assert_eq!(result.point, Point::new(900.0, 40.0));
        assert!(result.snapped_y);
        assert!(!result.snapped_x);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let entities = vec![regular("dragged", 0.0, 0.0), regular("other", 200.0, 0.0)];

        let inside = snap(&entities, Point::new(204.99, 500.0));
        assert!(inside.snapped_x);
        assert!((inside.point.x - 200.0).abs() < 1e-9);

        let boundary = snap(&entities, Point::new(205.0, 500.0));
        assert!(!boundary.snapped_x);
        assert!((boundary.point.x - 205.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_to_center_alignment() {
        let entities = vec![
            EntityGeometry::regular("dragged", Point::ZERO, Size::new(50.0, 50.0)),
            regular("other", 100.0, 400.0),
        ];
        // Dragged center x = 153 + 25 = 178, other center x = 175
        let result = snap(&entities, Point::new(153.0, 0.0));
        assert!((result.point.x - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_cross_stop_comparison() {
        let entities = vec![
            EntityGeometry::regular("dragged", Point::ZERO, Size::new(50.0, 50.0)),
            regular("other", 100.0, 400.0),
        ];
        // Dragged left edge (276) is near the other's center (275) only
        let result = snap(&entities, Point::new(276.0, 0.0));
        assert!(!result.snapped_x);
        assert_eq!(result.point, Point::new(276.0, 0.0));
    }

    #[test]
    fn test_closest_match_wins() {
        let entities = vec![
            regular("dragged", 0.0, 0.0),
            regular("far", 502.0, 1000.0),
            regular("near", 501.0, 2000.0),
        ];
        let result = snap(&entities, Point::new(500.0, 0.0));
        assert!((result.point.x - 501.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let entities = vec![
            regular("dragged", 0.0, 0.0),
            regular("first", 498.0, 1000.0),
            regular("second", 502.0, 2000.0),
        ];
        let result = snap(&entities, Point::new(500.0, 0.0));
        assert!((result.point.x - 498.0).abs() < 1e-9);
    }

    #[test]
    fn test_dot_to_dot_alignment() {
        let entities = vec![dot("dragged", 202.0, 100.0), dot("other", 200.0, 150.0)];
        let result = snap(&entities, Point::new(202.0, 100.0));
        assert_eq!(result.point, Point::new(200.0, 100.0));
    }

    #[test]
    fn test_dot_never_snaps_to_regular_edge() {
        let entities = vec![dot("dragged", 0.0, 0.0), regular("other", 200.0, 600.0)];
        // Dot center x = 203 + 6 = 209, close to the regular's left edge only
        let result = snap(&entities, Point::new(203.0, 0.0));
        assert!(!result.snapped_x);

        // Dot center x = 272 + 6 = 278, close to the regular's center (275)
        let result = snap(&entities, Point::new(272.0, 0.0));
        assert!(result.snapped_x);
        assert!((result.point.x - 269.0).abs() < 1e-9);
    }

    #[test]
    fn test_regular_snaps_to_dot_center_only() {
        let entities = vec![
            EntityGeometry::regular("dragged", Point::ZERO, Size::new(40.0, 40.0)),
            dot("other", 100.0, 500.0),
        ];
        // Dragged left edge matches the dot's top-left: not a center match
        let result = snap(&entities, Point::new(100.0, 0.0));
        assert!(!result.snapped_x);

        // Dragged center x = 87 + 20 = 107, dot center 106
        let result = snap(&entities, Point::new(87.0, 0.0));
        assert!(result.snapped_x);
        assert!((result.point.x - 86.0).abs() < 1e-9);
    }

    #[test]
    fn test_skips_unplaced_and_degenerate_entities() {
        let unplaced = EntityGeometry {
            position: None,
            ..regular("unplaced", 0.0, 0.0)
        };
        let entities = vec![
            regular("dragged", 0.0, 0.0),
            unplaced,
            EntityGeometry::regular("empty", Point::new(201.0, 301.0), Size::ZERO),
        ];
        let result = snap(&entities, Point::new(202.0, 302.0));
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_missing_dragged_entity_is_noop() {
        let entities = vec![regular("other", 200.0, 150.0)];
        let candidate = Point::new(202.0, 152.0);
        assert_eq!(snap(&entities, candidate), SnapResult::none(candidate));
    }

    #[test]
    fn test_empty_collection_is_noop() {
        let candidate = Point::new(202.0, 100.0);
        let point = resolve_snap(&[], &"dragged".into(), candidate, &SnapConfig::default());
        assert_eq!(point, candidate);
    }

    #[test]
    fn test_snap_is_idempotent() {
        let entities = vec![
            regular("dragged", 0.0, 0.0),
            regular("a", 200.0, 150.0),
            dot("b", 40.0, 97.0),
            regular("c", 1000.0, 98.5),
        ];
        let config = SnapConfig::default();
        let dragged = EntityId::from("dragged");
        let first = resolve_snap(&entities, &dragged, Point::new(202.0, 101.0), &config);
        let second = resolve_snap(&entities, &dragged, first, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mode_none_and_grid() {
        let entities = vec![regular("dragged", 0.0, 0.0), regular("other", 200.0, 150.0)];
        let dragged = EntityId::from("dragged");

        let config = SnapConfig {
            mode: SnapMode::None,
            ..Default::default()
        };
        let result = resolve_snap_detailed(&entities, &dragged, Point::new(202.0, 100.0), &config);
        assert_eq!(result, SnapResult::none(Point::new(202.0, 100.0)));

        let config = SnapConfig {
            mode: SnapMode::Grid,
            ..Default::default()
        };
        let result = resolve_snap_detailed(&entities, &dragged, Point::new(202.0, 109.0), &config);
        assert_eq!(result.point, Point::new(200.0, 100.0));
    }

    #[test]
    fn test_mode_all_falls_back_to_grid_per_axis() {
        let entities = vec![regular("dragged", 0.0, 0.0), regular("other", 203.0, 150.0)];
        let config = SnapConfig {
            mode: SnapMode::All,
            ..Default::default()
        };
        let candidate = Point::new(205.0, 109.0);
        let result = resolve_snap_detailed(&entities, &"dragged".into(), candidate, &config);
        // X aligns with the other entity, Y falls back to the grid
        assert_eq!(result.point, Point::new(203.0, 100.0));
        assert!(result.snapped_x && result.snapped_y);
    }
}
