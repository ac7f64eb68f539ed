//! Entities taking part in alignment, and their ingestion from node records.
//!
//! The graph-state layer hands over nodes in two lists: the declared list
//! (pre-layout state) and the resolved list (post-layout lookup). They are
//! merged once per frame with [`merge_sources`], then every record is resolved
//! into an [`EntityGeometry`] with a closed [`EntityKind`], so that no comparison
//! site ever has to look at type strings again.

use std::collections::{HashMap, HashSet};
use std::fmt;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::config::SnapConfig;
use crate::geometry::{bounds_at, sanitize_extent};

/// Opaque, stable identifier of a diagram node.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an entity takes part in alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Sized box aligning by near edge, center and far edge.
    #[default]
    Regular,
    /// Fixed-size connection dot aligning by its center only.
    Dot,
}

impl EntityKind {
    /// Classify from type tags.
    ///
    /// A tag marks a dot when it contains any of `markers`, ignoring case.
    pub fn classify<'a>(tags: impl IntoIterator<Item = &'a str>, markers: &[String]) -> Self {
        let is_dot = tags.into_iter().any(|tag| {
            let tag = tag.to_lowercase();
            markers
                .iter()
                .filter(|marker| !marker.trim().is_empty())
                .any(|marker| tag.contains(&marker.to_lowercase()))
        });
        if is_dot { EntityKind::Dot } else { EntityKind::Regular }
    }

    pub fn is_dot(self) -> bool {
        self == EntityKind::Dot
    }
}

/// Width/height pair where either component may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl PartialSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Application data attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Layout-engine bookkeeping attached to a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInternals {
    /// Absolute top-left position computed by the layout engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_absolute: Option<Point>,
}

/// A node as reported by the graph-state layer, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: EntityId,
    /// Node type tag.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Declared (pre-layout) top-left position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Resolved (post-layout) top-left position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_absolute: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internals: Option<NodeInternals>,
    /// Size measured after render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<PartialSize>,
    /// Explicitly declared width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Explicitly declared height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub data: NodeData,
}

impl NodeRecord {
    /// Create a record with only an id.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Resolved position wins over declared position.
    ///
    /// Checked in order: `internals.positionAbsolute`, `positionAbsolute`, `position`.
    pub fn resolved_position(&self) -> Option<Point> {
        self.internals
            .and_then(|internals| internals.position_absolute)
            .or(self.position_absolute)
            .or(self.position)
            .filter(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Size resolved per component: measured, then declared, then data, then zero.
    pub fn resolved_size(&self) -> Size {
        let measured = self.measured.unwrap_or_default();
        let pick = |candidates: [Option<f64>; 3]| {
            candidates
                .into_iter()
                .flatten()
                .find_map(sanitize_extent)
                .unwrap_or(0.0)
        };
        Size::new(
            pick([measured.width, self.width, self.data.width]),
            pick([measured.height, self.height, self.data.height]),
        )
    }

    /// All type tags carried by the record.
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.node_type
            .as_deref()
            .into_iter()
            .chain(self.data.node_type.as_deref())
    }
}

/// Merge the declared and resolved node lists into one record per id.
///
/// Ids keep the order of their first appearance in `declared`, followed by
/// ids found only in `resolved`. When both lists carry an id, the resolved
/// record wins. Within a single list, the first record for an id wins.
pub fn merge_sources(declared: &[NodeRecord], resolved: &[NodeRecord]) -> Vec<NodeRecord> {
    let mut resolved_by_id: HashMap<&EntityId, &NodeRecord> =
        HashMap::with_capacity(resolved.len());
    for record in resolved {
        resolved_by_id.entry(&record.id).or_insert(record);
    }

    let mut seen: HashSet<&EntityId> = HashSet::with_capacity(declared.len() + resolved.len());
    let mut merged = Vec::with_capacity(declared.len() + resolved.len());

    for record in declared.iter().chain(resolved) {
        if !seen.insert(&record.id) {
            continue;
        }
        let winner = resolved_by_id.get(&record.id).copied().unwrap_or(record);
        merged.push(winner.clone());
    }

    merged
}

/// Resolved geometry of one entity for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityGeometry {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Top-left corner; `None` when neither a resolved nor a declared position exists.
    pub position: Option<Point>,
    /// Width and height; fixed for dots.
    pub size: Size,
}

impl EntityGeometry {
    /// A regular entity at `position`.
    pub fn regular(id: impl Into<EntityId>, position: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Regular,
            position: Some(position),
            size,
        }
    }

    /// A dot entity at `position` with the given fixed edge length.
    pub fn dot(id: impl Into<EntityId>, position: Point, dot_size: f64) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Dot,
            position: Some(position),
            size: Size::new(dot_size, dot_size),
        }
    }

    /// Resolve a node record.
    pub fn from_record(record: &NodeRecord, config: &SnapConfig) -> Self {
        let kind = EntityKind::classify(record.type_tags(), &config.dot_markers);
        let size = match kind {
            EntityKind::Dot => Size::new(config.dot_size, config.dot_size),
            EntityKind::Regular => record.resolved_size(),
        };
        Self {
            id: record.id.clone(),
            kind,
            position: record.resolved_position(),
            size,
        }
    }

    pub fn is_dot(&self) -> bool {
        self.kind.is_dot()
    }

    /// A regular entity with no measured area carries no meaningful edges.
    pub fn is_degenerate(&self) -> bool {
        self.kind == EntityKind::Regular && self.size.width == 0.0 && self.size.height == 0.0
    }

    /// Whether this entity can act as an alignment target.
    pub fn is_alignable(&self) -> bool {
        self.position.is_some() && !self.is_degenerate()
    }

    /// Bounding box at the entity's own position.
    pub fn bounds(&self) -> Option<Rect> {
        self.position.map(|origin| bounds_at(origin, self.size))
    }

    /// Bounding box if the entity were placed at `origin`.
    pub fn bounds_at(&self, origin: Point) -> Rect {
        bounds_at(origin, self.size)
    }
}

/// The resolved entities of one frame, one per id.
#[derive(Debug, Clone, Default)]
pub struct EntitySnapshot {
    entities: Vec<EntityGeometry>,
}

impl EntitySnapshot {
    /// Build from already-resolved geometry. Later duplicates of an id are dropped.
    pub fn new(entities: impl IntoIterator<Item = EntityGeometry>) -> Self {
        let mut seen = HashSet::new();
        let entities = entities
            .into_iter()
            .filter(|entity| seen.insert(entity.id.clone()))
            .collect();
        Self { entities }
    }

    /// Resolve a single list of node records.
    pub fn from_records(records: &[NodeRecord], config: &SnapConfig) -> Self {
        Self::from_sources(records, &[], config)
    }

    /// Merge the declared and resolved lists, then resolve every record.
    pub fn from_sources(
        declared: &[NodeRecord],
        resolved: &[NodeRecord],
        config: &SnapConfig,
    ) -> Self {
        let entities = merge_sources(declared, resolved)
            .iter()
            .map(|record| {
                let entity = EntityGeometry::from_record(record, config);
                if entity.position.is_none() {
                    log::trace!("Entity {} has no resolvable position", entity.id);
                }
                entity
            })
            .collect();
        Self { entities }
    }

    pub fn get(&self, id: &EntityId) -> Option<&EntityGeometry> {
        self.entities.iter().find(|entity| &entity.id == id)
    }

    pub fn as_slice(&self) -> &[EntityGeometry] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityGeometry> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl std::ops::Deref for EntitySnapshot {
    type Target = [EntityGeometry];

    fn deref(&self) -> &Self::Target {
        &self.entities
    }
}
