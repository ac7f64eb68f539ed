//! Tunable constants of the alignment engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snap::SnapMode;

/// Maximum coordinate difference (exclusive) at which an alignment snaps.
pub const SNAP_THRESHOLD: f64 = 5.0;

/// Edge length of a dot entity, whatever size it reports.
pub const DOT_SIZE: f64 = 12.0;

/// Distance guide lines extend past the visible area on each side.
pub const GUIDE_SPAN: f64 = 50_000.0;

/// Grid size for grid snapping.
pub const GRID_SIZE: f64 = 20.0;

/// Type tag marker identifying dot entities.
pub const DEFAULT_DOT_MARKER: &str = "dot";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid {field}: {value} (must be {requirement})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        requirement: &'static str,
    },
    #[error("At least one non-empty dot marker is required")]
    NoDotMarkers,
}

/// Alignment engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Snap tolerance in world units (exclusive).
    pub threshold: f64,
    /// Fixed edge length of dot entities.
    pub dot_size: f64,
    /// Case-insensitive substrings of a type tag that mark a dot entity.
    pub dot_markers: Vec<String>,
    /// How far guide lines run beyond the visible area.
    pub guide_span: f64,
    /// Grid cell size for grid snapping.
    pub grid_size: f64,
    /// Which snapping sources are active.
    pub mode: SnapMode,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: SNAP_THRESHOLD,
            dot_size: DOT_SIZE,
            dot_markers: vec![DEFAULT_DOT_MARKER.to_string()],
            guide_span: GUIDE_SPAN,
            grid_size: GRID_SIZE,
            mode: SnapMode::default(),
        }
    }
}

impl SnapConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("threshold", self.threshold)?;
        positive("dot_size", self.dot_size)?;
        positive("grid_size", self.grid_size)?;
        if !self.guide_span.is_finite() || self.guide_span < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "guide_span",
                value: self.guide_span,
                requirement: "finite and non-negative",
            });
        }
        if self.dot_markers.iter().all(|marker| marker.trim().is_empty()) {
            return Err(ConfigError::NoDotMarkers);
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            requirement: "finite and positive",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SnapConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.threshold - 5.0).abs() < f64::EPSILON);
        assert!((config.dot_size - 12.0).abs() < f64::EPSILON);
        assert_eq!(config.mode, SnapMode::Entities);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let config = SnapConfig {
            threshold: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "threshold", .. })
        ));

        let config = SnapConfig {
            threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_guide_span() {
        let config = SnapConfig {
            guide_span: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "guide_span", .. })
        ));
    }

    #[test]
    fn test_rejects_missing_dot_markers() {
        let config = SnapConfig {
            dot_markers: vec!["  ".to_string()],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoDotMarkers));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "threshold": 8.0, "mode": "all" }"#;
        let config: SnapConfig = serde_json::from_str(json).unwrap();
        assert!((config.threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.mode, SnapMode::All);
        assert_eq!(config.dot_markers, vec!["dot".to_string()]);
    }
}
