//! Configuration file loading.

use std::fs;

use flowsnap_core::SnapConfig;
use log::{debug, info};

use crate::error::{CliError, CliResult};

/// Load the snap configuration from a TOML file, or defaults when no path is given.
pub fn load_config(path: Option<&str>) -> CliResult<SnapConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading configuration from {path}");
            let source = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
            parse_config(&source)?
        }
        None => {
            debug!("No configuration file given, using defaults");
            SnapConfig::default()
        }
    };
    config.validate()?;
    Ok(config)
}

/// Parse a TOML configuration document. Missing keys take their defaults.
pub fn parse_config(source: &str) -> CliResult<SnapConfig> {
    Ok(toml::from_str(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowsnap_core::SnapMode;

    #[test]
    fn test_parse_partial_config() {
        let source = "threshold = 8.0\nmode = \"all\"\ndot_markers = [\"dot\", \"junction\"]\n";
        let config = parse_config(source).unwrap();
        assert!((config.threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.mode, SnapMode::All);
        assert_eq!(config.dot_markers, vec!["dot".to_string(), "junction".to_string()]);
        assert!((config.dot_size - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse_config("").unwrap(), SnapConfig::default());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(matches!(parse_config("mode = \"magnetic\""), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), SnapConfig::default());
    }
}
