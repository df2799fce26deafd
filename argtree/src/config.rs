//! Interaction settings.
//!
//! Settings are plain JSON; every field has a default so a partial file (or
//! no file at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use log::{LevelFilter, debug};
use serde::{Deserialize, Serialize};

use crate::drag::INTERNAL_REORDER_FORMAT;
use crate::error::ConfigError;
use crate::paths;

/// Tunables for [`TreeController`](crate::controller::TreeController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Rows moved by PageUp/PageDown.
    pub page_size: usize,
    /// Share of a row's height at the top (Before) and bottom (After) of the
    /// drop zone. Must be in `(0, 0.5]`.
    pub drop_edge_ratio: f32,
    /// Format tag put on internal drags.
    pub drag_format: String,
    /// Clicking the focused, single-selected row starts an inline edit.
    pub edit_on_click: bool,
    /// Releasing the mouse over the tree background commits open edits.
    pub commit_edits_on_background_click: bool,
    /// Log output.
    pub log: LogConfig,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            drop_edge_ratio: 1.0 / 3.0,
            drag_format: INTERNAL_REORDER_FORMAT.to_string(),
            edit_on_click: true,
            commit_edits_on_background_click: true,
            log: LogConfig::default(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum level written.
    pub level: LevelFilter,
    /// Log file. Defaults to the platform cache directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file: None,
        }
    }
}

impl InteractionConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Load the platform config file, or defaults if there is none.
    pub fn load_default() -> Result<Self, ConfigError> {
        match paths::config_file() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if !(self.drop_edge_ratio > 0.0 && self.drop_edge_ratio <= 0.5) {
            return Err(ConfigError::Invalid(format!(
                "drop_edge_ratio must be in (0, 0.5], got {}",
                self.drop_edge_ratio
            )));
        }
        if self.drag_format.trim().is_empty() {
            return Err(ConfigError::Invalid("drag_format must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = InteractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.drag_format, INTERNAL_REORDER_FORMAT);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = InteractionConfig::from_json_str(r#"{ "page_size": 4 }"#).unwrap();
        assert_eq!(config.page_size, 4);
        assert!(config.edit_on_click);
        assert_eq!(config.log.level, LevelFilter::Info);
    }

    #[test]
    fn test_log_level_parses() {
        let json = r#"{ "log": { "level": "DEBUG", "file": "/tmp/a.log" } }"#;
        let config = InteractionConfig::from_json_str(json).unwrap();
        assert_eq!(config.log.level, LevelFilter::Debug);
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/a.log")));
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let err = InteractionConfig::from_json_str(r#"{ "drop_edge_ratio": 0.8 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = InteractionConfig::from_json_str(r#"{ "page_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = InteractionConfig::from_json_str("{ page_size: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = InteractionConfig::load("/nonexistent/argtree.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = InteractionConfig::default();
        config.page_size = 3;
        let json = config.to_json_string().unwrap();
        assert_eq!(InteractionConfig::from_json_str(&json).unwrap(), config);
    }
}
