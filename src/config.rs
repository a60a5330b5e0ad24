use crate::error::{BoardError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Settings for the persistence side of a [`BoardStore`](crate::store::BoardStore)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Storage key the serialized board lives under
    pub storage_key: String,

    /// Pretty-print the persisted JSON
    pub pretty: bool,
}

impl StoreConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "kanban-tasks";

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Parses a TOML document, filling missing settings with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| BoardError::ConfigError(e.to_string()))?;
        if config.storage_key.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            pretty: false,
        }
    }
}

/// Loads a [`StoreConfig`] from a TOML file; a missing file yields defaults
pub fn load(config_path: impl AsRef<Path>) -> anyhow::Result<StoreConfig> {
    let path = config_path.as_ref();

    if !path.exists() {
        return Ok(StoreConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;

    let config = StoreConfig::from_toml_str(&content)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "kanban-tasks");
        assert!(!config.pretty);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = StoreConfig::from_toml_str("pretty = true").unwrap();
        assert_eq!(config.storage_key, "kanban-tasks");
        assert!(config.pretty);
    }

    #[test]
    fn test_blank_key_rejected() {
        assert!(matches!(
            StoreConfig::from_toml_str("storage_key = \"  \""),
            Err(BoardError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kanban.toml");
        std::fs::write(&path, "storage_key = \"team-board\"\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.storage_key, "team-board");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = load(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_load_invalid_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kanban.toml");
        std::fs::write(&path, "pretty = \"yes\"").unwrap();

        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("kanban.toml"));
    }
}
