use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// # Scene Config
///
/// Settings for a [GameObjectManager](crate::GameObjectManager). Missing keys fall back to
/// [SceneConfig::default].
///
/// ```toml
/// default_name = "Actor"
/// root_capacity = 64
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Name given to game objects created without an explicit name.
    pub default_name: String,
    /// Number of root game objects to reserve space for.
    pub root_capacity: usize,
}

impl SceneConfig {
    /// Parses the config from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses the TOML config file at the given path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_name: "Game Object".to_string(),
            root_capacity: 0,
        }
    }
}

/// # Config Error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML or has mistyped keys.
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_default_name_returns_game_object() {
        let config = SceneConfig::default();

        assert_eq!(config.default_name, "Game Object");
    }

    #[test]
    fn from_toml_str_partial_document_returns_defaults_for_missing_keys() {
        let config = SceneConfig::from_toml_str("root_capacity = 16").unwrap();

        assert_eq!(
            config,
            SceneConfig {
                default_name: "Game Object".to_string(),
                root_capacity: 16,
            }
        );
    }

    #[test]
    fn from_toml_str_full_document_returns_values() {
        let config =
            SceneConfig::from_toml_str("default_name = \"Actor\"\nroot_capacity = 4").unwrap();

        assert_eq!(config.default_name, "Actor");
        assert_eq!(config.root_capacity, 4);
    }

    #[test]
    fn from_toml_str_wrong_type_returns_parse_error() {
        let result = SceneConfig::from_toml_str("root_capacity = \"many\"");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_missing_file_returns_io_error() {
        let result = SceneConfig::load("this/path/does/not/exist.toml");

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
