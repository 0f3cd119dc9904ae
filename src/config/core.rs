use super::{RenderConfig, WindowConfig};
use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CONFIG_PATH: &str = "glquad.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub window: WindowConfig,
    pub rendering: RenderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            rendering: RenderConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.log_level()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    /// The flag reports whether the file was found.
    pub fn load_or_default(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            Ok((Self::from_file(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("Invalid log level '{}'", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.window.title, "OpenGL Cube");
        assert_eq!((config.window.width, config.window.height), (640, 480));
        assert_eq!(
            config.rendering.shader_path,
            PathBuf::from("resources/shaders/Basic.shader")
        );
        assert_eq!(config.log_level().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [window]
            width = 1024

            [rendering]
            gl_version = [4, 1]
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level().unwrap(), LevelFilter::Debug);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.rendering.gl_version, (4, 1));
        assert!(config.rendering.vsync);
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(AppConfig::from_toml(r#"log_level = "loud""#).is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let (config, found) = AppConfig::load_or_default(&dir.path().join("glquad.toml")).unwrap();

        assert!(!found);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("glquad.toml");
        std::fs::write(
            &path,
            "[rendering]\nshader_path = \"shaders/Other.shader\"\nclear_color = [0.2, 0.3, 0.3, 1.0]\n",
        )
        .unwrap();

        let (config, found) = AppConfig::load_or_default(&path).unwrap();
        assert!(found);
        assert_eq!(config.rendering.shader_path, PathBuf::from("shaders/Other.shader"));
        assert_eq!(config.rendering.clear_color, [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("glquad.toml");
        std::fs::write(&path, "[window\nwidth = ").unwrap();

        assert!(AppConfig::load_or_default(&path).is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
