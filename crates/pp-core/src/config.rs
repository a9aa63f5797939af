//! Configuration system for pixel-probe

use crate::error::{DebugError, Result};
use crate::stage::SourceLanguage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub debug: DebugConfig,
    pub session: SessionConfig,
}

/// Logging and diagnostics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: LogLevel,
    pub log_to_file: bool,
    pub log_path: PathBuf,
    /// Log every value installed into the interpreter
    pub trace_bindings: bool,
}

/// Debug session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_language: SourceLanguage,
    /// Vertices per primitive, used when a fragment context reports zero
    pub vertices_per_primitive: u32,
    /// Size used for bound resources with no known backing image
    pub fallback_texture_size: [u32; 2],
}

/// Logging level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_to_file: false,
            log_path: PathBuf::from("pixel-probe.log"),
            trace_bindings: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_language: SourceLanguage::default(),
            vertices_per_primitive: 3,
            fallback_texture_size: [1, 1],
        }
    }
}

impl Config {
    /// Load configuration from the default location, or create it if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Self::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| DebugError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| DebugError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pixel-probe")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let [w, h] = self.session.fallback_texture_size;
        if w == 0 || h == 0 {
            return Err(DebugError::Config(format!(
                "fallback_texture_size must be non-zero, got {w}x{h}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.debug.log_level, LogLevel::Info);
        assert!(!config.debug.log_to_file);
        assert_eq!(config.session.vertices_per_primitive, 3);
        assert_eq!(config.session.fallback_texture_size, [1, 1]);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.session.default_language = SourceLanguage::Glsl;
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.default_language, SourceLanguage::Glsl);
        assert_eq!(parsed.session.vertices_per_primitive, config.session.vertices_per_primitive);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("[debug]\nlog_level = \"Trace\"\n").unwrap();
        assert_eq!(parsed.debug.log_level, LogLevel::Trace);
        assert_eq!(parsed.session.fallback_texture_size, [1, 1]);
    }

    #[test]
    fn test_color_clamp_not_configurable() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!toml_str.contains("clamp"));

        // older files carrying the key still load
        let parsed: Config = toml::from_str("[session]\nclamp_debug_color = false\n").unwrap();
        assert_eq!(parsed.session.vertices_per_primitive, 3);
    }

    #[test]
    fn test_load_rejects_empty_fallback() {
        let dir = std::env::temp_dir().join("pp_core_config_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.session.fallback_texture_size = [0, 4];
        config.save_to(&path).unwrap();

        assert!(matches!(Config::load_from(&path), Err(DebugError::Config(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
