//! Configuration handling
//!
//! Settings are read from `~/.config/shape/config.toml` (global) and then
//! `.shape/config.toml` (project, found by walking up from the current
//! directory). Keys set in the project file override the global ones.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::command::HelpStream;

/// Usage line shown above the command list unless configured otherwise
pub const DEFAULT_USAGE: &str = "Usage: shape <command> [args...] [--flags...]";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// One configuration file; unset keys fall through to the layer below
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub usage: Option<String>,
    pub help_stream: Option<HelpStream>,
    pub default_format: Option<OutputFormat>,
}

impl ConfigLayer {
    /// Reads a layer, returning `None` if the file does not exist
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let layer: ConfigLayer = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(Some(layer))
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Palette usage line
    pub usage: String,

    /// Stream the help listing is written to
    pub help_stream: HelpStream,

    /// Output format when `--format` is not given
    pub default_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            usage: DEFAULT_USAGE.to_string(),
            help_stream: HelpStream::Stderr,
            default_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Loads global configuration, then the project file if one is found
    pub fn load() -> Result<Self> {
        let mut config = Self::load_global()?;

        let project_file = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_project_root(&dir))
            .map(|root| root.join(".shape").join("config.toml"));

        if let Some(path) = project_file {
            if let Some(layer) = ConfigLayer::read(&path)? {
                config.apply(layer);
            }
        }

        Ok(config)
    }

    /// Loads global configuration, then the given file, which must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_global()?;

        let layer = ConfigLayer::read(path)?
            .ok_or_else(|| anyhow::anyhow!("Config file not found: {}", path.display()))?;
        config.apply(layer);

        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "shape", "shape").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn load_global() -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = Self::global_config_dir() {
            if let Some(layer) = ConfigLayer::read(&dir.join("config.toml"))
                .context("Failed to load global config")?
            {
                config.apply(layer);
            }
        }

        Ok(config)
    }

    /// Overrides every key the layer sets
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(usage) = layer.usage {
            self.usage = usage;
        }
        if let Some(help_stream) = layer.help_stream {
            self.help_stream = help_stream;
        }
        if let Some(default_format) = layer.default_format {
            self.default_format = default_format;
        }
    }

    /// Finds the nearest ancestor of `start` containing a `.shape/` directory
    pub fn find_project_root(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(".shape").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.usage, DEFAULT_USAGE);
        assert_eq!(config.help_stream, HelpStream::Stderr);
        assert_eq!(config.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_layer() {
        let toml = r#"
usage = "Usage: shapes-demo <command>"
help_stream = "stdout"
default_format = "json"
"#;

        let layer: ConfigLayer = toml::from_str(toml).unwrap();
        assert_eq!(layer.usage.as_deref(), Some("Usage: shapes-demo <command>"));
        assert_eq!(layer.help_stream, Some(HelpStream::Stdout));
        assert_eq!(layer.default_format, Some(OutputFormat::Json));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ConfigLayer>("colour = \"red\"").is_err());
    }

    #[test]
    fn apply_overrides_only_set_keys() {
        let mut config = Config::default();
        config.apply(ConfigLayer {
            help_stream: Some(HelpStream::Stdout),
            ..ConfigLayer::default()
        });

        assert_eq!(config.help_stream, HelpStream::Stdout);
        assert_eq!(config.usage, DEFAULT_USAGE);
    }

    #[test]
    fn read_missing_layer() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ConfigLayer::read(&dir.path().join("config.toml")).unwrap(), None);
    }

    #[test]
    fn read_invalid_layer_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "usage = [").unwrap();

        let err = ConfigLayer::read(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }

    #[test]
    fn from_file_requires_file() {
        let dir = TempDir::new().unwrap();
        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn find_project_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".shape")).unwrap();
        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        assert_eq!(Config::find_project_root(&sub_dir), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_outside_project() {
        let dir = TempDir::new().unwrap();
        // A stray .shape/ higher up (e.g. in $HOME) would be found, so only
        // check that the temp dir itself is not reported.
        let root = Config::find_project_root(dir.path());
        assert_ne!(root, Some(dir.path().to_path_buf()));
    }
}
