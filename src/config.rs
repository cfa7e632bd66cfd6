//! Startup configuration

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::camera::DEFAULT_DAMPING_FACTOR;
use crate::cli::Cli;
use crate::error::ConfigError;
use crate::lights::DEFAULT_SHADOW_MAP_SIZE;

/// Settings read once at startup; every field is optional in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,

    /// Initial inner size in logical pixels
    pub width: u32,
    pub height: u32,

    /// Directory holding px.png .. nz.png
    pub env_map_dir: PathBuf,

    /// Edge length of every shadow buffer
    pub shadow_map_size: u32,

    /// Orbit controls damping per frame, 0..=1
    pub damping_factor: f32,

    pub show_panel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Shadow Showcase".to_string(),
            width: 800,
            height: 600,
            env_map_dir: PathBuf::from("assets/environment"),
            shadow_map_size: DEFAULT_SHADOW_MAP_SIZE,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            show_panel: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// File values (or defaults) with command-line flags applied on top
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_cli(cli))
    }

    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if cli.no_ui {
            self.show_panel = false;
        }
        if let Some(dir) = &cli.env_map {
            self.env_map_dir = dir.clone();
        }
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.shadow_map_size, 1024);
        assert_eq!(config.damping_factor, 0.05);
        assert!(config.show_panel);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config =
            Config::from_json(r#"{ "width": 1280, "env_map_dir": "textures/sky" }"#).unwrap();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 600);
        assert_eq!(config.env_map_dir, PathBuf::from("textures/sky"));
        assert_eq!(config.title, "Shadow Showcase");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Config::from_json("{ width: }").is_err());
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("shadow-showcase-missing-config.json");
        assert!(matches!(Config::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli::parse_from([
            "shadow-showcase",
            "--no-ui",
            "--width",
            "1920",
            "--env-map",
            "sky",
        ]);
        let config = Config {
            width: 1280,
            height: 720,
            ..Config::default()
        }
        .with_cli(&cli);
        assert_eq!((config.width, config.height), (1920, 720));
        assert_eq!(config.env_map_dir, PathBuf::from("sky"));
        assert!(!config.show_panel);
    }
}
