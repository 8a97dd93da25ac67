//! Configuration file handling.
//!
//! Loads defaults from `~/.config/raskii/config.toml` (or a custom path via
//! `--config`). A missing file yields the built-in defaults; a file that
//! exists but does not parse is an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::transcode::DEFAULT_BATCH_SIZE;

/// Tool configuration; every field has a default so a partial file is fine.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub ascii: AsciiConfig,
}

#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    /// Frames processed concurrently per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct PlaybackConfig {
    /// Frames per second for transcoding and playback.
    #[serde(default = "default_fps")]
    pub fps: u32,
}

#[derive(Debug, Deserialize)]
pub struct AsciiConfig {
    /// Default ramp index (1-13).
    #[serde(default = "default_charset")]
    pub charset: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            batch_size: default_batch_size(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig { fps: default_fps() }
    }
}

impl Default for AsciiConfig {
    fn default() -> Self {
        AsciiConfig {
            charset: default_charset(),
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_fps() -> u32 {
    12
}

fn default_charset() -> u8 {
    1
}

impl Config {
    /// Load configuration from `path`, or the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("raskii")
        .join("config.toml")
}
