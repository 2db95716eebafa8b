//! Runtime configuration: render canvas, API address, log filter
//!
//! Loaded from an optional TOML file. Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Render surface the unit-space geometry is projected onto
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Unit x → pixels
    pub fn x(&self, unit: f64) -> f64 {
        unit * self.width
    }

    /// Unit y → pixels
    pub fn y(&self, unit: f64) -> f64 {
        unit * self.height
    }

    /// Horizontal offset drawn against the 400×600 reference canvas → pixels
    pub fn px_x(&self, reference: f64) -> f64 {
        reference * self.width / CANVAS_WIDTH
    }

    /// Vertical offset drawn against the 400×600 reference canvas → pixels
    pub fn px_y(&self, reference: f64) -> f64 {
        reference * self.height / CANVAS_HEIGHT
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwinConfig {
    pub canvas: Canvas,
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("canvas must have positive size, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
}

impl TwinConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: TwinConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let Canvas { width, height } = self.canvas;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidCanvas { width, height });
        }
        Ok(())
    }
}
