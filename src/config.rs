//! Tool configuration module.
//!
//! Handles loading and validating the optional `darkroom.toml`. The surface
//! is deliberately flat — two small tables, no cascade:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [export]
//! quality = 90       # JPEG quality (1-100); other formats ignore it
//!
//! [thumbnails]
//! width = 140        # Thumbnail grid cell width in pixels
//! height = 120       # Thumbnail grid cell height in pixels
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early. Run `darkroom gen-config` to print the
//! stock file with all options documented.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `darkroom.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub export: ExportConfig,
    pub thumbnails: ThumbnailsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ExportConfig {
    /// JPEG quality (1-100). Other formats ignore it.
    pub quality: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThumbnailsConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            width: crate::thumbs::DEFAULT_THUMB_WIDTH,
            height: crate::thumbs::DEFAULT_THUMB_HEIGHT,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            thumbnails: ThumbnailsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a config file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.export.quality) {
            return Err(ConfigError::Validation(format!(
                "export.quality must be between 1 and 100, got {}",
                self.export.quality
            )));
        }
        if self.thumbnails.width == 0 || self.thumbnails.height == 0 {
            return Err(ConfigError::Validation(format!(
                "thumbnail dimensions must be positive, got {}x{}",
                self.thumbnails.width, self.thumbnails.height
            )));
        }
        Ok(())
    }
}

/// The stock config file printed by `gen-config`: every option present,
/// documented, set to its default.
pub fn stock_config() -> &'static str {
    r#"# darkroom configuration
# All options are optional - defaults shown below.

[export]
# JPEG quality (1-100); other formats ignore it
quality = 90

[thumbnails]
# Thumbnail grid cell size in pixels
width = 140
height = 120
"#
}
