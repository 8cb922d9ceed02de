//! Configuration module for colexpr
//!
//! Configuration is a single TOML file with a `[parser]` and an `[output]`
//! table (see [`settings`]). Missing files and missing keys fall back to
//! defaults.
//!
//! # Config Location
//!
//! Unless a path is given explicitly, the config is read from the
//! platform-appropriate config directory:
//!
//! - **Linux**: `~/.config/colexpr/config.toml`
//! - **macOS**: `~/Library/Application Support/colexpr/config.toml`
//! - **Windows**: `%APPDATA%\colexpr\config.toml`
//!
//! # Example
//!
//! ```ignore
//! use colexpr::config::ColexprConfig;
//! use colexpr::expression::ExpressionCompiler;
//!
//! let config = ColexprConfig::load_or_default();
//! let compiler = ExpressionCompiler::with_settings(config.parser.clone());
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{ColexprError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "colexpr";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Get the default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColexprConfig {
    /// Parser limits and compatibility switches
    pub parser: ParserSettings,

    /// Output formatting
    pub output: OutputSettings,
}

impl ColexprConfig {
    /// Load config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ColexprError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml(&content).map_err(|e| e.with_context(format!("In {:?}", path)))
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ColexprError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load config from the default location, returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to disk as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ColexprError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ColexprError::Serialization(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            ColexprError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }
}
