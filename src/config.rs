//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! # carbonscribe.toml
//! alias_file = "aliases/local.json"
//! fallback_detectors = true
//! ```

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(carbonscribe::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(carbonscribe::config::parse),
        help("Check the TOML syntax. Known keys are `alias_file` and `fallback_detectors`.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(carbonscribe::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Settings for a [`FootprintEngine`](crate::engine::FootprintEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// External alias table (TOML, or JSON by extension). `None` uses the
    /// bundled table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_file: Option<PathBuf>,
    /// Run the lemma-based food and shopping detectors when the rules find
    /// nothing.
    #[serde(default = "default_fallback_detectors")]
    pub fallback_detectors: bool,
}

fn default_fallback_detectors() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alias_file: None,
            fallback_detectors: default_fallback_detectors(),
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file.
    ///
    /// A relative `alias_file` is resolved against the config file's
    /// directory.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        config.alias_file = config.alias_file.map(|alias| {
            if alias.is_relative() {
                dir.join(alias)
            } else {
                alias
            }
        });
        Ok(config)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
