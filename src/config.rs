//! User configuration.
//!
//! An optional JSON file in the platform config directory. Every field has a
//! default, so a missing file and an empty object behave the same.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::core::{FallbackOverrides, DEFAULT_FILE_EXTENSION, DEFAULT_IDLE_TIMEOUT, DEFAULT_WORKERS};

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.json";

/// Smallest scanner idle timeout honored from the config file.
pub const MIN_SCAN_IDLE_TIMEOUT_MS: u64 = 100;

/// Errors from loading the config file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("error reading config {}: {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid config JSON.
    #[error("error parsing config {}: {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Settings read from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where VS Code extensions live.
    pub extensions_dir: Option<PathBuf>,
    /// Where presets are written.
    pub output_dir: Option<PathBuf>,
    /// Scanner worker threads.
    pub workers: usize,
    /// How long the scanner waits for the next result, in milliseconds.
    pub scan_idle_timeout_ms: u64,
    /// Extension of written presets, without the dot.
    pub file_extension: String,
    /// Replacement fallback colors.
    pub fallback: FallbackOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions_dir: None,
            output_dir: None,
            workers: DEFAULT_WORKERS,
            scan_idle_timeout_ms: DEFAULT_IDLE_TIMEOUT.as_millis() as u64,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            fallback: FallbackOverrides::default(),
        }
    }
}

impl Config {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Worker count, at least one.
    pub fn workers(&self) -> usize {
        self.workers.max(1)
    }

    /// Scanner idle timeout, at least [`MIN_SCAN_IDLE_TIMEOUT_MS`].
    pub fn scan_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.scan_idle_timeout_ms.max(MIN_SCAN_IDLE_TIMEOUT_MS))
    }

    /// Extensions directory, or `~/.vscode/extensions`.
    pub fn extensions_dir(&self) -> Option<PathBuf> {
        self.extensions_dir.clone().or_else(default_extensions_dir)
    }

    /// Output directory, or the user's downloads directory.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.clone().or_else(default_output_dir)
    }
}

/// Path of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "echo-vsc").map(|d| d.config_dir().join(CONFIG_FILE))
}

/// `~/.vscode/extensions`.
pub fn default_extensions_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vscode").join("extensions"))
}

/// The downloads directory, falling back to `~/Downloads`.
pub fn default_output_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
}
