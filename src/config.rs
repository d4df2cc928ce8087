//! Tagger configuration management.
//!
//! Each working root may carry a `.tagger.toml`:
//!
//! ```toml
//! [index]
//! file = ".tagger"
//! duplicates = "allow"   # or "skip"
//!
//! [server]
//! addr = "127.0.0.1:9000"
//! thumbnails = "/home/me/.cache/thumbnails/normal"
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! A missing file means defaults.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, TaggerError};
use crate::file_index::DuplicatePolicy;
use crate::fs_utils;
use crate::store::DEFAULT_INDEX_FILE;

/// Configuration file name inside the working root.
pub const CONFIG_FILE: &str = ".tagger.toml";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Tagger configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TaggerConfig {
    /// Snapshot settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Directory browser settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Snapshot configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IndexConfig {
    /// Snapshot file name, relative to the root
    #[serde(default = "default_index_file")]
    pub file: String,

    /// Whether re-applying a tag appends a duplicate id
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

fn default_index_file() -> String {
    DEFAULT_INDEX_FILE.to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            file: default_index_file(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

/// Directory browser configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Thumbnail directory; platform default when unset
    #[serde(default)]
    pub thumbnails: Option<PathBuf>,
}

fn default_addr() -> String {
    "127.0.0.1:9000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            thumbnails: None,
        }
    }
}

impl ServerConfig {
    /// Thumbnail directory to serve under `/thumb/`.
    pub fn thumbnail_dir(&self) -> PathBuf {
        self.thumbnails
            .clone()
            .unwrap_or_else(fs_utils::get_thumbnail_dir)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TaggerConfig {
    /// Load `.tagger.toml` from `root`, or defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_from(&root.join(CONFIG_FILE))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| TaggerError::ConfigError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| TaggerError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Snapshot location for `root`.
    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(&self.index.file)
    }

    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(TaggerError::ConfigError {
                message: format!(
                    "Invalid log level: {}. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        let mut components = Path::new(&self.index.file).components();
        let plain_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !plain_name {
            return Err(TaggerError::ConfigError {
                message: format!(
                    "index.file must be a plain file name inside the root: {:?}",
                    self.index.file
                ),
            });
        }
        Ok(())
    }
}
