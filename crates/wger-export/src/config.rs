//! Configuration file loading for the exporter.
//!
//! Settings come from a TOML file, `wger-export.toml` in the current
//! directory by default. Every key is optional.
//!
//! ```toml
//! database = "wger.db"
//! media_root = "media"
//! output_dir = "."
//! display_languages = ["en", "de"]
//! capabilities = ["exercises.change_exercise"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Capability, Permissions};

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A capability listed in the configuration is not known.
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),
}

/// Exporter configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ExportConfig {
    /// SQLite database holding the exercises. Defaults to `wger.db`.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Directory stored image paths are relative to. Defaults to `media`.
    #[serde(default = "default_media_root")]
    pub media_root: PathBuf,
    /// Where export files are written. Defaults to the current directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Languages shown to users, in order of preference. The first one names
    /// the filtered export file. Defaults to `["en"]`.
    #[serde(default = "default_display_languages")]
    pub display_languages: Vec<String>,
    /// Capabilities granted to whoever runs the exporter.
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<String>,
}

fn default_database() -> PathBuf {
    PathBuf::from("wger.db")
}

fn default_media_root() -> PathBuf {
    PathBuf::from("media")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_display_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_capabilities() -> Vec<String> {
    vec![Capability::ChangeExercise.as_str().to_string()]
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            media_root: default_media_root(),
            output_dir: default_output_dir(),
            display_languages: default_display_languages(),
            capabilities: default_capabilities(),
        }
    }
}

impl ExportConfig {
    /// Loads the configuration from [`Self::config_path()`].
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration file path, `wger-export.toml` in the
    /// current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("wger-export.toml")
    }

    /// Parses the configured capabilities into a permission set.
    pub fn permissions(&self) -> Result<Permissions, ConfigError> {
        self.capabilities
            .iter()
            .map(|name| name.parse::<Capability>())
            .collect()
    }
}
