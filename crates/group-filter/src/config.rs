//! Filter configuration.
//!
//! Controls whether group filtering is active at all and which column names
//! the rendered SQL fragments refer to.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current config schema version.
pub const CONFIG_VERSION: u32 = 1;

/// Errors that can occur while loading configuration or directory files.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },

    /// The file is not valid TOML for the expected structure.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A column name cannot be used as a SQL identifier.
    #[error("invalid column name for {field}: {value:?}")]
    InvalidColumn {
        /// Which column setting is invalid.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Top-level filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Config schema version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Whether the group-membership subsystem is active.
    /// When false, group expressions are ignored entirely.
    #[serde(default = "default_groups_enabled")]
    pub groups_enabled: bool,

    /// Column names used when rendering SQL.
    #[serde(default)]
    pub columns: ColumnConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_groups_enabled() -> bool {
    true
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            groups_enabled: true,
            columns: ColumnConfig::default(),
        }
    }
}

impl FilterConfig {
    /// Parses and validates a config from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: FilterConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.columns.validate()?;
        config.version = CONFIG_VERSION;
        Ok(config)
    }

    /// Loads a config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Column names of the item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column holding the owning group id (NULL or 0 when groupless).
    #[serde(default = "default_group_column")]
    pub group: String,

    /// Column holding the private flag (0 public, 1 private).
    #[serde(default = "default_private_column")]
    pub private: String,
}

fn default_group_column() -> String {
    "group_id".to_string()
}

fn default_private_column() -> String {
    "event_private".to_string()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            group: default_group_column(),
            private: default_private_column(),
        }
    }
}

impl ColumnConfig {
    /// Checks that both column names are plain identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_identifier("group", &self.group)?;
        check_identifier("private", &self.private)
    }
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidColumn {
            field,
            value: value.to_string(),
        })
    }
}
