//! Report configuration loaded from TOML.
//!
//! ```toml
//! [window]
//! default_days = 10
//!
//! [table]
//! placeholder = "-"
//! ```
//!
//! Every key is optional and falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::window::DEFAULT_LOOKBACK_DAYS;

/// Default text for table cells with no value.
pub const DEFAULT_PLACEHOLDER: &str = "-";

/// Largest accepted `window.default_days`; every day of a window becomes a
/// series bucket.
pub const MAX_LOOKBACK_DAYS: u32 = 3660;

/// Errors that can occur while loading a [`ReportConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not usable.
    #[error("Invalid config: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// Window defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Days to look back when a chart has no start date.
    pub default_days: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Table rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Text rendered for missing cells.
    pub placeholder: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Configuration for report generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub window: WindowConfig,
    pub table: TableConfig,
}

impl ReportConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for a blank placeholder or a look-back
    /// above [`MAX_LOOKBACK_DAYS`].
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise
    /// the errors of [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded report config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.table.placeholder.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "table.placeholder must not be blank".to_string(),
            });
        }
        if self.window.default_days > MAX_LOOKBACK_DAYS {
            return Err(ConfigError::Invalid {
                message: format!(
                    "window.default_days must be at most {MAX_LOOKBACK_DAYS}, got {}",
                    self.window.default_days
                ),
            });
        }
        Ok(())
    }
}
