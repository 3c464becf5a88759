//! TOML configuration for the platform glue.
//!
//! Defaults reproduce the behavior the components shipped with before they
//! were configurable: a 5-minute debounce window and a prefs file named
//! after the `boot_receiver_prefs` store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::boot::{DEFAULT_DEBOUNCE_WINDOW_MS, PREFS_STORE_NAME};
use crate::core::errors::{GlueError, Result};

/// Boot debounce settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Duplicate-suppression window in milliseconds.
    pub window_ms: i64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
        }
    }
}

/// Filesystem locations used by the glue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Backing file for the persisted key-value store.
    pub prefs_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            prefs_file: PathBuf::from(format!("{PREFS_STORE_NAME}.json")),
        }
    }
}

impl PathsConfig {
    /// Place the prefs file inside a host-provided data directory.
    #[must_use]
    pub fn in_data_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            prefs_file: dir.as_ref().join(format!("{PREFS_STORE_NAME}.json")),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Boot debounce settings.
    pub debounce: DebounceConfig,
    /// Filesystem locations.
    pub paths: PathsConfig,
}

impl Config {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GlueError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| GlueError::InvalidConfig {
            details: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml(&text)
    }

    /// Reject configurations the forwarder cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.debounce.window_ms <= 0 {
            return Err(GlueError::InvalidConfig {
                details: format!(
                    "debounce.window_ms must be positive, got {}",
                    self.debounce.window_ms
                ),
            });
        }
        if self.paths.prefs_file.as_os_str().is_empty() {
            return Err(GlueError::InvalidConfig {
                details: "paths.prefs_file must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
