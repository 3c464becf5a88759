//! SPG-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, GlueError>;

/// Top-level error type for the SubGuard platform glue.
#[derive(Debug, Error)]
pub enum GlueError {
    #[error("[SPG-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[SPG-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[SPG-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[SPG-2001] prefs store IO failure at {path}: {source}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[SPG-2002] prefs store corrupt at {path}: {details}")]
    StoreCorrupt { path: PathBuf, details: String },

    #[error("[SPG-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[SPG-3001] alarm forwarding failed: {details}")]
    Forward { details: String },
}

impl GlueError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "SPG-1001",
            Self::MissingConfig { .. } => "SPG-1002",
            Self::ConfigParse { .. } => "SPG-1003",
            Self::StoreIo { .. } => "SPG-2001",
            Self::StoreCorrupt { .. } => "SPG-2002",
            Self::Serialization { .. } => "SPG-2101",
            Self::Forward { .. } => "SPG-3001",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreIo { .. } | Self::Forward { .. })
    }

    /// Convenience constructor for store IO errors with a known path.
    #[must_use]
    pub fn store_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::StoreIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for GlueError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for GlueError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
