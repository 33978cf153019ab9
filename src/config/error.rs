//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`ZenConfig`](super::ZenConfig).
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A value is outside its accepted range.
    #[error("config value out of range: {field} (expected {reason})")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// Accepted range description
        reason: &'static str,
    },
}

impl ConfigError {
    /// Returns true if the problem is with the file itself rather than a value.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}
