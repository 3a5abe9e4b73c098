//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the config file (or its directory) to disk.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File or directory that could not be written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON content.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File containing the malformed RON.
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// A value parsed fine but cannot drive the generator.
    #[error("invalid config value `{key}`: {reason}")]
    Invalid {
        /// Dotted path of the offending setting, e.g. `map.width`.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}
