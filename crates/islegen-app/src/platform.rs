//! Platform directory resolution for config and log files.

use std::path::{Path, PathBuf};

/// Errors that can occur while resolving platform directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
}

/// Directory name used under the OS config location.
const APP_NAME: &str = "islegen";

/// Where islegen keeps `config.ron` and its log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the JSON debug log.
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Resolve the directories, preferring an explicit config directory.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if no override is given and the
    /// OS does not expose a configuration directory.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, PlatformError> {
        let config_dir = match config_override {
            Some(dir) => dir.to_path_buf(),
            None => dirs::config_dir()
                .ok_or(PlatformError::NoConfigDir)?
                .join(APP_NAME),
        };
        Ok(Self::rooted_at(config_dir))
    }

    /// Directories rooted under a given config directory.
    pub fn rooted_at(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_used_verbatim() {
        let root = tempfile::tempdir().unwrap();
        let dirs = AppDirs::resolve(Some(root.path())).unwrap();
        assert_eq!(dirs.config_dir, root.path());
        assert_eq!(dirs.log_dir, root.path().join("logs"));
    }

    #[test]
    fn test_default_location_ends_with_app_name() {
        if let Ok(dirs) = AppDirs::resolve(None) {
            assert!(dirs.config_dir.ends_with(APP_NAME));
            assert!(dirs.log_dir.starts_with(&dirs.config_dir));
        }
    }
}
