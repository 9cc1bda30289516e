//! Where the orrery keeps its config and log files.

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Config and log directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the JSON log file in debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// `<os config dir>/orrery`, or `config_override` when given.
    ///
    /// Logs go to `<os data dir>/orrery/logs`, falling back to a `logs`
    /// directory beside the config.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, AppError> {
        let config_dir = match config_override {
            Some(dir) => dir.to_path_buf(),
            None => orrery_config::default_config_dir()?,
        };
        let log_dir = dirs::data_local_dir()
            .map(|d| d.join("orrery").join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));
        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    /// Everything under one root, for tests and portable installs.
    pub fn with_root(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            log_dir: root.join("logs"),
        }
    }

    /// Create both directories on disk.
    pub fn create(&self) -> Result<(), AppError> {
        for dir in [&self.config_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| AppError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve(Some(dir.path())).unwrap();
        assert_eq!(dirs.config_dir, dir.path());
    }

    #[test]
    fn test_with_root_and_create() {
        let root = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_root(root.path());
        assert_eq!(dirs.config_dir, root.path().join("config"));
        assert_eq!(dirs.log_dir, root.path().join("logs"));

        dirs.create().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_create_under_a_file_fails() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("blocker");
        std::fs::write(&file, b"").unwrap();

        let dirs = PlatformDirs::with_root(&file);
        assert!(matches!(dirs.create(), Err(AppError::CreateDir { .. })));
    }
}
