//! OS-specific directories for config and logs.

use std::io;
use std::path::{Path, PathBuf};

use exoscape_config::default_config_dir;

/// Errors resolving or creating platform directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Directory layout of the application.
///
/// Follows OS conventions (XDG on Linux, Known Folders on Windows, Library on
/// macOS) unless rooted elsewhere with [`resolve_with_root`](Self::resolve_with_root).
#[derive(Debug, Clone)]
pub struct PlatformDirs {
    /// `config.ron` lives here.
    pub config_dir: PathBuf,
    /// JSON log files (debug builds).
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the OS locations without touching the disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = default_config_dir().map_err(|_| PlatformError::NoConfigDir)?;
        Ok(Self {
            config_dir: app_config.clone(),
            log_dir: app_config.join("logs"),
        })
    }

    /// Lay every directory out under `root`, as used by `--config`.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    /// Create every directory on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
