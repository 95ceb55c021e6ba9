//! Application-level errors.

use exoscape_config::ConfigError;

use crate::platform::PlatformError;

/// Failures that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Config could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No usable config/log directory.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The export file could not be written.
    #[error("failed to write export: {0}")]
    ExportWrite(#[source] std::io::Error),

    /// The export could not be serialized.
    #[error("failed to encode export: {0}")]
    ExportEncode(#[source] serde_json::Error),
}
