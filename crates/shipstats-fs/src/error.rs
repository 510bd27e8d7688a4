//! Error types for the filesystem backend.

use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for filesystem operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors that can occur in filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    /// The configured unpacker command is empty.
    #[error("unpacker command is empty")]
    EmptyUnpackerCommand,

    /// The unpacker could not be started.
    #[error("failed to spawn unpacker '{command}': {source}")]
    UnpackerSpawn {
        command: String,
        source: std::io::Error,
    },

    /// The unpacker ran but exited non-zero.
    #[error("unpacker '{command}' failed: {status}")]
    UnpackerFailed { command: String, status: ExitStatus },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FsError {
    /// Whether this error came from the external unpacker rather than the
    /// tool itself. The CLI maps these to a distinct exit code.
    #[must_use]
    pub const fn is_unpacker_failure(&self) -> bool {
        matches!(self, Self::UnpackerSpawn { .. } | Self::UnpackerFailed { .. })
    }
}
