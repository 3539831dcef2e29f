//! Error types for SwarmView.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur anywhere in the snapshot rendering pipeline.
#[derive(Debug, Error)]
pub enum VisError {
    /// Input or output file could not be opened, read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot line is not valid JSON of the expected shape
    #[error("Parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Requested snapshot does not exist in the recording
    #[error("Snapshot index {index} out of range (recording has {len} snapshots)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Wrong command-line argument combination
    #[error("Usage error: {0}")]
    Usage(String),

    /// Invalid style or layout configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Drawing backend or image encoding failed
    #[error("Render error: {0}")]
    Render(String),

    /// Interactive viewer could not be started
    #[error("Viewer error: {0}")]
    Viewer(String),
}

impl VisError {
    /// Creates an I/O error bound to a path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a render error from any displayable backend error.
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, VisError>;
