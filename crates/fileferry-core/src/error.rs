//! Error types shared across the operation engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a filename was rejected by the naming policy.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum NameError {
    /// Name is empty.
    #[error("name cannot be empty")]
    Empty,

    /// Name exceeds the configured maximum length.
    #[error("name is too long ({length} > {max} characters)")]
    TooLong { length: usize, max: usize },

    /// Name contains a restricted character.
    #[error("name cannot contain '{0}'")]
    RestrictedCharacter(char),

    /// Name matches a reserved device name.
    #[error("'{0}' is a reserved device name")]
    ReservedName(String),

    /// Name ends with a space or a dot.
    #[error("name cannot end with a space or a dot")]
    TrailingSpaceOrDot,

    /// Name is "." or "..".
    #[error("'.' and '..' are reserved names")]
    DotComponent,
}

/// Classification of a per-item execution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The path does not exist.
    PathNotFound,
    /// Access to the path was denied.
    AccessDenied,
    /// Any other failure.
    Other,
}

/// A failure that occurred while processing one item of a batch.
///
/// Per-item failures are aggregated into the batch outcome rather than
/// aborting the remaining items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFailure {
    /// The path that caused the failure.
    pub path: PathBuf,
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable message.
    pub message: String,
}

impl ItemFailure {
    /// Create a failure with an explicit kind.
    pub fn new(path: impl Into<PathBuf>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Create an unclassified failure.
    pub fn other(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(path, FailureKind::Other, message)
    }

    /// Classify an I/O error.
    pub fn from_io(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => FailureKind::PathNotFound,
            std::io::ErrorKind::PermissionDenied => FailureKind::AccessDenied,
            _ => FailureKind::Other,
        };
        Self::new(path, kind, source.to_string())
    }
}

impl std::fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
