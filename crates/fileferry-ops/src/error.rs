//! Engine-level errors.

use thiserror::Error;

use fileferry_core::NameError;

/// Errors that abort a whole batch.
///
/// Per-item execution failures never surface here; they are aggregated
/// into the batch outcome while the remaining items still run.
#[derive(Debug, Error)]
pub enum OpsError {
    /// A name was rejected by the naming policy before any I/O.
    #[error("name not allowed: {0}")]
    NameNotAllowed(#[from] NameError),

    /// The recycle bin is not available on this platform.
    #[error("the recycle bin is not supported on this platform")]
    RecycleBinUnsupported,

    /// A recycle-bin operation failed as a whole.
    #[error("recycle bin operation failed: {0}")]
    RecycleBin(String),

    /// A background task panicked or was aborted.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl OpsError {
    /// Wrap a join error from a blocking task.
    pub(crate) fn join(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}
