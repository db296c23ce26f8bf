//! High-level operation executor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use fileferry_core::{ItemFailure, OperationKind, OperationRequest, ProgressStatus};

use crate::context::OperationContext;
use crate::error::OpsError;
use crate::{create, delete, rename, restore, shortcut, transfer};

/// Lifecycle of one batch.
///
/// `CollisionResolution` is skipped for kinds without a
/// destination-naming step (plain delete).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchState {
    Pending,
    CollisionResolution,
    Executing,
    Succeeded,
    Failed,
    Cancelled,
}

impl BatchState {
    /// Map a terminal status to its state.
    pub fn from_status(status: ProgressStatus) -> Self {
        match status {
            ProgressStatus::Success => Self::Succeeded,
            ProgressStatus::Failed => Self::Failed,
            ProgressStatus::Cancelled => Self::Cancelled,
            ProgressStatus::InProgress => Self::Executing,
        }
    }
}

/// Terminal summary of one batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// The operation that ran.
    pub kind: OperationKind,
    /// Worst status observed across the batch's items, forced to
    /// `Cancelled` when the batch token fired.
    pub status: ProgressStatus,
    /// Number of items the batch covered.
    pub total: usize,
    /// Items that completed.
    pub succeeded: usize,
    /// Items that failed.
    pub failed: usize,
    /// Items skipped by decision or because they had no path.
    pub skipped: usize,
    /// Per-item failures, in batch order.
    pub failures: Vec<ItemFailure>,
}

impl BatchOutcome {
    /// Whether every attempted item completed.
    pub fn is_success(&self) -> bool {
        self.status == ProgressStatus::Success
    }

    /// Human-readable summary for the terminal banner.
    pub fn summary(&self) -> String {
        let action = match self.kind {
            OperationKind::Create => "Created",
            OperationKind::Delete => "Deleted",
            OperationKind::Copy => "Copied",
            OperationKind::Move => "Moved",
            OperationKind::Rename => "Renamed",
            OperationKind::RestoreFromTrash => "Restored",
            OperationKind::CreateShortcut => "Created shortcuts for",
        };
        match self.status {
            ProgressStatus::Cancelled => format!("{} cancelled", self.kind),
            _ if self.failed == 0 => format!("{action} {} items", self.succeeded),
            _ => format!("{action} {} items, {} failed", self.succeeded, self.failed),
        }
    }
}

/// Executes operation requests against one [`OperationContext`].
///
/// Every request is a batch with its own banner and cancellation token;
/// distinct batches are independent.
pub struct OperationExecutor {
    ctx: OperationContext,
}

impl OperationExecutor {
    /// Create an executor over a context.
    pub fn new(ctx: OperationContext) -> Self {
        Self { ctx }
    }

    /// Borrow the context.
    pub fn context(&self) -> &OperationContext {
        &self.ctx
    }

    /// Execute one batch to completion.
    ///
    /// Per-item failures are aggregated into the outcome; `Err` is
    /// reserved for conditions that abort the whole batch before any
    /// I/O, such as a rejected name.
    pub async fn execute(&self, request: OperationRequest) -> Result<BatchOutcome, OpsError> {
        let kind = request.kind();
        debug!(%kind, items = request.total_items(), state = ?BatchState::Pending, "batch accepted");

        let outcome = match request {
            OperationRequest::Create { item } => create::run(&self.ctx, item).await?,
            OperationRequest::Delete {
                items,
                permanently,
                confirm,
            } => delete::run(&self.ctx, items, permanently, confirm).await?,
            OperationRequest::Copy { pairs, show_dialog } => {
                transfer::run(&self.ctx, pairs, show_dialog, transfer::TransferMode::Copy).await?
            }
            OperationRequest::Move { pairs, show_dialog } => {
                transfer::run(&self.ctx, pairs, show_dialog, transfer::TransferMode::Move).await?
            }
            OperationRequest::Rename {
                item,
                new_name,
                collision,
                register_history,
            } => rename::run(&self.ctx, item, new_name, collision, register_history).await?,
            OperationRequest::RestoreFromTrash {
                pairs,
                register_history,
            } => restore::run(&self.ctx, pairs, register_history).await?,
            OperationRequest::CreateShortcut {
                sources,
                destination_dir,
                show_dialog,
            } => shortcut::run(&self.ctx, sources, destination_dir, show_dialog).await?,
        };

        debug!(
            %kind,
            state = ?BatchState::from_status(outcome.status),
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            "batch finished"
        );
        Ok(outcome)
    }
}
