//! Copy and move batch execution.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task;
use tracing::{debug, warn};

use fileferry_core::{
    CollisionDecision, HistoryEntry, ItemFailure, OperationKind, StorageItemRef, TransferPair,
};

use crate::collision::{resolve_collisions, Resolution};
use crate::context::OperationContext;
use crate::error::OpsError;
use crate::executor::BatchOutcome;
use crate::status::BatchProgress;

/// Whether a transfer copies or moves its sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransferMode {
    Copy,
    Move,
}

impl TransferMode {
    fn kind(self) -> OperationKind {
        match self {
            Self::Copy => OperationKind::Copy,
            Self::Move => OperationKind::Move,
        }
    }
}

/// Run a copy or move batch.
pub(crate) async fn run(
    ctx: &OperationContext,
    pairs: Vec<TransferPair>,
    show_dialog: bool,
    mode: TransferMode,
) -> Result<BatchOutcome, OpsError> {
    let kind = mode.kind();
    let banner_source = pairs.first().map(|p| p.source.path.clone());
    let banner_destination = pairs
        .first()
        .and_then(|p| p.destination.parent().map(|d| d.to_path_buf()));
    let handle = ctx
        .status
        .add_banner(
            kind,
            banner_source.as_deref(),
            banner_destination.as_deref(),
            pairs.len(),
        )
        .await;
    let mut progress = BatchProgress::new(handle, kind);

    // Resolution always completes (or cancels the batch) before any
    // mutation begins.
    let decisions = match resolve_collisions(ctx, &pairs, kind, show_dialog).await {
        Resolution::Cancelled => {
            debug!(%kind, "batch cancelled at collision resolution");
            return Ok(progress.cancel(ctx.status.as_ref()).await);
        }
        Resolution::Decided(decisions) => decisions,
    };

    if mode == TransferMode::Move {
        if let Some(reset) = &ctx.selection_reset {
            reset();
        }
    }

    let token = progress.token();
    let mut completed: Vec<(StorageItemRef, PathBuf)> = Vec::new();
    let mut custom_renames: Vec<(usize, String)> = Vec::new();

    for (index, (pair, decision)) in pairs.iter().zip(decisions.iter()).enumerate() {
        // Cooperative cancellation, between items only.
        if token.is_cancelled() {
            break;
        }
        if !pair.source.has_path() || decision.decision == CollisionDecision::Skip {
            progress.skip(index, &pair.destination).await;
            continue;
        }
        progress.in_progress(index, &pair.source.path).await;

        let fs = Arc::clone(&ctx.fs);
        let source = pair.source.path.clone();
        let destination = pair.destination.clone();
        let decision_kind = decision.decision;
        let result = task::spawn_blocking(move || {
            let target = match decision_kind {
                CollisionDecision::GenerateNewName => {
                    crate::collision::generated_name(fs.as_ref(), &destination)
                }
                _ => destination,
            };
            if decision_kind == CollisionDecision::Overwrite && fs.exists(&target) {
                fs.remove_item(&target)?;
            }
            let bytes = match mode {
                TransferMode::Copy => fs.copy_item(&source, &target)?,
                TransferMode::Move => fs.move_item(&source, &target)?,
            };
            Ok::<(PathBuf, u64), io::Error>((target, bytes))
        })
        .await;

        match result {
            Ok(Ok((target, _bytes))) => {
                if let Some(name) = &decision.custom_name {
                    custom_renames.push((completed.len(), name.to_string()));
                }
                completed.push((pair.source.clone(), target));
                progress.success(index, &pair.source.path).await;
            }
            Ok(Err(err)) => {
                progress
                    .failure(index, ItemFailure::from_io(pair.source.path.clone(), &err))
                    .await;
            }
            Err(err) => {
                progress
                    .failure(
                        index,
                        ItemFailure::other(pair.source.path.clone(), format!("task failed: {err}")),
                    )
                    .await;
            }
        }
    }

    // Items the user renamed in the conflict dialog get their final name
    // after the transfer; a failure here does not fail the batch.
    for (slot, name) in custom_renames {
        if token.is_cancelled() {
            break;
        }
        let fs = Arc::clone(&ctx.fs);
        let target = completed[slot].1.clone();
        let new_name = name.clone();
        match task::spawn_blocking(move || fs.rename_item(&target, &new_name)).await {
            Ok(Ok(renamed)) => completed[slot].1 = renamed,
            Ok(Err(err)) => warn!(
                path = %completed[slot].1.display(),
                error = %err,
                "post-transfer rename failed"
            ),
            Err(err) => warn!(error = %err, "post-transfer rename task failed"),
        }
    }

    if !token.is_cancelled() && completed.iter().any(|(source, _)| source.has_path()) {
        let (sources, destinations) = completed.into_iter().unzip();
        ctx.history
            .add_history(HistoryEntry::new(kind, sources, destinations));
    }

    Ok(progress.finish(ctx.status.as_ref()).await)
}
