//! Restore-from-trash execution.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task;

use fileferry_core::{HistoryEntry, ItemFailure, OperationKind, StorageItemRef, TransferPair};

use crate::context::OperationContext;
use crate::error::OpsError;
use crate::executor::BatchOutcome;
use crate::status::BatchProgress;

/// Run a restore batch, moving recycle entries back to their paired
/// destinations.
pub(crate) async fn run(
    ctx: &OperationContext,
    pairs: Vec<TransferPair>,
    register_history: bool,
) -> Result<BatchOutcome, OpsError> {
    let kind = OperationKind::RestoreFromTrash;
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

    let token = progress.token();
    let mut restored: Vec<(StorageItemRef, PathBuf)> = Vec::new();

    for (index, pair) in pairs.iter().enumerate() {
        if token.is_cancelled() {
            break;
        }
        if !pair.source.has_path() {
            progress.skip(index, &pair.destination).await;
            continue;
        }
        progress.in_progress(index, &pair.source.path).await;

        let fs = Arc::clone(&ctx.fs);
        let source = pair.source.path.clone();
        let destination = pair.destination.clone();
        let result = task::spawn_blocking(move || fs.move_item(&source, &destination)).await;

        match result {
            Ok(Ok(_bytes)) => {
                restored.push((pair.source.clone(), pair.destination.clone()));
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

    if register_history
        && !token.is_cancelled()
        && restored.iter().any(|(source, _)| source.has_path())
    {
        let (sources, destinations) = restored.into_iter().unzip();
        ctx.history
            .add_history(HistoryEntry::new(kind, sources, destinations));
    }

    Ok(progress.finish(ctx.status.as_ref()).await)
}
