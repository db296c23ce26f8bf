//! File and directory creation.

use std::sync::Arc;

use tokio::task;

use fileferry_core::{HistoryEntry, ItemFailure, ItemKind, OperationKind, StorageItemRef};

use crate::context::OperationContext;
use crate::error::OpsError;
use crate::executor::BatchOutcome;
use crate::status::BatchProgress;

/// Run a create batch (always a single item).
pub(crate) async fn run(
    ctx: &OperationContext,
    item: StorageItemRef,
) -> Result<BatchOutcome, OpsError> {
    let kind = OperationKind::Create;

    // Validated against a policy snapshot before any I/O.
    let policy = ctx.naming.snapshot();
    policy.is_valid_for_filename(&item.name)?;

    let handle = ctx
        .status
        .add_banner(kind, None, Some(&item.path), 1)
        .await;
    let mut progress = BatchProgress::new(handle, kind);
    progress.in_progress(0, &item.path).await;

    let fs = Arc::clone(&ctx.fs);
    let path = item.path.clone();
    let item_kind = item.kind;
    let result = task::spawn_blocking(move || match item_kind {
        ItemKind::File => fs.create_file(&path),
        ItemKind::Directory => fs.create_directory(&path),
    })
    .await;

    match result {
        Ok(Ok(())) => {
            progress.success(0, &item.path).await;
            ctx.history.add_history(HistoryEntry::new(
                kind,
                vec![item.clone()],
                vec![item.path.clone()],
            ));
        }
        Ok(Err(err)) => {
            progress
                .failure(0, ItemFailure::from_io(item.path.clone(), &err))
                .await;
        }
        Err(err) => {
            progress
                .failure(
                    0,
                    ItemFailure::other(item.path.clone(), format!("task failed: {err}")),
                )
                .await;
        }
    }

    Ok(progress.finish(ctx.status.as_ref()).await)
}
