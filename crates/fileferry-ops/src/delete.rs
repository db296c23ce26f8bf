//! Delete batch execution.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task;
use tracing::{debug, warn};

use fileferry_core::{
    ConfirmationPolicy, HistoryEntry, ItemFailure, ItemKind, OperationKind, StorageItemRef,
};

use crate::context::{DeletePrompt, OperationContext};
use crate::error::OpsError;
use crate::executor::BatchOutcome;
use crate::status::BatchProgress;

/// Run a delete batch.
pub(crate) async fn run(
    ctx: &OperationContext,
    items: Vec<StorageItemRef>,
    permanently: bool,
    confirm: ConfirmationPolicy,
) -> Result<BatchOutcome, OpsError> {
    let kind = OperationKind::Delete;

    // Items already inside the recycle bin cannot be re-recycled; they
    // are removed for good regardless of the batch's permanence.
    let mut already_recycled = vec![false; items.len()];
    for (index, item) in items.iter().enumerate() {
        already_recycled[index] =
            item.has_path() && ctx.recycle.is_path_under_recycle_bin(&item.path).await;
    }

    // Recycle capability for the volume holding the remaining items.
    let probe = items
        .iter()
        .zip(&already_recycled)
        .find(|(item, recycled)| item.has_path() && !**recycled);
    let supported = match probe {
        Some((item, _)) => ctx.recycle.has_recycle_bin(&item.path).await,
        None => true,
    };
    let mut permanently = permanently || !supported;

    let banner_source = items.first().map(|i| i.path.clone());
    let handle = ctx
        .status
        .add_banner(kind, banner_source.as_deref(), None, items.len())
        .await;
    let mut progress = BatchProgress::new(handle, kind);

    let needs_confirmation = match confirm {
        ConfirmationPolicy::Always => true,
        ConfirmationPolicy::PermanentOnly => permanently || !supported,
        ConfirmationPolicy::Never => false,
    };

    if needs_confirmation {
        let prompts = build_prompts(ctx, &items, &already_recycled).await;
        let verdict = ctx.dialog.confirm_delete(&prompts, permanently).await;
        if !verdict.accepted {
            debug!("delete declined at confirmation");
            return Ok(progress.cancel(ctx.status.as_ref()).await);
        }
        // The dialog may adjust permanence; a missing recycle bin still
        // wins.
        permanently = verdict.permanently || !supported;
    }

    let token = progress.token();
    let mut soft_deleted: Vec<(StorageItemRef, PathBuf)> = Vec::new();
    let mut removed_dirs: Vec<PathBuf> = Vec::new();

    for (index, (item, recycled)) in items.iter().zip(&already_recycled).enumerate() {
        if token.is_cancelled() {
            break;
        }
        if !item.has_path() {
            progress.skip(index, &item.path).await;
            continue;
        }
        progress.in_progress(index, &item.path).await;

        if *recycled || permanently {
            let fs = Arc::clone(&ctx.fs);
            let path = item.path.clone();
            let result = task::spawn_blocking(move || fs.remove_item(&path)).await;
            match result {
                Ok(Ok(())) => {
                    if item.kind == ItemKind::Directory {
                        removed_dirs.push(item.path.clone());
                    }
                    progress.success(index, &item.path).await;
                }
                Ok(Err(err)) => {
                    progress
                        .failure(index, ItemFailure::from_io(item.path.clone(), &err))
                        .await;
                }
                Err(err) => {
                    progress
                        .failure(
                            index,
                            ItemFailure::other(item.path.clone(), format!("task failed: {err}")),
                        )
                        .await;
                }
            }
        } else {
            match ctx.recycle.soft_delete(&item.path).await {
                Ok(location) => {
                    let destination = location.unwrap_or_else(|| item.path.clone());
                    soft_deleted.push((item.clone(), destination));
                    if item.kind == ItemKind::Directory {
                        removed_dirs.push(item.path.clone());
                    }
                    progress.success(index, &item.path).await;
                }
                Err(err) => {
                    progress
                        .failure(index, ItemFailure::other(item.path.clone(), err.to_string()))
                        .await;
                }
            }
        }
    }

    // Deleted folders should not linger in OS jump lists; failures here
    // are logged and ignored.
    for dir in &removed_dirs {
        if let Err(err) = ctx.jump_list.remove_folder(dir) {
            warn!(path = %dir.display(), error = %err, "jump list cleanup failed");
        }
    }

    // A permanently-deleted batch never produces a history entry.
    if !permanently && !token.is_cancelled() && !soft_deleted.is_empty() {
        let (sources, destinations) = soft_deleted.into_iter().unzip();
        ctx.history
            .add_history(HistoryEntry::new(kind, sources, destinations));
    }

    Ok(progress.finish(ctx.status.as_ref()).await)
}

/// Build the consolidated confirmation list, recovering original display
/// names for items already inside the recycle bin.
async fn build_prompts(
    ctx: &OperationContext,
    items: &[StorageItemRef],
    already_recycled: &[bool],
) -> Vec<DeletePrompt> {
    let entries = if already_recycled.iter().any(|recycled| *recycled) {
        match ctx.recycle.enumerate().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "recycle bin enumeration failed");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    items
        .iter()
        .zip(already_recycled)
        .map(|(item, recycled)| {
            let display_name = if *recycled {
                entries
                    .iter()
                    .find(|entry| entry.recycle_path == item.path)
                    .map(|entry| entry.name.clone())
                    .unwrap_or_else(|| item.name.clone())
            } else {
                item.name.clone()
            };
            DeletePrompt {
                item: item.clone(),
                display_name,
                already_recycled: *recycled,
            }
        })
        .collect()
}
