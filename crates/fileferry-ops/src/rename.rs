//! Rename execution.

use std::path::Path;
use std::sync::Arc;

use compact_str::CompactString;
use tokio::task;
use tracing::{debug, warn};

use fileferry_core::{
    CollisionDecision, HistoryEntry, ItemFailure, ItemKind, OperationKind, StorageItemRef,
};

use crate::context::OperationContext;
use crate::error::OpsError;
use crate::executor::BatchOutcome;
use crate::status::BatchProgress;

/// Run a rename.
pub(crate) async fn run(
    ctx: &OperationContext,
    item: StorageItemRef,
    new_name: CompactString,
    collision: CollisionDecision,
    register_history: bool,
) -> Result<BatchOutcome, OpsError> {
    let kind = OperationKind::Rename;

    // Validated against a policy snapshot before any I/O.
    let policy = ctx.naming.snapshot();
    policy.is_valid_for_filename(&new_name)?;

    let handle = ctx
        .status
        .add_banner(kind, Some(&item.path), None, 1)
        .await;
    let mut progress = BatchProgress::new(handle, kind);

    // Renaming to the current name succeeds without touching anything.
    if item.name == new_name {
        progress.success(0, &item.path).await;
        return Ok(progress.finish(ctx.status.as_ref()).await);
    }

    if item.kind == ItemKind::File && ctx.settings.confirm_extension_change {
        let old_ext = Path::new(item.name.as_str()).extension();
        let new_ext = Path::new(new_name.as_str()).extension();
        if old_ext != new_ext
            && !ctx
                .dialog
                .confirm_extension_change(&item.name, &new_name)
                .await
        {
            // Declining keeps the old extension by not renaming at all.
            debug!("extension change declined");
            return Ok(progress.cancel(ctx.status.as_ref()).await);
        }
    }

    let parent = item.path.parent().unwrap_or(Path::new("")).to_path_buf();
    let target = parent.join(new_name.as_str());
    let probe_fs = Arc::clone(&ctx.fs);
    let probe_target = target.clone();
    let target_exists = task::spawn_blocking(move || probe_fs.exists(&probe_target))
        .await
        .unwrap_or(false);
    let colliding = target_exists && target != item.path;

    if colliding && collision == CollisionDecision::Skip {
        progress.skip(0, &item.path).await;
        return Ok(progress.finish(ctx.status.as_ref()).await);
    }

    progress.in_progress(0, &item.path).await;

    let fs = Arc::clone(&ctx.fs);
    let source = item.path.clone();
    let requested = new_name.to_string();
    let result = task::spawn_blocking(move || {
        let final_name = if colliding {
            match collision {
                CollisionDecision::Overwrite => {
                    fs.remove_item(&target)?;
                    requested
                }
                CollisionDecision::GenerateNewName => {
                    let generated = crate::collision::generated_name(fs.as_ref(), &target);
                    generated
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or(requested)
                }
                CollisionDecision::None | CollisionDecision::Skip => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        format!("'{}' already exists", requested),
                    ));
                }
            }
        } else {
            requested
        };
        fs.rename_item(&source, &final_name)
    })
    .await;

    let mut renamed_to = None;
    match result {
        Ok(Ok(new_path)) => {
            renamed_to = Some(new_path);
            progress.success(0, &item.path).await;
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

    if let Some(new_path) = renamed_to {
        // The old path must not linger in OS jump lists.
        if item.kind == ItemKind::Directory {
            if let Err(err) = ctx.jump_list.remove_folder(&item.path) {
                warn!(path = %item.path.display(), error = %err, "jump list cleanup failed");
            }
        }
        if register_history {
            ctx.history.add_history(HistoryEntry::new(
                kind,
                vec![item.clone()],
                vec![new_path],
            ));
        }
    }

    Ok(progress.finish(ctx.status.as_ref()).await)
}
