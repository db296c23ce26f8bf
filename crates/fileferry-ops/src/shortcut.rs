//! Shortcut creation.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task;
use tracing::debug;

use fileferry_core::{
    CollisionDecision, ItemFailure, OperationKind, StorageItemRef, TransferPair,
};

use crate::collision::{resolve_collisions, Resolution};
use crate::context::OperationContext;
use crate::error::OpsError;
use crate::executor::BatchOutcome;
use crate::status::BatchProgress;

/// Fallback shortcut name when no naming template is configured.
fn fallback_shortcut_name(source_name: &str) -> String {
    format!("{source_name} - Shortcut")
}

/// Compute a shortcut's name from the configured template, falling back
/// to "<name> - Shortcut".
fn shortcut_name(template: Option<&str>, source_name: &str) -> String {
    match template {
        Some(template) if template.contains("{}") => template.replace("{}", source_name),
        _ => fallback_shortcut_name(source_name),
    }
}

/// Run a shortcut-creation batch.
pub(crate) async fn run(
    ctx: &OperationContext,
    sources: Vec<StorageItemRef>,
    destination_dir: PathBuf,
    show_dialog: bool,
) -> Result<BatchOutcome, OpsError> {
    let kind = OperationKind::CreateShortcut;

    // Virtual sources have nothing to point a shortcut at.
    let sources: Vec<StorageItemRef> = sources.into_iter().filter(|s| s.has_path()).collect();

    let template = ctx.settings.shortcut_name_template.as_deref();
    let pairs: Vec<TransferPair> = sources
        .into_iter()
        .map(|source| {
            let link = destination_dir.join(shortcut_name(template, &source.name));
            TransferPair::new(source, link)
        })
        .collect();

    let banner_source = pairs.first().map(|p| p.source.path.clone());
    let handle = ctx
        .status
        .add_banner(
            kind,
            banner_source.as_deref(),
            Some(&destination_dir),
            pairs.len(),
        )
        .await;
    let mut progress = BatchProgress::new(handle, kind);

    let decisions = match resolve_collisions(ctx, &pairs, kind, show_dialog).await {
        Resolution::Cancelled => {
            debug!("shortcut batch cancelled at collision resolution");
            return Ok(progress.cancel(ctx.status.as_ref()).await);
        }
        Resolution::Decided(decisions) => decisions,
    };

    let token = progress.token();
    for (index, (pair, decision)) in pairs.iter().zip(decisions.iter()).enumerate() {
        if token.is_cancelled() {
            break;
        }
        if decision.decision == CollisionDecision::Skip {
            progress.skip(index, &pair.destination).await;
            continue;
        }
        progress.in_progress(index, &pair.source.path).await;

        let fs = Arc::clone(&ctx.fs);
        let target = pair.source.path.clone();
        let link = pair.destination.clone();
        let decision_kind = decision.decision;
        let result = task::spawn_blocking(move || {
            let link = match decision_kind {
                CollisionDecision::GenerateNewName => {
                    crate::collision::generated_name(fs.as_ref(), &link)
                }
                _ => link,
            };
            if decision_kind == CollisionDecision::Overwrite && fs.exists(&link) {
                fs.remove_item(&link)?;
            }
            fs.create_shortcut(&target, &link)?;
            Ok::<(), io::Error>(())
        })
        .await;

        match result {
            Ok(Ok(())) => progress.success(index, &pair.source.path).await,
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

    Ok(progress.finish(ctx.status.as_ref()).await)
}
