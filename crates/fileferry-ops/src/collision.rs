//! Name-collision detection and resolution.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use compact_str::CompactString;
use tokio::task;
use tracing::{debug, warn};

use fileferry_core::{CollisionDecision, Filesystem, OperationKind, StorageItemRef, TransferPair};

use crate::context::OperationContext;

/// One candidate of a batch, flagged when its destination already exists.
#[derive(Debug, Clone)]
pub struct ConflictItem {
    /// Position within the batch's source list.
    pub index: usize,
    /// The item being transferred.
    pub source: StorageItemRef,
    /// Where it is going.
    pub destination: PathBuf,
    /// Whether the destination already resolves to an existing item.
    pub conflicting: bool,
}

/// Final decision for one source item, index-aligned with the source
/// list, optionally carrying a destination name the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDecision {
    pub decision: CollisionDecision,
    pub custom_name: Option<CompactString>,
}

impl ItemDecision {
    /// The default decision for any candidate.
    pub fn generate_new_name() -> Self {
        Self {
            decision: CollisionDecision::GenerateNewName,
            custom_name: None,
        }
    }

    /// A plain decision without a custom name.
    pub fn of(decision: CollisionDecision) -> Self {
        Self {
            decision,
            custom_name: None,
        }
    }

    /// A decision carrying a user-chosen destination name.
    pub fn renamed(decision: CollisionDecision, name: impl Into<CompactString>) -> Self {
        Self {
            decision,
            custom_name: Some(name.into()),
        }
    }
}

/// Outcome of collision resolution for a batch.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The user declined; the batch must abort with zero mutations.
    Cancelled,
    /// One decision per source item.
    Decided(Vec<ItemDecision>),
}

/// Resolve collisions for a batch before any I/O happens.
///
/// Destination existence is probed through the filesystem capability so
/// remote and virtual backends are covered. When nothing conflicts and
/// the dialog is not forced, the default decisions come back without
/// interrupting the user.
pub async fn resolve_collisions(
    ctx: &OperationContext,
    pairs: &[TransferPair],
    kind: OperationKind,
    force_dialog: bool,
) -> Resolution {
    if pairs.is_empty() && !force_dialog {
        return Resolution::Decided(Vec::new());
    }

    let fs = Arc::clone(&ctx.fs);
    let destinations: Vec<PathBuf> = pairs.iter().map(|p| p.destination.clone()).collect();
    let existing: Vec<bool> = task::spawn_blocking(move || {
        destinations
            .iter()
            .map(|dest| !dest.as_os_str().is_empty() && fs.exists(dest))
            .collect()
    })
    .await
    .unwrap_or_else(|_| vec![false; pairs.len()]);

    let mut seen: HashMap<PathBuf, usize> = HashMap::new();
    let mut items = Vec::with_capacity(pairs.len());
    for (index, pair) in pairs.iter().enumerate() {
        if let Some(previous) = seen.insert(pair.destination.clone(), index) {
            // Should be unreachable given index-paired batches; keep the
            // batch alive either way.
            warn!(
                destination = %pair.destination.display(),
                previous, index, "duplicate destination in batch"
            );
        }
        items.push(ConflictItem {
            index,
            source: pair.source.clone(),
            destination: pair.destination.clone(),
            conflicting: existing[index],
        });
    }

    let conflict_count = items.iter().filter(|i| i.conflicting).count();
    if conflict_count == 0 && !force_dialog {
        debug!(%kind, items = pairs.len(), "no collisions, skipping dialog");
        return Resolution::Decided(vec![ItemDecision::generate_new_name(); pairs.len()]);
    }

    let (conflicting, incoming): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|item| item.conflicting);
    debug!(%kind, conflicts = conflict_count, "presenting collision dialog");

    match ctx
        .dialog
        .show_conflicts(&incoming, &conflicting, kind, force_dialog)
        .await
    {
        Resolution::Cancelled => Resolution::Cancelled,
        Resolution::Decided(mut decisions) => {
            if decisions.len() != pairs.len() {
                warn!(
                    expected = pairs.len(),
                    got = decisions.len(),
                    "dialog returned a misaligned decision list"
                );
                decisions.resize(pairs.len(), ItemDecision::generate_new_name());
            }
            Resolution::Decided(decisions)
        }
    }
}

/// Generate a non-colliding variant of `destination`.
///
/// Returns the path unchanged when it is free, otherwise probes
/// "name (1).ext", "name (2).ext", ... until an unused name is found.
pub fn generated_name(fs: &dyn Filesystem, destination: &Path) -> PathBuf {
    if !fs.exists(destination) {
        return destination.to_path_buf();
    }

    let parent = destination.parent().unwrap_or(Path::new(""));
    let stem = destination
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    let extension = destination.extension().and_then(|e| e.to_str());

    let mut candidate = destination.to_path_buf();
    for i in 1..=1000u32 {
        let name = match extension {
            Some(ext) => format!("{stem} ({i}).{ext}"),
            None => format!("{stem} ({i})"),
        };
        candidate = parent.join(name);
        if !fs.exists(&candidate) {
            return candidate;
        }
    }
    candidate
}
