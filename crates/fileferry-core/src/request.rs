//! Operation request types.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::StorageItemRef;

/// The kind of operation a batch performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Create,
    Delete,
    Copy,
    Move,
    Rename,
    RestoreFromTrash,
    CreateShortcut,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "Create"),
            Self::Delete => write!(f, "Delete"),
            Self::Copy => write!(f, "Copy"),
            Self::Move => write!(f, "Move"),
            Self::Rename => write!(f, "Rename"),
            Self::RestoreFromTrash => write!(f, "Restore"),
            Self::CreateShortcut => write!(f, "Create shortcut"),
        }
    }
}

/// How a name collision at a destination is handled, one decision per
/// source item, index-aligned with the source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionDecision {
    /// No special handling; the destination is used as-is.
    #[default]
    None,
    /// Skip the item.
    Skip,
    /// Overwrite the existing destination.
    Overwrite,
    /// Generate a non-colliding name (e.g. "file (1).txt").
    GenerateNewName,
}

/// When a delete batch asks the user for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationPolicy {
    /// Confirm every delete.
    Always,
    /// Confirm only permanent deletes.
    PermanentOnly,
    /// Never confirm.
    Never,
}

/// One (source, destination) pair of a transfer batch.
///
/// Batches carry their source and destination lists as pairs so the two
/// stay equal-length and index-aligned by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPair {
    pub source: StorageItemRef,
    pub destination: PathBuf,
}

impl TransferPair {
    /// Create a new pair.
    pub fn new(source: StorageItemRef, destination: impl Into<PathBuf>) -> Self {
        Self {
            source,
            destination: destination.into(),
        }
    }
}

/// A filesystem operation to be executed, one variant per kind, each
/// carrying exactly the fields that kind needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OperationRequest {
    /// Create a new empty file or directory.
    Create { item: StorageItemRef },
    /// Delete items, soft or permanent.
    Delete {
        items: Vec<StorageItemRef>,
        permanently: bool,
        confirm: ConfirmationPolicy,
    },
    /// Copy items to their paired destinations.
    Copy {
        pairs: Vec<TransferPair>,
        show_dialog: bool,
    },
    /// Move items to their paired destinations.
    Move {
        pairs: Vec<TransferPair>,
        show_dialog: bool,
    },
    /// Rename a single item.
    Rename {
        item: StorageItemRef,
        new_name: CompactString,
        collision: CollisionDecision,
        register_history: bool,
    },
    /// Restore soft-deleted items back to their paired destinations.
    RestoreFromTrash {
        pairs: Vec<TransferPair>,
        register_history: bool,
    },
    /// Create one shortcut per source inside a destination directory.
    CreateShortcut {
        sources: Vec<StorageItemRef>,
        destination_dir: PathBuf,
        show_dialog: bool,
    },
}

impl OperationRequest {
    /// Create a copy request.
    pub fn copy(pairs: Vec<TransferPair>, show_dialog: bool) -> Self {
        Self::Copy { pairs, show_dialog }
    }

    /// Create a move request.
    pub fn move_to(pairs: Vec<TransferPair>, show_dialog: bool) -> Self {
        Self::Move { pairs, show_dialog }
    }

    /// Create a delete request.
    pub fn delete(items: Vec<StorageItemRef>, permanently: bool, confirm: ConfirmationPolicy) -> Self {
        Self::Delete {
            items,
            permanently,
            confirm,
        }
    }

    /// Create a rename request.
    pub fn rename(item: StorageItemRef, new_name: impl Into<CompactString>) -> Self {
        Self::Rename {
            item,
            new_name: new_name.into(),
            collision: CollisionDecision::None,
            register_history: true,
        }
    }

    /// Create a restore request.
    pub fn restore(pairs: Vec<TransferPair>, register_history: bool) -> Self {
        Self::RestoreFromTrash {
            pairs,
            register_history,
        }
    }

    /// The kind of this request.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Delete { .. } => OperationKind::Delete,
            Self::Copy { .. } => OperationKind::Copy,
            Self::Move { .. } => OperationKind::Move,
            Self::Rename { .. } => OperationKind::Rename,
            Self::RestoreFromTrash { .. } => OperationKind::RestoreFromTrash,
            Self::CreateShortcut { .. } => OperationKind::CreateShortcut,
        }
    }

    /// Number of items the batch covers.
    pub fn total_items(&self) -> usize {
        match self {
            Self::Create { .. } | Self::Rename { .. } => 1,
            Self::Delete { items, .. } => items.len(),
            Self::Copy { pairs, .. }
            | Self::Move { pairs, .. }
            | Self::RestoreFromTrash { pairs, .. } => pairs.len(),
            Self::CreateShortcut { sources, .. } => sources.len(),
        }
    }
}
