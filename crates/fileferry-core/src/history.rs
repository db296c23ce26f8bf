//! History entries for undo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    ConfirmationPolicy, OperationKind, OperationRequest, RecycleOrigin, StorageItemRef,
    TransferPair,
};

/// A reversible record of a completed batch.
///
/// The source and destination lists are equal length and index-paired. A
/// partially failed batch records only the sub-items that completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The operation that was performed.
    pub kind: OperationKind,
    /// Items as they were before the operation.
    pub sources: Vec<StorageItemRef>,
    /// Paths the items ended up at.
    pub destinations: Vec<std::path::PathBuf>,
    /// When the batch completed.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(
        kind: OperationKind,
        sources: Vec<StorageItemRef>,
        destinations: Vec<std::path::PathBuf>,
    ) -> Self {
        debug_assert_eq!(sources.len(), destinations.len());
        Self {
            kind,
            sources,
            destinations,
            timestamp: Utc::now(),
        }
    }

    /// Number of sub-items the entry covers.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the entry covers no sub-items.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Human-readable description.
    pub fn description(&self) -> String {
        match self.kind {
            OperationKind::Rename if self.len() == 1 => format!(
                "Renamed '{}' to '{}'",
                self.sources[0].name,
                self.destinations[0]
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default()
            ),
            kind => format!("{} {} items", kind, self.len()),
        }
    }

    /// Build the request that reverses this entry, or `None` when the
    /// entry is not reversible.
    pub fn undo_request(&self) -> Option<OperationRequest> {
        if self.is_empty() {
            return None;
        }
        match self.kind {
            // Delete what the copy created.
            OperationKind::Copy | OperationKind::Create | OperationKind::CreateShortcut => {
                let items = self
                    .destinations
                    .iter()
                    .zip(&self.sources)
                    .map(|(dest, source)| StorageItemRef::new(dest, source.kind))
                    .collect();
                Some(OperationRequest::delete(
                    items,
                    true,
                    ConfirmationPolicy::Never,
                ))
            }
            // Move everything back where it came from.
            OperationKind::Move => {
                let pairs = self
                    .destinations
                    .iter()
                    .zip(&self.sources)
                    .map(|(dest, source)| {
                        TransferPair::new(
                            StorageItemRef::new(dest, source.kind),
                            source.path.clone(),
                        )
                    })
                    .collect();
                Some(OperationRequest::move_to(pairs, false))
            }
            OperationKind::Rename => {
                let destination = self.destinations.first()?;
                Some(OperationRequest::rename(
                    StorageItemRef::new(destination, self.sources[0].kind),
                    self.sources[0].name.clone(),
                ))
            }
            // Pull the items back out of the recycle bin.
            OperationKind::Delete => {
                let pairs = self
                    .destinations
                    .iter()
                    .zip(&self.sources)
                    .map(|(recycled, source)| {
                        let item =
                            StorageItemRef::new(recycled, source.kind).with_origin(RecycleOrigin {
                                original_path: source.path.clone(),
                                deleted_at: Some(self.timestamp),
                            });
                        TransferPair::new(item, source.path.clone())
                    })
                    .collect();
                Some(OperationRequest::restore(pairs, false))
            }
            // Send the restored items back to the bin.
            OperationKind::RestoreFromTrash => {
                let items = self
                    .destinations
                    .iter()
                    .zip(&self.sources)
                    .map(|(dest, source)| StorageItemRef::new(dest, source.kind))
                    .collect();
                Some(OperationRequest::delete(
                    items,
                    false,
                    ConfirmationPolicy::Never,
                ))
            }
        }
    }
}
