//! Storage item references and recycle-bin entries.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Type of storage item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl ItemKind {
    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, ItemKind::File)
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, ItemKind::Directory)
    }
}

/// Recovery metadata for an item that lives inside the recycle bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecycleOrigin {
    /// Path the item occupied before it was soft-deleted.
    pub original_path: PathBuf,
    /// When the item was soft-deleted, if known.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Reference to a storage item.
///
/// The path may be empty for purely virtual items, e.g. entries decoded
/// from a remote-session clipboard that only carry a name and a content
/// stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageItemRef {
    /// Filesystem path; empty for virtual items.
    pub path: PathBuf,
    /// Display name.
    pub name: CompactString,
    /// File or directory.
    pub kind: ItemKind,
    /// Recycle-bin recovery metadata, when the item was soft-deleted.
    pub origin: Option<RecycleOrigin>,
}

impl StorageItemRef {
    /// Create a reference with an explicit kind, deriving the display
    /// name from the final path component.
    pub fn new(path: impl Into<PathBuf>, kind: ItemKind) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| CompactString::from(n.to_string_lossy()))
            .unwrap_or_default();
        Self {
            path,
            name,
            kind,
            origin: None,
        }
    }

    /// Create a file reference.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ItemKind::File)
    }

    /// Create a directory reference.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ItemKind::Directory)
    }

    /// Create a virtual item carrying only a name.
    pub fn virtual_item(name: impl Into<CompactString>, kind: ItemKind) -> Self {
        Self {
            path: PathBuf::new(),
            name: name.into(),
            kind,
            origin: None,
        }
    }

    /// Attach recycle-bin recovery metadata.
    pub fn with_origin(mut self, origin: RecycleOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Whether this reference points at a real filesystem location.
    pub fn has_path(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }

    /// Borrow the path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One entry of the recycle bin: the recycle-side location mapped back to
/// the original path and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecycleBinEntry {
    /// Location of the item inside the recycle bin.
    pub recycle_path: PathBuf,
    /// Path the item occupied before deletion.
    pub original_path: PathBuf,
    /// Original display name.
    pub name: CompactString,
    /// When the item was soft-deleted, if known.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RecycleBinEntry {
    /// Create a new entry, deriving the display name from the original
    /// path.
    pub fn new(recycle_path: impl Into<PathBuf>, original_path: impl Into<PathBuf>) -> Self {
        let original_path = original_path.into();
        let name = original_path
            .file_name()
            .map(|n| CompactString::from(n.to_string_lossy()))
            .unwrap_or_default();
        Self {
            recycle_path: recycle_path.into(),
            original_path,
            name,
            deleted_at: None,
        }
    }

    /// Attach the deletion time.
    pub fn with_deleted_at(mut self, deleted_at: DateTime<Utc>) -> Self {
        self.deleted_at = Some(deleted_at);
        self
    }
}
