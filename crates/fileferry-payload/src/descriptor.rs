//! Content-descriptor payload entries.

use compact_str::CompactString;

use fileferry_core::{ItemKind, StorageItemRef};

/// What a content descriptor carries for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorContent {
    /// The entry is a folder; only its name is known.
    Directory,
    /// The entry is a file backed by an in-memory content stream.
    Contents(Vec<u8>),
}

/// One entry of the raw content-descriptor format: a filename paired with
/// either a directory flag or a content stream.
///
/// Used to recover items the native format could not materialize, e.g. a
/// remote-session clipboard where no local path exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    /// Display name of the entry.
    pub filename: CompactString,
    /// Directory flag or file contents.
    pub content: DescriptorContent,
}

impl ContentDescriptor {
    /// Create a folder descriptor.
    pub fn directory(filename: impl Into<CompactString>) -> Self {
        Self {
            filename: filename.into(),
            content: DescriptorContent::Directory,
        }
    }

    /// Create a file descriptor backed by a content stream.
    pub fn file(filename: impl Into<CompactString>, contents: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content: DescriptorContent::Contents(contents),
        }
    }

    /// Convert into a virtual item reference.
    pub fn into_item(self) -> StorageItemRef {
        let kind = match self.content {
            DescriptorContent::Directory => ItemKind::Directory,
            DescriptorContent::Contents(_) => ItemKind::File,
        };
        StorageItemRef::virtual_item(self.filename, kind)
    }
}
