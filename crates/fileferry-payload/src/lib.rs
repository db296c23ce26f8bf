//! Drag-and-drop / clipboard payload decoding for fileferry.
//!
//! Dragged or pasted selections arrive in up to three formats at once,
//! none of which is complete on its own: the native item list drops
//! entries it cannot materialize and silently truncates long selections,
//! content descriptors only exist for virtual sources, and the legacy
//! flat path list carries nothing but paths. [`decode_payload`] walks all
//! three in fallback order and merges them into one ordered, deduplicated
//! item list.

mod descriptor;
mod droplist;
mod native;

pub use descriptor::{ContentDescriptor, DescriptorContent};
pub use droplist::{parse_drop_list, PayloadError};
pub use native::{NativeItemError, NATIVE_LIST_LIMIT};

use compact_str::CompactString;
use indexmap::IndexSet;
use std::path::PathBuf;
use tracing::{debug, warn};

use fileferry_core::{Filesystem, ItemKind, StorageItemRef};

/// The raw formats carried by one drag or clipboard payload.
#[derive(Debug, Default)]
pub struct DragPayload {
    /// Native storage item list; individual entries may have failed to
    /// materialize.
    pub native_items: Vec<Result<StorageItemRef, NativeItemError>>,
    /// Content descriptors for virtual sources.
    pub descriptors: Vec<ContentDescriptor>,
    /// Raw legacy drop descriptor bytes, when present.
    pub drop_list: Option<Vec<u8>>,
}

impl DragPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach native items.
    pub fn with_native_items(
        mut self,
        items: Vec<Result<StorageItemRef, NativeItemError>>,
    ) -> Self {
        self.native_items = items;
        self
    }

    /// Attach content descriptors.
    pub fn with_descriptors(mut self, descriptors: Vec<ContentDescriptor>) -> Self {
        self.descriptors = descriptors;
        self
    }

    /// Attach a raw drop descriptor.
    pub fn with_drop_list(mut self, bytes: Vec<u8>) -> Self {
        self.drop_list = Some(bytes);
        self
    }
}

/// Decode a payload into one ordered, deduplicated item list.
///
/// Formats are consulted in fallback order: native item list, content
/// descriptors, legacy drop list. Items are deduplicated by path when
/// they have one, otherwise by (name, kind) identity, keeping the
/// first-seen occurrence.
pub fn decode_payload(payload: DragPayload, fs: &dyn Filesystem) -> Vec<StorageItemRef> {
    let mut merger = Merger::default();

    for entry in payload.native_items {
        match entry {
            Ok(item) => merger.push(item),
            // Partial failures fall through to the other formats.
            Err(err) => debug!(error = %err, "skipping unreadable native item"),
        }
    }

    for descriptor in payload.descriptors {
        merger.push(descriptor.into_item());
    }

    if let Some(bytes) = payload.drop_list {
        match parse_drop_list(&bytes) {
            Ok(paths) => {
                for path in paths {
                    let kind = fs.classify(&path).unwrap_or(ItemKind::File);
                    merger.push(StorageItemRef::new(path, kind));
                }
            }
            Err(err) => warn!(error = %err, "discarding malformed drop list"),
        }
    }

    merger.items
}

/// Accumulates items while deduplicating by path or virtual identity.
#[derive(Debug, Default)]
struct Merger {
    items: Vec<StorageItemRef>,
    seen_paths: IndexSet<PathBuf>,
    seen_virtual: IndexSet<(CompactString, ItemKind)>,
}

impl Merger {
    fn push(&mut self, item: StorageItemRef) {
        let fresh = if item.has_path() {
            self.seen_paths.insert(item.path.clone())
        } else {
            self.seen_virtual.insert((item.name.clone(), item.kind))
        };
        if fresh {
            self.items.push(item);
        }
    }
}
