//! Host filesystem capability interface.

use std::io;
use std::path::{Path, PathBuf};

use crate::ItemKind;

/// Capability interface over the host filesystem.
///
/// The operation engine never owns an on-disk format; everything it does
/// goes through this trait, which also covers remote or virtual backends.
/// Implementations are expected to be blocking; callers offload them with
/// `spawn_blocking`.
pub trait Filesystem: Send + Sync {
    /// Whether a path resolves to an existing item.
    fn exists(&self, path: &Path) -> bool;

    /// Classify an existing path as file or directory.
    fn classify(&self, path: &Path) -> io::Result<ItemKind>;

    /// Copy a file or directory tree, returning bytes copied.
    fn copy_item(&self, source: &Path, destination: &Path) -> io::Result<u64>;

    /// Move a file or directory tree, returning bytes moved.
    fn move_item(&self, source: &Path, destination: &Path) -> io::Result<u64>;

    /// Permanently remove a file or directory tree.
    fn remove_item(&self, path: &Path) -> io::Result<()>;

    /// Rename an item in place, returning the new path.
    fn rename_item(&self, path: &Path, new_name: &str) -> io::Result<PathBuf>;

    /// Create a new empty file; fails if the path exists.
    fn create_file(&self, path: &Path) -> io::Result<()>;

    /// Create a directory, including missing parents.
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    /// Create a shortcut at `link` pointing at `target`.
    fn create_shortcut(&self, target: &Path, link: &Path) -> io::Result<()>;
}
