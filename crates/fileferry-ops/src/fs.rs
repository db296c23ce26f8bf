//! Standard-library filesystem implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fileferry_core::{Filesystem, ItemKind};

/// [`Filesystem`] backed by `std::fs`.
///
/// Moves try a rename first and fall back to copy + delete for
/// cross-filesystem destinations.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn classify(&self, path: &Path) -> io::Result<ItemKind> {
        let metadata = fs::metadata(path)?;
        Ok(if metadata.is_dir() {
            ItemKind::Directory
        } else {
            ItemKind::File
        })
    }

    fn copy_item(&self, source: &Path, destination: &Path) -> io::Result<u64> {
        if source.is_dir() {
            copy_dir_recursive(source, destination)
        } else {
            fs::copy(source, destination)
        }
    }

    fn move_item(&self, source: &Path, destination: &Path) -> io::Result<u64> {
        let size = item_size(source);

        // Fast path for same-filesystem moves.
        if fs::rename(source, destination).is_ok() {
            return Ok(size);
        }

        if source.is_dir() {
            copy_dir_recursive(source, destination)?;
            fs::remove_dir_all(source)?;
        } else {
            fs::copy(source, destination)?;
            fs::remove_file(source)?;
        }
        Ok(size)
    }

    fn remove_item(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }

    fn rename_item(&self, path: &Path, new_name: &str) -> io::Result<PathBuf> {
        let target = path.parent().unwrap_or(Path::new("")).join(new_name);
        fs::rename(path, &target)?;
        Ok(target)
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    #[cfg(unix)]
    fn create_shortcut(&self, target: &Path, link: &Path) -> io::Result<()> {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    fn create_shortcut(&self, target: &Path, link: &Path) -> io::Result<()> {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }

    #[cfg(not(any(unix, windows)))]
    fn create_shortcut(&self, _target: &Path, _link: &Path) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "shortcuts are not supported on this platform",
        ))
    }
}

/// Recursively copy a directory, returning bytes copied.
fn copy_dir_recursive(source: &Path, destination: &Path) -> io::Result<u64> {
    fs::create_dir_all(destination)?;

    let mut total_bytes = 0u64;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        let dest_path = destination.join(entry.file_name());

        if path.is_dir() {
            total_bytes += copy_dir_recursive(&path, &dest_path)?;
        } else {
            total_bytes += fs::copy(&path, &dest_path)?;
        }
    }

    Ok(total_bytes)
}

/// Size of a file or directory tree; best-effort.
fn item_size(path: &Path) -> u64 {
    if path.is_dir() {
        dir_size(path)
    } else {
        fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }
}

fn dir_size(dir: &Path) -> u64 {
    let mut size = 0u64;
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                size += dir_size(&path);
            } else if let Ok(metadata) = fs::metadata(&path) {
                size += metadata.len();
            }
        }
    }
    size
}
