//! Recycle bin collaborator and its `trash`-backed implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;
use tracing::debug;

use fileferry_core::RecycleBinEntry;

use crate::error::OpsError;

/// Soft-delete capability of the host.
#[async_trait]
pub trait RecycleBinService: Send + Sync {
    /// Whether a path lives inside the recycle bin (prefix test).
    async fn is_path_under_recycle_bin(&self, path: &Path) -> bool;

    /// Whether the volume holding `path` supports recycling.
    async fn has_recycle_bin(&self, path: &Path) -> bool;

    /// List the recycle bin; used to recover original display names.
    async fn enumerate(&self) -> Result<Vec<RecycleBinEntry>, OpsError>;

    /// Move one item into the recycle bin, returning its recycle-side
    /// location when the platform reports one.
    async fn soft_delete(&self, path: &Path) -> Result<Option<PathBuf>, OpsError>;

    /// Purge every entry, returning how many were purged.
    async fn empty_recycle_bin(&self) -> Result<usize, OpsError>;

    /// Restore every entry to its original path, returning how many were
    /// restored.
    async fn restore_all(&self) -> Result<usize, OpsError>;
}

/// Whether the empty-recycle-bin command is executable: the bin holds at
/// least one entry, or the recycle bin page itself is current.
pub async fn can_empty_recycle_bin(
    service: &dyn RecycleBinService,
    on_recycle_bin_page: bool,
) -> bool {
    match service.enumerate().await {
        Ok(entries) if !entries.is_empty() => true,
        _ => on_recycle_bin_page,
    }
}

/// [`RecycleBinService`] backed by the `trash` crate.
///
/// Enumeration, purge and restore are only available where the crate
/// exposes them (Windows and FreeDesktop platforms); elsewhere those
/// calls report [`OpsError::RecycleBinUnsupported`] and deletion falls
/// back to permanent.
#[derive(Debug, Clone)]
pub struct TrashRecycleBin {
    bin_roots: Vec<PathBuf>,
}

impl Default for TrashRecycleBin {
    fn default() -> Self {
        Self::new()
    }
}

impl TrashRecycleBin {
    /// Create a service probing the platform's default trash locations.
    pub fn new() -> Self {
        Self {
            bin_roots: default_bin_roots(),
        }
    }

    /// Create a service with explicit bin roots (mainly for tests).
    pub fn with_roots(bin_roots: Vec<PathBuf>) -> Self {
        Self { bin_roots }
    }
}

#[async_trait]
impl RecycleBinService for TrashRecycleBin {
    async fn is_path_under_recycle_bin(&self, path: &Path) -> bool {
        self.bin_roots.iter().any(|root| path.starts_with(root))
    }

    async fn has_recycle_bin(&self, _path: &Path) -> bool {
        PLATFORM_SUPPORTED
    }

    async fn enumerate(&self) -> Result<Vec<RecycleBinEntry>, OpsError> {
        task::spawn_blocking(enumerate_blocking)
            .await
            .map_err(OpsError::join)?
    }

    async fn soft_delete(&self, path: &Path) -> Result<Option<PathBuf>, OpsError> {
        let path = path.to_path_buf();
        task::spawn_blocking(move || {
            trash::delete(&path).map_err(|err| OpsError::RecycleBin(err.to_string()))?;
            // Best-effort lookup of the recycle-side location.
            let location = enumerate_blocking().ok().and_then(|entries| {
                entries
                    .into_iter()
                    .find(|entry| entry.original_path == path)
                    .map(|entry| entry.recycle_path)
            });
            Ok(location)
        })
        .await
        .map_err(OpsError::join)?
    }

    async fn empty_recycle_bin(&self) -> Result<usize, OpsError> {
        let count = task::spawn_blocking(purge_all_blocking)
            .await
            .map_err(OpsError::join)??;
        debug!(count, "recycle bin emptied");
        Ok(count)
    }

    async fn restore_all(&self) -> Result<usize, OpsError> {
        let count = task::spawn_blocking(restore_all_blocking)
            .await
            .map_err(OpsError::join)??;
        debug!(count, "recycle bin restored");
        Ok(count)
    }
}

#[cfg(any(target_os = "windows", target_os = "linux", target_os = "freebsd"))]
const PLATFORM_SUPPORTED: bool = true;
#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "freebsd")))]
const PLATFORM_SUPPORTED: bool = false;

#[cfg(any(target_os = "windows", target_os = "linux", target_os = "freebsd"))]
fn enumerate_blocking() -> Result<Vec<RecycleBinEntry>, OpsError> {
    let items =
        trash::os_limited::list().map_err(|err| OpsError::RecycleBin(err.to_string()))?;
    Ok(items
        .into_iter()
        .map(|item| {
            let original = item.original_path();
            let mut entry = RecycleBinEntry::new(PathBuf::from(item.id.clone()), original);
            if let Some(deleted_at) = chrono::DateTime::from_timestamp(item.time_deleted, 0) {
                entry = entry.with_deleted_at(deleted_at);
            }
            entry
        })
        .collect())
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "freebsd")))]
fn enumerate_blocking() -> Result<Vec<RecycleBinEntry>, OpsError> {
    Err(OpsError::RecycleBinUnsupported)
}

#[cfg(any(target_os = "windows", target_os = "linux", target_os = "freebsd"))]
fn purge_all_blocking() -> Result<usize, OpsError> {
    let items =
        trash::os_limited::list().map_err(|err| OpsError::RecycleBin(err.to_string()))?;
    let count = items.len();
    trash::os_limited::purge_all(items).map_err(|err| OpsError::RecycleBin(err.to_string()))?;
    Ok(count)
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "freebsd")))]
fn purge_all_blocking() -> Result<usize, OpsError> {
    Err(OpsError::RecycleBinUnsupported)
}

#[cfg(any(target_os = "windows", target_os = "linux", target_os = "freebsd"))]
fn restore_all_blocking() -> Result<usize, OpsError> {
    let items =
        trash::os_limited::list().map_err(|err| OpsError::RecycleBin(err.to_string()))?;
    let count = items.len();
    trash::os_limited::restore_all(items)
        .map_err(|err| OpsError::RecycleBin(err.to_string()))?;
    Ok(count)
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "freebsd")))]
fn restore_all_blocking() -> Result<usize, OpsError> {
    Err(OpsError::RecycleBinUnsupported)
}

/// Default trash roots for the prefix test.
fn default_bin_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    #[cfg(windows)]
    {
        let drive = std::env::var_os("SystemDrive")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("C:"));
        roots.push(drive.join("$Recycle.Bin"));
    }

    #[cfg(unix)]
    {
        if let Some(data_home) = std::env::var_os("XDG_DATA_HOME") {
            roots.push(PathBuf::from(data_home).join("Trash"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            roots.push(home.join(".local/share/Trash"));
            #[cfg(target_os = "macos")]
            roots.push(home.join(".Trash"));
        }
    }

    roots
}
