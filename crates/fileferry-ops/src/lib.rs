//! File operations engine for fileferry.
//!
//! This crate executes copy, move, delete, rename, restore-from-trash and
//! shortcut-creation batches against the host filesystem, resolving name
//! collisions up front, streaming per-item progress onto a status sink,
//! and recording reversible batches into a history store. All UI concerns
//! (banners, dialogs, selection) sit behind collaborator traits supplied
//! through an [`OperationContext`].

mod collision;
mod context;
mod create;
mod delete;
mod error;
mod executor;
mod fs;
mod history;
mod recycle;
mod rename;
mod restore;
mod shortcut;
mod status;
mod transfer;

pub use collision::{generated_name, resolve_collisions, ConflictItem, ItemDecision, Resolution};
pub use context::{
    ConfirmationDialog, DeletePrompt, DeleteVerdict, ExecutorSettings, ExecutorSettingsBuilder,
    HistoryStore, JumpListService, NamingSettings, NoopJumpList, OperationContext, SelectionHook,
};
pub use error::OpsError;
pub use executor::{BatchOutcome, BatchState, OperationExecutor};
pub use fs::StdFilesystem;
pub use history::HistoryLog;
pub use recycle::{can_empty_recycle_bin, RecycleBinService, TrashRecycleBin};
pub use status::{banner_channel, BannerHandle, NullStatusSink, ProgressEvent, StatusSink};

/// Default channel buffer size for banner progress events.
pub const OPERATION_CHANNEL_SIZE: usize = 100;
