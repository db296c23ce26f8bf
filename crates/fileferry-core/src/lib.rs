//! Core types and traits for fileferry.
//!
//! This crate provides the fundamental data structures shared by the
//! payload decoder and the operation executor: storage item references,
//! operation requests, progress statuses, history entries, the naming
//! policy, and the host filesystem capability trait.

mod error;
mod fs;
mod history;
mod item;
mod naming;
mod request;
mod status;

pub use error::{FailureKind, ItemFailure, NameError};
pub use fs::Filesystem;
pub use history::HistoryEntry;
pub use item::{ItemKind, RecycleBinEntry, RecycleOrigin, StorageItemRef};
pub use naming::{NamingPolicy, DEFAULT_RESTRICTED_CHARS, RESERVED_DEVICE_NAMES};
pub use request::{
    CollisionDecision, ConfirmationPolicy, OperationKind, OperationRequest, TransferPair,
};
pub use status::ProgressStatus;
